//! Headless GPU picking integration tests.
//!
//! These tests need a GPU adapter (real or software fallback). Without one
//! they print a message and return early.

use pickbuf::*;

/// Uploads `color` into `rect` of the pick texture.
fn paint(queue: &wgpu::Queue, target: &WgpuPickTarget, rect: Region, color: PackedColor) {
    let rgba = color.unpack();
    let data: Vec<u8> = (0..rect.pixel_count()).flat_map(|_| rgba).collect();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: target.color_texture(),
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: rect.x,
                y: rect.y,
                z: 0,
            },
            aspect: wgpu::TextureAspect::All,
        },
        &data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(rect.width * 4),
            rows_per_image: Some(rect.height),
        },
        wgpu::Extent3d {
            width: rect.width,
            height: rect.height,
            depth_or_array_layers: 1,
        },
    );
}

/// All checks share one device, created once.
#[test]
fn headless_pick_tests() {
    let _ = env_logger::builder().is_test(true).try_init();

    let backend = match WgpuBackend::new_headless_blocking() {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Skipping headless pick tests: no GPU adapter available ({e})");
            return;
        }
    };
    let device = backend.device().clone();
    let queue = backend.queue().clone();

    let mut registry = PickRegistry::new();
    let cube = registry.register("cube").unwrap();
    let sphere = registry.register("sphere").unwrap();

    let mut picker = Picker::with_backend(backend, PickOptions::default());
    let viewport = Viewport::new(96, 64);

    // --- Test 1: a freshly cleared target picks nothing ---
    {
        let state = picker.begin(Region::full(viewport), viewport).expect("begin failed");
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("pick test encoder"),
        });
        {
            let _pass = begin_pick_pass(&mut encoder, &state);
        }
        queue.submit(std::iter::once(encoder.finish()));
    }
    assert_eq!(picker.pick(10, 10, &registry).unwrap(), None);
    assert!(picker.pick_rect(Region::full(viewport), &registry).unwrap().is_none());

    // --- Test 2: painted objects resolve ---
    {
        let state = picker.begin(Region::full(viewport), viewport).expect("begin failed");
        paint(&queue, state.target, Region::new(8, 8, 16, 16), cube);
        paint(&queue, state.target, Region::new(60, 30, 20, 20), sphere);
    }
    assert_eq!(picker.pick(12, 12, &registry).unwrap(), Some("cube"));
    assert_eq!(picker.pick(70, 40, &registry).unwrap(), Some("sphere"));
    assert_eq!(picker.pick(40, 4, &registry).unwrap(), None);

    let nearby = picker.pick_in(Region::new(22, 10, 7, 7), &registry).unwrap();
    assert_eq!(nearby, Some("cube"));

    let all = picker.pick_rect(Region::full(viewport), &registry).unwrap().unwrap();
    assert_eq!(all.objects, vec!["cube", "sphere"]);

    // Sphere spans rows 30..50, i.e. y 14..34 from the bottom edge.
    let probes = [
        PickProbe::new(Vec2::new(70.0, 24.0), Vec2::new(10.0, 10.0)),
        PickProbe::new(Vec2::new(65.0, 30.0), Vec2::new(10.0, 10.0)),
    ];
    let sparse = picker
        .pick_sparse(Region::full(viewport), &probes, &registry)
        .unwrap()
        .unwrap();
    assert_eq!(sparse.objects, vec!["sphere"]);

    // --- Test 3: same size keeps the target, a new size replaces it ---
    let before = picker.session().target().map(|t| t.color_texture().clone());
    picker.begin(Region::full(viewport), viewport).unwrap();
    let same = picker.session().target().map(|t| t.color_texture().clone());
    assert_eq!(before, same);

    let resized = Viewport::new(32, 32);
    picker.begin(Region::full(resized), resized).unwrap();
    assert_eq!(
        picker.session().status(),
        SessionStatus::Allocated {
            width: 32,
            height: 32
        }
    );
    assert_eq!(picker.pick(12, 12, &registry).unwrap(), None);

    // --- Test 4: destroy ---
    picker.destroy();
    assert!(picker.is_destroyed());
    assert!(matches!(
        picker.pick(0, 0, &registry),
        Err(PickError::SessionDestroyed)
    ));
}
