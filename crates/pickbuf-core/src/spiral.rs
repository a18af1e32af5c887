//! Square spiral walk used by the nearest-object probe.

/// Iterator over the cells of a square spiral centered on `(0, 0)`.
///
/// The walk starts heading `(0, -1)` and turns 90° at each corner of the
/// square it is tracing. `y` grows toward row 0 of the pixel block.
#[derive(Debug, Clone)]
pub struct Spiral {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    remaining: u64,
}

impl Spiral {
    /// A spiral that visits `steps` cells.
    #[must_use]
    pub fn new(steps: u64) -> Self {
        Self {
            x: 0,
            y: 0,
            dx: 0,
            dy: -1,
            remaining: steps,
        }
    }

    /// A spiral covering the `side × side` square around the center.
    #[must_use]
    pub fn covering(side: u32) -> Self {
        Self::new(u64::from(side) * u64::from(side))
    }

    fn at_corner(&self) -> bool {
        let (x, y) = (self.x, self.y);
        // The bottom-right corner sits one cell further out, stepping into the next ring.
        x == y || (x < 0 && -x == y) || (x > 0 && x == 1 - y)
    }
}

impl Iterator for Spiral {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = (self.x, self.y);
        if self.at_corner() {
            let turned = self.dx;
            self.dx = -self.dy;
            self.dy = turned;
        }
        self.x += self.dx;
        self.y += self.dy;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_by_three_order() {
        let order: Vec<_> = Spiral::covering(3).collect();
        assert_eq!(
            order,
            vec![
                (0, 0),
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
                (0, -1),
                (1, -1),
            ]
        );
    }

    #[test]
    fn test_five_by_five_covers_every_cell_once() {
        let mut cells: Vec<_> = Spiral::covering(5).collect();
        assert_eq!(cells.len(), 25);
        assert_eq!(cells[9], (2, -1));
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), 25);
        assert!(cells.iter().all(|&(x, y)| x.abs() <= 2 && y.abs() <= 2));
    }

    #[test]
    fn test_rings_grow_outward() {
        let ring = |(x, y): (i64, i64)| x.abs().max(y.abs());
        let rings: Vec<_> = Spiral::covering(7).map(ring).collect();
        assert!(rings.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_spiral() {
        assert_eq!(Spiral::new(0).next(), None);
        assert_eq!(Spiral::covering(1).collect::<Vec<_>>(), vec![(0, 0)]);
    }
}
