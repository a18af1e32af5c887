//! Bounded set of distinct colors found during a bulk pick.
//!
//! Slots are filled from the back: the first color lands in the last slot and
//! the cursor walks toward index 0. Membership checks scan from the cursor to
//! the end, so the most recently inserted colors are compared first. Slots that
//! have not been filled yet hold [`PackedColor::BACKGROUND`], and the scan
//! includes the free slot under the cursor, so background pixels never take up
//! capacity.

use crate::pick::PackedColor;

/// Fixed-capacity palette with a back-to-front insertion cursor.
#[derive(Debug, Clone)]
pub struct Palette {
    slots: Vec<PackedColor>,
    /// Index of the next free slot; `None` once the palette is full.
    cursor: Option<usize>,
    last_seen: Option<PackedColor>,
    truncated: bool,
}

impl Palette {
    /// Creates an empty palette with room for `capacity` colors.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![PackedColor::BACKGROUND; capacity],
            cursor: capacity.checked_sub(1),
            last_seen: None,
            truncated: false,
        }
    }

    /// Total number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.cursor {
            Some(cursor) => self.slots.len() - cursor - 1,
            None => self.slots.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cursor.is_none()
    }

    /// True if a color may have been dropped because the palette was full.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Stores `color` in the next free slot without a containment scan.
    ///
    /// Used to seed the palette with the first pixel of a scan. The background
    /// color only becomes the run color. Returns false when nothing was stored.
    pub fn seed(&mut self, color: PackedColor) -> bool {
        if color == PackedColor::BACKGROUND {
            self.last_seen = Some(color);
            return false;
        }
        let Some(cursor) = self.cursor else {
            self.truncated = true;
            return false;
        };
        self.slots[cursor] = color;
        self.cursor = cursor.checked_sub(1);
        self.last_seen = Some(color);
        true
    }

    /// Offers a color to the palette.
    ///
    /// Runs of the same color skip the containment scan. Returns true if the
    /// color was inserted.
    pub fn offer(&mut self, color: PackedColor) -> bool {
        if self.last_seen == Some(color) {
            return false;
        }
        let Some(cursor) = self.cursor else {
            if color != PackedColor::BACKGROUND && !self.contains(color) {
                self.truncated = true;
            }
            return false;
        };
        if self.slots[cursor..].contains(&color) {
            return false;
        }
        self.slots[cursor] = color;
        self.cursor = cursor.checked_sub(1);
        self.last_seen = Some(color);
        true
    }

    /// Records that a scan stopped with input left over because the palette was full.
    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    /// Returns true if `color` is in an occupied slot.
    #[must_use]
    pub fn contains(&self, color: PackedColor) -> bool {
        self.occupied_slots().contains(&color)
    }

    /// Occupied colors, highest slot index first (insertion order).
    pub fn iter(&self) -> impl Iterator<Item = PackedColor> + '_ {
        self.occupied_slots().iter().rev().copied()
    }

    fn occupied_slots(&self) -> &[PackedColor] {
        let start = self.cursor.map_or(0, |cursor| cursor + 1);
        &self.slots[start..]
    }
}
