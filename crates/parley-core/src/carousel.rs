//! Circular selected-index state for the scenario carousel.
//!
//! Pure view state: advancing past the last entry wraps to the first and
//! retreating before the first wraps to the last. No backend interaction.

/// Selected-index state over a fixed-length catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    active: usize,
    len: usize,
}

impl Carousel {
    /// Create a carousel over `len` entries with the first entry active.
    ///
    /// A zero-length carousel is permitted and keeps its index pinned at 0.
    pub fn new(len: usize) -> Self {
        Self { active: 0, len }
    }

    /// Index of the currently active entry.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of entries the carousel ranges over.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when the carousel has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Advance to the next entry, wrapping past the end to index 0.
    pub fn next(&mut self) {
        if self.len > 0 {
            self.active = (self.active + 1) % self.len;
        }
    }

    /// Retreat to the previous entry, wrapping before index 0 to the end.
    pub fn prev(&mut self) {
        if self.len > 0 {
            self.active = (self.active + self.len - 1) % self.len;
        }
    }

    /// Jump directly to `index`; out-of-range values are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.active = index;
        }
    }
}
