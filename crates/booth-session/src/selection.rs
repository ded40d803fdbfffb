//! Photos picked for the next collage.

use tracing::debug;

/// Ordered photo picks, capped at the grid's slot count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollageSelection {
    picks: Vec<String>,
    max_slots: usize,
}

impl CollageSelection {
    pub fn new(max_slots: usize) -> Self {
        Self {
            picks: Vec::new(),
            max_slots,
        }
    }

    /// Pick or unpick `photo_id`. Picking into a full selection does nothing.
    /// Returns whether the photo is picked afterwards.
    pub fn toggle(&mut self, photo_id: &str) -> bool {
        if let Some(index) = self.picks.iter().position(|p| p == photo_id) {
            self.picks.remove(index);
            return false;
        }
        if self.is_full() {
            debug!(max_slots = self.max_slots, "Selection full; ignoring pick");
            return false;
        }
        self.picks.push(photo_id.to_string());
        true
    }

    /// Change the cap. Existing picks are kept even above the new cap.
    pub fn set_max_slots(&mut self, max_slots: usize) {
        self.max_slots = max_slots;
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }

    pub fn contains(&self, photo_id: &str) -> bool {
        self.picks.iter().any(|p| p == photo_id)
    }

    pub fn is_full(&self) -> bool {
        self.picks.len() >= self.max_slots
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Picked photo ids in pick order.
    pub fn ids(&self) -> &[String] {
        &self.picks
    }
}
