pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const STAGGER_MS: u32 = 100;

/// Tracks which of a fixed set of elements have been revealed.
#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Returns the reveal delay in ms the first time `index` intersects,
    /// `None` on every other call. Leaving the viewport never hides it again.
    pub fn observe(&mut self, index: usize, intersecting: bool) -> Option<u32> {
        if !intersecting {
            return None;
        }
        let slot = self.revealed.get_mut(index)?;
        if *slot {
            return None;
        }
        *slot = true;
        Some(u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(STAGGER_MS))
    }
}
