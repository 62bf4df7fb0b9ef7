//! The render region and its navigation generations

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Sequence number of a navigation. Only the newest one may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Slot {
    written_by: Option<Generation>,
    html: String,
}

/// The single piece of markup every navigation replaces wholesale.
///
/// Each navigation calls [`Region::begin`] before it starts fetching. A
/// render whose generation has been superseded by the time it finishes is
/// dropped by [`Region::commit`], so a slow fetch can never overwrite the
/// page the reader navigated to afterwards.
#[derive(Debug, Default)]
pub struct Region {
    latest: AtomicU64,
    slot: Mutex<Slot>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a navigation, superseding every earlier one
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `generation` is still the newest navigation
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }

    /// Replace the region markup if `generation` is still current.
    /// Returns `false` when the write was discarded.
    pub fn commit(&self, generation: Generation, html: String) -> bool {
        let mut slot = match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };

        // Checked under the lock so a newer commit cannot slip in between.
        if !self.is_current(generation) {
            tracing::debug!(
                "Discarding stale render {} (latest {})",
                generation.0,
                self.latest.load(Ordering::SeqCst)
            );
            return false;
        }

        slot.written_by = Some(generation);
        slot.html = html;
        true
    }

    /// Current markup
    pub fn html(&self) -> String {
        match self.slot.lock() {
            Ok(slot) => slot.html.clone(),
            Err(poisoned) => poisoned.into_inner().html.clone(),
        }
    }

    /// Generation that produced the current markup, if any
    pub fn written_by(&self) -> Option<Generation> {
        match self.slot.lock() {
            Ok(slot) => slot.written_by,
            Err(poisoned) => poisoned.into_inner().written_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_increase() {
        let region = Region::new();
        let first = region.begin();
        let second = region.begin();
        assert!(second > first);
        assert!(!region.is_current(first));
        assert!(region.is_current(second));
    }

    #[test]
    fn test_commit_current() {
        let region = Region::new();
        let generation = region.begin();
        assert!(region.commit(generation, "<p>one</p>".to_string()));
        assert_eq!(region.html(), "<p>one</p>");
        assert_eq!(region.written_by(), Some(generation));
    }

    #[test]
    fn test_stale_commit_discarded() {
        let region = Region::new();
        let stale = region.begin();
        let fresh = region.begin();
        assert!(region.commit(fresh, "fresh".to_string()));
        assert!(!region.commit(stale, "stale".to_string()));
        assert_eq!(region.html(), "fresh");
        assert_eq!(region.written_by(), Some(fresh));
    }

    #[test]
    fn test_current_may_commit_twice() {
        let region = Region::new();
        let generation = region.begin();
        assert!(region.commit(generation, "loading".to_string()));
        assert!(region.commit(generation, "done".to_string()));
        assert_eq!(region.html(), "done");
    }

    #[test]
    fn test_empty_region() {
        let region = Region::new();
        assert_eq!(region.html(), "");
        assert_eq!(region.written_by(), None);
    }
}
