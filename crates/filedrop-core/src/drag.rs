//! Reentrant drag counters.
//!
//! Browsers fire `dragenter`/`dragleave` for every nested element the
//! pointer crosses, so a single "is dragging" flag flickers whenever the
//! pointer moves between children. Counting enters minus leaves tells a
//! real exit (count back to zero) apart from a move between children.

/// Outstanding drag enters for the document and the drop region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragCounters {
    /// Document-level enters without a matching leave.
    pub entered_in_document: u32,
    /// Drop-region enters without a matching leave.
    pub is_over: u32,
}

impl DragCounters {
    /// Record a document-level `dragenter`.
    pub const fn document_enter(&mut self) {
        self.entered_in_document = self.entered_in_document.saturating_add(1);
    }

    /// Record a document-level `dragleave`, clamping at zero.
    pub const fn document_leave(&mut self) {
        self.entered_in_document = self.entered_in_document.saturating_sub(1);
    }

    /// Record a drop-region `dragenter`.
    ///
    /// Returns `true` when this is the first enter of an episode.
    pub const fn region_enter(&mut self) -> bool {
        let first = self.is_over == 0;
        self.is_over = self.is_over.saturating_add(1);
        first
    }

    /// Record a drop-region `dragleave`, clamping at zero.
    ///
    /// Returns `true` when this leave ends the episode. A leave with no
    /// outstanding enter is absorbed and returns `false`.
    pub const fn region_leave(&mut self) -> bool {
        if self.is_over == 0 {
            return false;
        }
        self.is_over -= 1;
        self.is_over == 0
    }

    /// Forget every outstanding enter (after a drop or dialog selection).
    pub const fn reset(&mut self) {
        self.entered_in_document = 0;
        self.is_over = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_enter_starts_an_episode() {
        let mut counters = DragCounters::default();
        assert!(counters.region_enter());
        assert!(!counters.region_enter());
        assert!(!counters.region_enter());
        assert_eq!(counters.is_over, 3);
    }

    #[test]
    fn only_the_last_leave_ends_the_episode() {
        let mut counters = DragCounters::default();
        counters.region_enter();
        counters.region_enter();
        assert!(!counters.region_leave());
        assert!(counters.region_leave());
        assert_eq!(counters.is_over, 0);
    }

    #[test]
    fn leave_without_enter_clamps_at_zero() {
        let mut counters = DragCounters::default();
        assert!(!counters.region_leave());
        assert_eq!(counters.is_over, 0);

        counters.document_leave();
        assert_eq!(counters.entered_in_document, 0);
    }

    #[test]
    fn document_counter_is_independent_of_region() {
        let mut counters = DragCounters::default();
        counters.document_enter();
        counters.document_enter();
        counters.region_enter();
        counters.document_leave();
        assert_eq!(
            counters,
            DragCounters {
                entered_in_document: 1,
                is_over: 1,
            }
        );
    }

    #[test]
    fn reset_clears_both_counters() {
        let mut counters = DragCounters {
            entered_in_document: 2,
            is_over: 2,
        };
        counters.reset();
        assert_eq!(counters, DragCounters::default());
    }
}
