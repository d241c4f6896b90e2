//! Timers module - pending delayed effects keyed by purpose
//!
//! Each purpose has at most one pending action. Scheduling a purpose that is
//! already pending replaces it (a new match restarts the combo window rather
//! than queueing a second reset). Time only advances through
//! [`Timers::advance`], so the session stays deterministic under test.

use arrayvec::ArrayVec;

/// What a pending action will do when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Remove a matched pair from the board
    ResolveMatch,
    /// Hide a revealed hint
    ExpireHint,
    /// Drop the combo counter back to zero
    ResetCombo,
    /// Declare the cleared board won
    Finish,
}

impl Deferred {
    /// Firing order when several actions come due in the same step
    pub const ALL: [Deferred; 4] = [
        Deferred::ResolveMatch,
        Deferred::ExpireHint,
        Deferred::ResetCombo,
        Deferred::Finish,
    ];

    fn slot(self) -> usize {
        match self {
            Deferred::ResolveMatch => 0,
            Deferred::ExpireHint => 1,
            Deferred::ResetCombo => 2,
            Deferred::Finish => 3,
        }
    }
}

/// One countdown slot per [`Deferred`] purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timers {
    remaining_ms: [Option<u32>; 4],
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown for `purpose`
    pub fn schedule(&mut self, purpose: Deferred, delay_ms: u32) {
        self.remaining_ms[purpose.slot()] = Some(delay_ms);
    }

    pub fn cancel(&mut self, purpose: Deferred) {
        self.remaining_ms[purpose.slot()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.remaining_ms = [None; 4];
    }

    pub fn is_pending(&self, purpose: Deferred) -> bool {
        self.remaining_ms[purpose.slot()].is_some()
    }

    /// Milliseconds until the earliest pending action fires
    pub fn next_due(&self) -> Option<u32> {
        self.remaining_ms.iter().flatten().copied().min()
    }

    /// Advance every pending countdown and return the purposes that came
    /// due, in [`Deferred::ALL`] order. Fired slots are cleared.
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<Deferred, 4> {
        let mut fired = ArrayVec::new();
        for purpose in Deferred::ALL {
            let slot = &mut self.remaining_ms[purpose.slot()];
            if let Some(ms) = slot {
                if *ms <= elapsed_ms {
                    *slot = None;
                    fired.push(purpose);
                } else {
                    *ms -= elapsed_ms;
                }
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut t = Timers::new();
        t.schedule(Deferred::ResolveMatch, 250);
        assert!(t.advance(200).is_empty());
        assert_eq!(t.next_due(), Some(50));
        assert_eq!(t.advance(50).as_slice(), &[Deferred::ResolveMatch]);
        assert!(!t.is_pending(Deferred::ResolveMatch));
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut t = Timers::new();
        t.schedule(Deferred::ResetCombo, 2500);
        t.advance(2000);
        t.schedule(Deferred::ResetCombo, 2500);
        assert!(t.advance(2000).is_empty());
        assert_eq!(t.advance(500).as_slice(), &[Deferred::ResetCombo]);
    }

    #[test]
    fn test_fired_in_fixed_order() {
        let mut t = Timers::new();
        t.schedule(Deferred::Finish, 10);
        t.schedule(Deferred::ResolveMatch, 10);
        t.schedule(Deferred::ExpireHint, 5);
        assert_eq!(
            t.advance(16).as_slice(),
            &[Deferred::ResolveMatch, Deferred::ExpireHint, Deferred::Finish]
        );
    }

    #[test]
    fn test_next_due_is_earliest() {
        let mut t = Timers::new();
        assert_eq!(t.next_due(), None);
        t.schedule(Deferred::ResetCombo, 2500);
        t.schedule(Deferred::ResolveMatch, 250);
        assert_eq!(t.next_due(), Some(250));
        t.cancel(Deferred::ResolveMatch);
        assert_eq!(t.next_due(), Some(2500));
    }

    #[test]
    fn test_cancel_all() {
        let mut t = Timers::new();
        for p in Deferred::ALL {
            t.schedule(p, 1);
        }
        t.cancel_all();
        assert!(t.advance(100).is_empty());
    }
}
