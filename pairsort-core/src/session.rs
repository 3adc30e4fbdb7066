/// Binary-insertion ranking state machine.
///
/// One comparison at a time: the caller reads the question from
/// `comparison_pair()`, asks its judge, and feeds the answer back through
/// `apply_comparison()`. Each answer either narrows the current candidate's
/// search window or locks the candidate into place; when the last pending
/// candidate lands, the session completes and hands back the full order.
///
/// The session is a plain value with no hidden state. `apply_comparison`
/// consumes it and returns either the next session or the finished ranking,
/// so a completed session cannot be stepped again: there is no "done but
/// still mutable" state to misuse.
use std::collections::{HashSet, VecDeque};

use crate::types::{ComparisonPair, ItemId, Mode, Progress};

/// Result of starting a session.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStart {
    /// A live session; drive it with `apply_comparison`.
    Started(RankingSession),
    /// Fewer than two items to rank, or nothing to merge. Not an error:
    /// the caller declines to start and keeps whatever order it already had.
    NotEnoughItems,
}

/// Result of one comparison step.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session needs more answers.
    Active(RankingSession),
    /// Every item is placed. The vector is the complete ranking, most
    /// preferred first, already including the final candidate. Append
    /// nothing to it.
    Complete(Vec<ItemId>),
}

/// An in-progress ranking: the state of one binary-insertion sort.
///
/// Holds the items whose relative order is already determined (`ordered`,
/// most preferred first), the queue of items still waiting (`pending`), the
/// item currently being searched in (`candidate`), and the inclusive window
/// of `ordered` indices the search has narrowed to. The window is never
/// empty in a live session; exhaustion is resolved into an insertion before
/// `apply_comparison` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingSession {
    ordered: Vec<ItemId>,
    pending: VecDeque<ItemId>,
    candidate: ItemId,
    low_bound: usize,
    high_bound: usize,
    mode: Mode,
}

impl RankingSession {
    /// Start ranking `items` from scratch.
    ///
    /// The first item seeds the determined order, the second becomes the
    /// initial candidate, the rest queue up in presentation order. Fewer
    /// than two items cannot be compared, so `NotEnoughItems` comes back and
    /// no session exists.
    ///
    /// Panics on duplicate IDs.
    pub fn begin_full(items: &[ItemId]) -> SessionStart {
        if items.len() < 2 {
            return SessionStart::NotEnoughItems;
        }

        let mut seen = HashSet::with_capacity(items.len());
        for &id in items {
            assert!(seen.insert(id), "Duplicate item ID: {id}");
        }

        SessionStart::Started(RankingSession {
            ordered: vec![items[0]],
            pending: items[2..].iter().copied().collect(),
            candidate: items[1],
            low_bound: 0,
            high_bound: 0,
            mode: Mode::Full,
        })
    }

    /// Insert `new_items` into a previously completed ranking.
    ///
    /// `existing_order` is trusted as-is (it was produced by a completed
    /// session or equivalent) and its members are never re-compared against
    /// each other. Only the new items get searched in, so their placement
    /// can never reorder the existing ones. With no existing order this
    /// degenerates to `begin_full(new_items)`.
    ///
    /// Panics when a new item is already in the ranking or appears twice in
    /// `new_items`.
    pub fn begin_partial(existing_order: &[ItemId], new_items: &[ItemId]) -> SessionStart {
        if new_items.is_empty() {
            return SessionStart::NotEnoughItems;
        }
        if existing_order.is_empty() {
            return Self::begin_full(new_items);
        }

        let mut seen: HashSet<ItemId> = existing_order.iter().copied().collect();
        for &id in new_items {
            assert!(
                seen.insert(id),
                "New item ID {id} duplicates an item already in the ranking"
            );
        }

        SessionStart::Started(RankingSession {
            ordered: existing_order.to_vec(),
            pending: new_items[1..].iter().copied().collect(),
            candidate: new_items[0],
            low_bound: 0,
            high_bound: existing_order.len() - 1,
            mode: Mode::Partial,
        })
    }

    /// Consume one answer and advance the sort.
    ///
    /// `candidate_preferred` means the judge ranked the candidate above the
    /// reference item from `comparison_pair()`, placing it strictly before
    /// that item; `false` places it strictly after. There is no tie answer:
    /// equally-liked items end up in whichever order the answers put them.
    pub fn apply_comparison(mut self, candidate_preferred: bool) -> StepOutcome {
        let mid = (self.low_bound + self.high_bound) / 2;

        if candidate_preferred {
            // Candidate ranks before ordered[mid]: search the left half.
            if mid == self.low_bound {
                // Window exhausted — the candidate sits right at low_bound.
                return self.place_candidate(mid);
            }
            self.high_bound = mid - 1;
        } else {
            // Candidate ranks after ordered[mid]: search the right half.
            if mid == self.high_bound {
                return self.place_candidate(mid + 1);
            }
            self.low_bound = mid + 1;
        }

        StepOutcome::Active(self)
    }

    /// Insert the candidate at its determined index, then either move on to
    /// the next pending item or finish.
    ///
    /// This is the only place `ordered` ever grows. On completion the
    /// returned ranking already contains the candidate — the one-item-lost
    /// or one-item-doubled class of bug lives and dies here.
    fn place_candidate(mut self, index: usize) -> StepOutcome {
        self.ordered.insert(index, self.candidate);

        match self.pending.pop_front() {
            None => StepOutcome::Complete(self.ordered),
            Some(next) => {
                self.candidate = next;
                self.low_bound = 0;
                self.high_bound = self.ordered.len() - 1;
                StepOutcome::Active(self)
            }
        }
    }

    /// The question to ask next: candidate vs. the midpoint of the current
    /// window. Recomputed from the live bounds on every call, never cached.
    pub fn comparison_pair(&self) -> ComparisonPair {
        let mid = (self.low_bound + self.high_bound) / 2;
        ComparisonPair {
            candidate: self.candidate,
            reference: self.ordered[mid],
        }
    }

    /// Progress through the session, counting the in-flight candidate as
    /// processed.
    ///
    /// `total_items` is the fixed item count for the whole session; it is
    /// the caller's to supply because it never changes across transitions.
    /// Panics when it disagrees with what the session actually holds.
    pub fn progress(&self, total_items: usize) -> Progress {
        let held = self.ordered.len() + 1 + self.pending.len();
        assert!(
            total_items == held,
            "total_items {total_items} does not match the session's {held} items"
        );

        let processed = self.ordered.len() + 1;
        let percent = (processed as f64 / total_items as f64 * 100.0).round() as u8;
        Progress {
            processed,
            total: total_items,
            percent,
        }
    }

    /// Items whose relative order is already determined, most preferred
    /// first.
    pub fn ordered(&self) -> &[ItemId] {
        &self.ordered
    }

    /// The item currently being searched into position.
    pub fn candidate(&self) -> ItemId {
        self.candidate
    }

    /// Items still queued behind the candidate.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The inclusive `ordered`-index window the search has narrowed to.
    pub fn window(&self) -> (usize, usize) {
        (self.low_bound, self.high_bound)
    }

    /// Whether this session started from scratch or merges into an existing
    /// order.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}
