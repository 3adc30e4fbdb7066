/// Identifier for an item being ranked.
///
/// Supplied by the caller. Any `i64` values work, as long as each item gets
/// a distinct one. The engine compares identifiers for identity only and
/// never looks at item content.
pub type ItemId = i64;

/// How the session was initialized.
///
/// Informational tag for the caller; the transition algorithm is identical in
/// both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Ranking an entire item set from scratch.
    Full,
    /// Inserting new items into a previously completed ranking.
    Partial,
}

/// The question to put to the judge: does `candidate` rank above `reference`?
///
/// `reference` is the element of the sorted sequence the binary search is
/// currently probing. Recomputed fresh from the session on every call; the
/// pair changes after each answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonPair {
    /// The item currently being placed.
    pub candidate: ItemId,
    /// The already-placed item it is being compared against.
    pub reference: ItemId,
}

/// How far along a session is, in items placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Items whose position is determined or in flight: the placed items plus
    /// the candidate currently being searched in.
    pub processed: usize,
    /// Total items across the whole session, as supplied by the caller.
    pub total: usize,
    /// `processed / total`, rounded to whole percent.
    pub percent: u8,
}
