/// pairsort-core: Interactive binary-insertion ranking engine.
///
/// One question at a time: the engine tells you which two items to compare,
/// you answer which one ranks higher, and it binary-searches each item into
/// place. No IO, no clock, no randomness — just the state machine. Bring
/// your own judge.
///
/// Items are identified by caller-provided `i64` IDs. The engine never looks
/// at item content, so callers keep names, paths, or whole records on their
/// side and rank by ID.
///
/// Sessions are plain values: `apply_comparison` consumes the session and
/// returns the next state, and with the `serde` feature enabled a session
/// serializes whole for save-and-resume.
///
/// # Quick start
///
/// ```rust
/// use pairsort_core::{RankingSession, SessionStart, StepOutcome};
///
/// let items = vec![100, 200, 300]; // your IDs — any i64 values
///
/// let mut session = match RankingSession::begin_full(&items) {
///     SessionStart::Started(session) => session,
///     SessionStart::NotEnoughItems => return,
/// };
///
/// let ranking = loop {
///     let pair = session.comparison_pair();
///     // Your judge goes here; this one prefers the smaller ID.
///     let candidate_preferred = pair.candidate < pair.reference;
///     match session.apply_comparison(candidate_preferred) {
///         StepOutcome::Active(next) => session = next,
///         StepOutcome::Complete(ranking) => break ranking,
///     }
/// };
///
/// assert_eq!(ranking, vec![100, 200, 300]);
/// ```

pub mod estimate;
pub mod session;
pub mod types;

// Re-export primary public API at crate root.
pub use estimate::{max_comparisons_full, max_comparisons_partial};
pub use session::{RankingSession, SessionStart, StepOutcome};
pub use types::{ComparisonPair, ItemId, Mode, Progress};
