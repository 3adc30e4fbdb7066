/// Session save files and ranked-list files.
///
/// A save file is the whole engine session value plus the name table and
/// enough context to resume — pretty JSON, written when the user quits
/// mid-session, loaded by `resume`. Ranked-list files are the interchange
/// format `rank --output` writes and `merge --ranked` reads back: either a
/// JSON string array or one item per line.
use pairsort_core::RankingSession;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{bail, parse_items_from_str};

/// Everything needed to pick an interrupted ranking back up.
///
/// `names` maps positionally to the engine's item IDs (ID = index into
/// `names`), so the session's total item count is just `names.len()`.
#[derive(Serialize, Deserialize)]
pub struct SavedSession {
    pub names: Vec<String>,
    pub criterion: String,
    pub answered: usize,
    pub session: RankingSession,
}

/// Write a session save file as pretty JSON.
pub fn save_session(path: &Path, saved: &SavedSession) {
    let json = serde_json::to_string_pretty(saved).unwrap();
    std::fs::write(path, json)
        .unwrap_or_else(|e| bail(format!("Failed to write session to {}: {e}", path.display())));
}

/// Load a session save file written by an earlier run.
pub fn load_session(path: &Path) -> SavedSession {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read session file {}: {e}", path.display())));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| bail(format!("Failed to parse session file {}: {e}", path.display())))
}

/// Read a ranked-list file into names, best first.
///
/// An empty file is allowed; merging into an empty ranking just ranks the
/// new items from scratch.
pub fn load_ranked(path: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read ranked file {}: {e}", path.display())));
    parse_items_from_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairsort_core::{Mode, SessionStart};

    fn three_item_session() -> RankingSession {
        match RankingSession::begin_full(&[0, 1, 2]) {
            SessionStart::Started(session) => session,
            SessionStart::NotEnoughItems => panic!("three items is enough"),
        }
    }

    #[test]
    fn test_save_file_carries_names_and_session() {
        let saved = SavedSession {
            names: vec!["apples".to_string(), "pears".to_string(), "plums".to_string()],
            criterion: "Which do you prefer?".to_string(),
            answered: 0,
            session: three_item_session(),
        };

        let json = serde_json::to_string_pretty(&saved).unwrap();
        let back: SavedSession = serde_json::from_str(&json).unwrap();

        assert_eq!(back.names, saved.names);
        assert_eq!(back.criterion, saved.criterion);
        assert_eq!(back.answered, 0);
        assert_eq!(back.session, saved.session);
    }

    #[test]
    fn test_resume_reads_a_known_save_file() {
        // Pins the on-disk format: a save written today must stay loadable.
        let json = r#"{
            "names": ["apples", "pears", "plums"],
            "criterion": "Which do you prefer?",
            "answered": 1,
            "session": {
                "ordered": [1, 0],
                "pending": [],
                "candidate": 2,
                "low_bound": 0,
                "high_bound": 1,
                "mode": "Full"
            }
        }"#;

        let saved: SavedSession = serde_json::from_str(json).unwrap();
        assert_eq!(saved.names.len(), 3);
        assert_eq!(saved.answered, 1);
        assert_eq!(saved.session.ordered(), &[1, 0]);
        assert_eq!(saved.session.candidate(), 2);
        assert_eq!(saved.session.mode(), Mode::Full);
    }
}
