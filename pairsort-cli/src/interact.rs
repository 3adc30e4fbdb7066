/// The interactive judge: one question at a time on stderr, answers from a
/// terminal.
///
/// Questions and prompts go to stderr so stdout stays clean for `--json` and
/// piped output. When the item list itself was piped in, stdin is already
/// consumed, so answers are read from /dev/tty instead. Which side of the
/// question each item lands on is decided by coin flip — a fixed slot would
/// leak which item is the new one and bias the judge.
use pairsort_core::{max_comparisons_partial, ItemId, RankingSession, StepOutcome};
use rand::Rng;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};

use crate::bail;

/// How an interactive run ended.
pub enum JudgeVerdict {
    /// Every item placed; `ranking` is the complete final order.
    Finished { ranking: Vec<ItemId>, answered: usize },
    /// The user quit (or input hit EOF); the live session comes back so the
    /// caller can save it.
    Suspended { session: RankingSession, answered: usize },
}

/// One decoded keypress worth of judge input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    First,
    Second,
    Undo,
    Quit,
}

/// Where answers come from: stdin when it is a terminal, /dev/tty otherwise.
enum AnswerSource {
    Stdin(io::Stdin),
    Tty(BufReader<File>),
}

impl AnswerSource {
    fn open() -> AnswerSource {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return AnswerSource::Stdin(stdin);
        }
        match File::open("/dev/tty") {
            Ok(tty) => AnswerSource::Tty(BufReader::new(tty)),
            Err(e) => bail(format!(
                "Stdin is not a terminal and /dev/tty is unavailable ({e}). \
                 Answering questions needs a terminal."
            )),
        }
    }

    /// Read one line; None on EOF.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let bytes = match self {
            AnswerSource::Stdin(stdin) => stdin.read_line(&mut line),
            AnswerSource::Tty(tty) => tty.read_line(&mut line),
        }
        .unwrap_or_else(|e| bail(format!("Failed to read answer: {e}")));

        if bytes == 0 {
            None
        } else {
            Some(line)
        }
    }
}

/// Decode one line of input. None means re-prompt.
fn decode_answer(line: &str) -> Option<Answer> {
    match line.trim() {
        "1" => Some(Answer::First),
        "2" => Some(Answer::Second),
        "u" | "U" => Some(Answer::Undo),
        "q" | "Q" => Some(Answer::Quit),
        _ => None,
    }
}

/// Worst-case questions left from the current state: finish the candidate's
/// window, then insert every pending item into an ever-longer order.
fn remaining_budget(session: &RankingSession) -> usize {
    let (low, high) = session.window();
    let window_width = high - low + 1;
    max_comparisons_partial(window_width, 1)
        + max_comparisons_partial(session.ordered().len() + 1, session.pending_len())
}

/// Drive a session interactively until it completes or the user quits.
///
/// `answered_so_far` carries the count across resumes. Undo steps back one
/// answer by restoring the previous session value; it only reaches back to
/// the start of this sitting, since earlier values died with the process
/// that held them.
pub fn run_session(
    session: RankingSession,
    names: &[String],
    criterion: &str,
    answered_so_far: usize,
) -> JudgeVerdict {
    let mut source = AnswerSource::open();
    let mut rng = rand::rng();
    let total_items = names.len();

    let mut live = session;
    let mut answered = answered_so_far;
    let mut history: Vec<RankingSession> = Vec::new();

    loop {
        let pair = live.comparison_pair();
        let progress = live.progress(total_items);
        let remaining = remaining_budget(&live);

        let candidate_first: bool = rng.random();
        let (first, second) = if candidate_first {
            (pair.candidate, pair.reference)
        } else {
            (pair.reference, pair.candidate)
        };

        eprintln!();
        eprintln!("{criterion}");
        eprintln!();
        eprintln!("  [1] {}", names[first as usize]);
        eprintln!("  [2] {}", names[second as usize]);
        eprintln!();
        eprintln!(
            "Progress: {}/{} items ({}%) | answered: {} | at most {} questions left",
            progress.processed, progress.total, progress.percent, answered, remaining,
        );
        eprint!("Answer 1 or 2 (u = undo, q = save and quit): ");

        let answer = loop {
            let Some(line) = source.read_line() else {
                break Answer::Quit;
            };
            match decode_answer(&line) {
                Some(answer) => break answer,
                None => eprint!("Please answer 1, 2, u, or q: "),
            }
        };

        match answer {
            Answer::First | Answer::Second => {
                let picked_first = answer == Answer::First;
                let candidate_preferred = picked_first == candidate_first;

                history.push(live.clone());
                answered += 1;

                match live.apply_comparison(candidate_preferred) {
                    StepOutcome::Active(next) => live = next,
                    StepOutcome::Complete(ranking) => {
                        return JudgeVerdict::Finished { ranking, answered };
                    }
                }
            }
            Answer::Undo => match history.pop() {
                Some(previous) => {
                    live = previous;
                    answered -= 1;
                }
                None => eprintln!("Nothing to undo in this sitting."),
            },
            Answer::Quit => return JudgeVerdict::Suspended { session: live, answered },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairsort_core::{max_comparisons_full, SessionStart};

    fn started(start: SessionStart) -> RankingSession {
        match start {
            SessionStart::Started(session) => session,
            SessionStart::NotEnoughItems => panic!("expected a started session"),
        }
    }

    fn active(outcome: StepOutcome) -> RankingSession {
        match outcome {
            StepOutcome::Active(session) => session,
            StepOutcome::Complete(_) => panic!("expected the session to stay active"),
        }
    }

    #[test]
    fn test_decode_answer_keys() {
        assert_eq!(decode_answer("1\n"), Some(Answer::First));
        assert_eq!(decode_answer(" 2 \n"), Some(Answer::Second));
        assert_eq!(decode_answer("u\n"), Some(Answer::Undo));
        assert_eq!(decode_answer("U\n"), Some(Answer::Undo));
        assert_eq!(decode_answer("q\n"), Some(Answer::Quit));
        assert_eq!(decode_answer("Q\n"), Some(Answer::Quit));
        assert_eq!(decode_answer("\n"), None);
        assert_eq!(decode_answer("x\n"), None);
        assert_eq!(decode_answer("12\n"), None);
    }

    #[test]
    fn test_remaining_budget_starts_at_the_full_worst_case() {
        for n in [2_i64, 3, 5, 8] {
            let ids: Vec<i64> = (0..n).collect();
            let session = started(RankingSession::begin_full(&ids));
            assert_eq!(
                remaining_budget(&session),
                max_comparisons_full(n as usize),
                "n={n}"
            );
        }
    }

    #[test]
    fn test_remaining_budget_shrinks_as_answers_land() {
        let session = started(RankingSession::begin_full(&[0, 1, 2]));
        assert_eq!(remaining_budget(&session), 3);

        // First answer places the candidate; two items ordered, one searching.
        let session = active(session.apply_comparison(true));
        assert_eq!(remaining_budget(&session), 2);

        // Window narrowed to a single slot: one question left.
        let session = active(session.apply_comparison(false));
        assert_eq!(remaining_budget(&session), 1);
    }
}
