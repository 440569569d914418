/// Answer sources for a ranking session, and the loop that drives one.
///
/// The core only asks "which of these two?". A `Judge` answers: the terminal
/// judge asks a human, the simulation uses an oracle.
use duelrank_core::{Duel, RankingSession, Step};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::parse::{Answer, Keybinds, parse_answer};
use crate::prompt::build_prompt;

/// Something that can answer one comparison.
pub trait Judge<T> {
    /// `Ok(Some(prefer_challengee))` for an answer, `Ok(None)` to abandon the
    /// session. `Err` only for failures reading the answer.
    fn judge(&mut self, duel: &Duel<'_, T>) -> Result<Option<bool>, String>;
}

/// How a driven session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Every item was placed. Best first.
    Completed(Vec<T>),
    /// The judge stopped answering. Holds what was ranked so far.
    Abandoned { ranked: Vec<T>, total: usize },
}

/// Ask `judge` until the session completes or the judge gives up.
///
/// The session is borrowed so callers can read its counters afterwards.
pub fn run_session<T: Clone, J: Judge<T>>(
    session: &mut RankingSession<T>,
    judge: &mut J,
) -> Result<Outcome<T>, String> {
    while !session.is_complete() {
        let duel = session.duel().map_err(|e| e.to_string())?;
        let Some(prefer_challengee) = judge.judge(&duel)? else {
            debug!(ranked = session.ranked().len(), "judge abandoned session");
            return Ok(Outcome::Abandoned {
                ranked: session.ranked().to_vec(),
                total: session.source_len(),
            });
        };

        match session.decide(prefer_challengee).map_err(|e| e.to_string())? {
            Step::Descended { .. } => {}
            Step::Inserted { position } | Step::Complete { position } => {
                debug!(position, ranked = session.ranked().len(), "placed item");
            }
        }
    }

    Ok(Outcome::Completed(session.ranked().to_vec()))
}

/// Asks a human on a line-based terminal.
pub struct TerminalJudge<R, W> {
    input: R,
    output: W,
    keys: Keybinds,
    show_bar: bool,
}

impl<R: BufRead, W: Write> TerminalJudge<R, W> {
    pub fn new(input: R, output: W, keys: Keybinds, show_bar: bool) -> Self {
        TerminalJudge { input, output, keys, show_bar }
    }

    fn read_line(&mut self) -> Result<Option<String>, String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read answer: {e}"))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<T: AsRef<str>, R: BufRead, W: Write> Judge<T> for TerminalJudge<R, W> {
    /// Re-prompts on unrecognised input until a valid answer arrives.
    /// End of input counts as quitting.
    fn judge(&mut self, duel: &Duel<'_, T>) -> Result<Option<bool>, String> {
        let prompt = build_prompt(
            duel.challenger.as_ref(),
            duel.challengee.as_ref(),
            &duel.progress,
            &self.keys,
            self.show_bar,
        );

        loop {
            write!(self.output, "{prompt}")
                .and_then(|_| self.output.flush())
                .map_err(|e| format!("Failed to write prompt: {e}"))?;

            let Some(line) = self.read_line()? else {
                warn!("input closed before the ranking finished");
                return Ok(None);
            };

            match parse_answer(&line, &self.keys) {
                Some(Answer::Quit) => return Ok(None),
                Some(answer) => return Ok(answer.prefer_challengee()),
                None => {
                    writeln!(
                        self.output,
                        "Please answer {} (left) or {} (right).",
                        self.keys.left, self.keys.right
                    )
                    .map_err(|e| format!("Failed to write prompt: {e}"))?;
                }
            }
        }
    }
}
