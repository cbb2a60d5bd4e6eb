use std::time::{Duration, Instant};

use anyhow::Result;
use log::info;
use rand::{rngs::ThreadRng, Rng};

use crate::controls::Command;
use crate::game::{Event, Game, GameOverReason};
use crate::render::{repaint, score_text, Frame};
use crate::term::Terminal;

/// Upper bound on how long one loop pass waits for input, so the move timer
/// is checked often.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit { score: u32 },
    GameOver { score: u32, reason: GameOverReason },
}

pub struct App<T, R = ThreadRng> {
    term: T,
    game: Game<R>,
}

impl<T: Terminal, R: Rng> App<T, R> {
    pub fn new(term: T, game: Game<R>) -> Self {
        App { term, game }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn terminal(&self) -> &T {
        &self.term
    }

    /// Plays until the player quits or the game ends. After a game over the
    /// final score stays on screen until any key is pressed.
    pub fn run(&mut self) -> Result<Outcome> {
        let bounds = self.game.bounds();
        info!("starting game on a {}x{} grid", bounds.width(), bounds.height());

        self.term.draw_frame(&Frame::capture(&self.game))?;
        let mut last_move = Instant::now();

        let reason = loop {
            if let Some(reason) = self.game.game_over_reason() {
                break reason;
            }

            if last_move.elapsed() >= self.game.tick_interval() {
                let events = self.game.step(None);
                self.present(&events)?;
                last_move = Instant::now();

                // A crash outranks any key already waiting.
                if self.game.is_over() {
                    continue;
                }
            }

            let key = match self.term.poll_key(POLL_INTERVAL)? {
                Some(key) => key,
                None => continue,
            };

            match Command::from_key(key) {
                Some(Command::Quit) => {
                    info!("quit with score {}", self.game.score());
                    return Ok(Outcome::Quit { score: self.game.score() });
                }
                Some(Command::Steer(direction)) => {
                    let events = self.game.steer(direction);
                    self.present(&events)?;
                }
                None => {}
            }
        };

        let score = self.game.score();
        let headline = match reason {
            GameOverReason::BoardFull => "You won!",
            _ => "Game over!",
        };
        let score_line = score_text(score);
        self.term.show_message(&[headline, score_line.as_str(), "", "Press any key to exit"])?;
        self.term.wait_key()?;

        Ok(Outcome::GameOver { score, reason })
    }

    ///////////////////////////////////////////////////////////////////////////

    fn present(&mut self, events: &[Event]) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }

        let patches = repaint(events, self.game.bounds());
        self.term.paint(&patches)
    }
}
