use std::{collections::HashSet, time::Duration};

use anyhow::{ensure, Result};
use log::{debug, info};
use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};

use crate::apple::Apple;
use crate::config::Rules;
use crate::geometry::{Bounds, Point};
use crate::snake::{Direction::{self, *}, Snake};

const INITIAL_SNAKE: [(i32, i32); 4] = [(1, 3), (2, 3), (3, 3), (4, 3)];
const INITIAL_DIRECTION: Direction = Down;
const INITIAL_APPLE: Point = Point::new(20, 20);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    /// The snake covers every free cell, so no apple can be placed.
    BoardFull,
}

/// What a single step did, in the order it happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Moved { new_head: Point, old_head: Point, old_tail: Option<Point> },
    AppleEaten { eaten: Point, respawned: Option<Point>, score: u32 },
    GameOver(GameOverReason),
}

/// Outcome of checking a prospective head position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Clear,
    Eat,
    Crash(GameOverReason),
}

pub struct Game<R = ThreadRng> {
    bounds: Bounds,
    snake: Snake,
    apple: Apple,
    score: u32,
    speed: f64,
    rules: Rules,
    over: Option<GameOverReason>,
    rng: R,
}

impl Game<ThreadRng> {
    pub fn new(bounds: Bounds) -> Result<Self> {
        Game::with_rng(bounds, Rules::default(), rand::thread_rng())
    }
}

impl<R> Game<R> {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Point {
        self.apple.position()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds between automatic moves.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.speed)
    }

    pub fn is_over(&self) -> bool {
        self.over.is_some()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.over
    }
}

impl<R: Rng> Game<R> {
    /// Standard opening: a short snake in the top-left corner heading down.
    pub fn with_rng(bounds: Bounds, rules: Rules, rng: R) -> Result<Self> {
        let opening = INITIAL_SNAKE.iter().map(|&p| Point::from(p));
        let snake = Snake::new(opening, INITIAL_DIRECTION)?;
        let first_step = snake.head() + INITIAL_DIRECTION.vector();

        ensure!(
            snake.body().iter().chain(Some(&first_step)).all(|p| !bounds.is_wall(*p)),
            "terminal of {}x{} is too small to play in",
            bounds.width(),
            bounds.height()
        );

        let mut game = Game::from_parts(bounds, snake, INITIAL_APPLE, rules, rng);
        if bounds.is_wall(INITIAL_APPLE) || game.snake.contains(INITIAL_APPLE) {
            game.spawn_apple();
        }

        Ok(game)
    }

    /// Builds a game from an arbitrary position. The caller is responsible for
    /// handing in a snake that fits inside `bounds`.
    pub fn from_parts(bounds: Bounds, snake: Snake, apple: Point, rules: Rules, rng: R) -> Self {
        Game {
            bounds,
            snake,
            apple: Apple::new(apple),
            score: 0,
            speed: rules.initial_speed,
            rules,
            over: None,
            rng,
        }
    }

    /// Keyboard turn. Turning onto the current heading or straight back is
    /// ignored; any other turn moves the snake right away.
    pub fn steer(&mut self, direction: Direction) -> Vec<Event> {
        let current = self.snake.direction();
        if self.is_over() || direction == current || direction.is_opposite(current) {
            return vec![];
        }

        self.step(Some(direction))
    }

    /// Advances the snake one cell. `None` keeps the current heading, as does
    /// a turn straight back onto itself.
    pub fn step(&mut self, turn: Option<Direction>) -> Vec<Event> {
        if self.is_over() {
            return vec![];
        }

        let current = self.snake.direction();
        let direction = match turn {
            Some(d) if !d.is_opposite(current) => d,
            _ => current,
        };

        let old_head = self.snake.head();
        let new_head = old_head + direction.vector();
        let mut events = Vec::with_capacity(3);

        match self.validate(new_head) {
            Verdict::Crash(reason) => {
                info!("game over at {:?}: {:?}, score {}", new_head, reason, self.score);
                self.over = Some(reason);
                events.push(Event::GameOver(reason));
            }
            Verdict::Clear => {
                let old_tail = self.snake.slide(new_head, false);
                self.snake.set_direction(direction);
                events.push(Event::Moved { new_head, old_head, old_tail });
            }
            Verdict::Eat => {
                let old_tail = self.snake.slide(new_head, true);
                self.snake.set_direction(direction);
                events.push(Event::Moved { new_head, old_head, old_tail });

                self.score += 1;
                self.speed = (self.speed * self.rules.speed_factor).max(self.rules.min_speed);
                let respawned = self.spawn_apple();
                debug!(
                    "apple eaten at {:?}, score {}, speed {:.3}s",
                    new_head, self.score, self.speed
                );
                events.push(Event::AppleEaten { eaten: new_head, respawned, score: self.score });

                if respawned.is_none() {
                    info!("board full, final score {}", self.score);
                    self.over = Some(GameOverReason::BoardFull);
                    events.push(Event::GameOver(GameOverReason::BoardFull));
                }
            }
        }

        events
    }

    /// Classifies `new_head` without touching any state. Walls win over the
    /// body, the body wins over the apple.
    pub fn validate(&self, new_head: Point) -> Verdict {
        if self.bounds.is_wall(new_head) {
            Verdict::Crash(GameOverReason::HitWall)
        } else if self.snake.hits_body(new_head) {
            Verdict::Crash(GameOverReason::HitSelf)
        } else if new_head == self.apple.position() {
            Verdict::Eat
        } else {
            Verdict::Clear
        }
    }

    /// Moves the apple to a random interior cell the snake does not cover.
    /// Leaves it in place and returns `None` when there is no such cell.
    pub fn spawn_apple(&mut self) -> Option<Point> {
        let occupied: HashSet<Point> = self.snake.body().iter().copied().collect();
        let choices: Vec<Point> =
            self.bounds.interior().filter(|p| !occupied.contains(p)).collect();
        let spot = choices.choose(&mut self.rng).copied()?;

        self.apple.relocate(spot);
        Some(spot)
    }
}
