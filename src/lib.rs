//! Terminal snake: rules, rendering model and a crossterm front end.

pub mod app;
pub mod apple;
pub mod config;
pub mod controls;
pub mod game;
pub mod geometry;
pub mod render;
pub mod snake;
pub mod term;

pub use app::{App, Outcome};
pub use game::{Event, Game, GameOverReason};
pub use geometry::{Bounds, Point};
pub use snake::{Direction, Snake};
