use anyhow::Result;

use term_snake::config::{self, Theme};
use term_snake::term::TermManager;
use term_snake::{App, Bounds, Game, Outcome};

fn main() -> Result<()> {
    config::init_logging()?;

    // The terminal is handed back when `app` goes out of scope, on every path.
    let outcome = {
        let term = TermManager::open(Theme::default())?;
        let (width, height) = term.size();
        let game = Game::new(Bounds::new(width, height)?)?;

        let mut app = App::new(term, game);
        app.run()?
    };

    match outcome {
        Outcome::GameOver { score, .. } => println!("Game Over! Score: {}", score),
        Outcome::Quit { score } => println!("Score: {}", score),
    }

    Ok(())
}
