use rand::{rngs::StdRng, Rng, SeedableRng};

use term_snake::config::Rules;
use term_snake::game::Verdict;
use term_snake::{Bounds, Direction, Event, Game, GameOverReason, Point, Snake};

fn points(cells: &[(i32, i32)]) -> Vec<Point> {
    cells.iter().map(|&p| Point::from(p)).collect()
}

fn game_with(
    width: u16,
    height: u16,
    body: &[(i32, i32)],
    direction: Direction,
    apple: (i32, i32),
) -> Game<StdRng> {
    Game::from_parts(
        Bounds::new(width, height).unwrap(),
        Snake::new(points(body), direction).unwrap(),
        Point::from(apple),
        Rules::default(),
        StdRng::seed_from_u64(7),
    )
}

fn assert_contiguous(snake: &Snake) {
    let body: Vec<Point> = snake.body().iter().copied().collect();
    for pair in body.windows(2) {
        let step = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
        assert_eq!(step, 1, "segments {:?} and {:?} are not adjacent", pair[0], pair[1]);
    }
}

#[test]
fn first_auto_move_slides_the_opening_snake_down() {
    let bounds = Bounds::new(44, 44).unwrap();
    let mut game = Game::with_rng(bounds, Rules::default(), StdRng::seed_from_u64(1)).unwrap();

    assert_eq!(
        game.snake().body().iter().copied().collect::<Vec<_>>(),
        points(&[(1, 3), (2, 3), (3, 3), (4, 3)])
    );
    assert_eq!(game.apple(), Point::new(20, 20));

    let events = game.step(None);

    assert_eq!(
        events,
        vec![Event::Moved {
            new_head: Point::new(5, 3),
            old_head: Point::new(4, 3),
            old_tail: Some(Point::new(1, 3)),
        }]
    );
    assert_eq!(game.snake().head(), Point::new(5, 3));
    assert_eq!(game.snake().tail(), Point::new(2, 3));
    assert_eq!(game.snake().len(), 4);
    assert!(!game.is_over());
}

#[test]
fn turning_back_is_rejected() {
    let mut game = game_with(10, 10, &[(1, 1)], Direction::Right, (5, 5));

    assert!(game.steer(Direction::Left).is_empty());
    assert_eq!(game.snake().direction(), Direction::Right);
    assert_eq!(game.snake().head(), Point::new(1, 1));

    // Through the timer path the heading is kept and the snake carries on.
    game.step(Some(Direction::Left));
    assert_eq!(game.snake().direction(), Direction::Right);
    assert_eq!(game.snake().head(), Point::new(1, 2));
}

#[test]
fn steering_onto_current_heading_does_nothing() {
    let mut game = game_with(10, 10, &[(1, 3), (2, 3)], Direction::Down, (5, 5));

    assert!(game.steer(Direction::Down).is_empty());
    assert_eq!(game.snake().head(), Point::new(2, 3));
}

#[test]
fn steering_moves_immediately() {
    let mut game = game_with(10, 10, &[(1, 3), (2, 3)], Direction::Down, (5, 5));

    let events = game.steer(Direction::Right);

    assert_eq!(events.len(), 1);
    assert_eq!(game.snake().head(), Point::new(2, 4));
    assert_eq!(game.snake().direction(), Direction::Right);
}

#[test]
fn hitting_a_wall_ends_the_game_without_moving() {
    let mut game = game_with(10, 10, &[(2, 3), (1, 3)], Direction::Up, (5, 5));

    let events = game.step(None);

    assert_eq!(events, vec![Event::GameOver(GameOverReason::HitWall)]);
    assert!(game.is_over());
    assert_eq!(game.snake().body().iter().copied().collect::<Vec<_>>(), points(&[(2, 3), (1, 3)]));

    assert!(game.step(None).is_empty());
    assert!(game.steer(Direction::Left).is_empty());
    assert_eq!(game.snake().head(), Point::new(1, 3));
}

#[test]
fn every_wall_is_deadly() {
    let (width, height): (u16, u16) = (8, 6);
    let starts = [
        (Direction::Up, (1, 3)),
        (Direction::Down, (height as i32 - 2, 3)),
        (Direction::Left, (2, 1)),
        (Direction::Right, (2, width as i32 - 2)),
    ];

    for &(direction, head) in starts.iter() {
        let mut game = game_with(width, height, &[head], direction, (3, 3));
        game.step(None);
        assert_eq!(
            game.game_over_reason(),
            Some(GameOverReason::HitWall),
            "moving {:?}",
            direction
        );
    }
}

#[test]
fn running_into_the_body_ends_the_game() {
    let body = [(4, 2), (3, 2), (3, 3), (2, 3), (2, 2)];
    let mut game = game_with(10, 10, &body, Direction::Left, (7, 7));

    let events = game.steer(Direction::Down);

    assert_eq!(events, vec![Event::GameOver(GameOverReason::HitSelf)]);
    assert_eq!(game.snake().len(), body.len());
}

#[test]
fn the_current_tail_counts_as_body() {
    let mut game = game_with(10, 10, &[(2, 2), (2, 3), (3, 3), (3, 2)], Direction::Left, (7, 7));

    game.steer(Direction::Up);

    assert_eq!(game.game_over_reason(), Some(GameOverReason::HitSelf));
}

#[test]
fn eating_grows_scores_and_speeds_up() {
    let mut game = game_with(10, 10, &[(1, 3), (2, 3)], Direction::Down, (3, 3));

    let events = game.step(None);

    assert_eq!(game.score(), 1);
    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.snake().tail(), Point::new(1, 3));
    assert_eq!(game.snake().head(), Point::new(3, 3));
    assert!((game.speed() - 0.45).abs() < 1e-9);

    let apple = game.apple();
    assert_ne!(apple, Point::new(3, 3));
    assert!(!game.snake().contains(apple));
    assert!(!game.bounds().is_wall(apple));

    assert_eq!(
        events,
        vec![
            Event::Moved { new_head: Point::new(3, 3), old_head: Point::new(2, 3), old_tail: None },
            Event::AppleEaten { eaten: Point::new(3, 3), respawned: Some(apple), score: 1 },
        ]
    );
}

#[test]
fn speed_never_drops_below_the_floor() {
    let rules = Rules { initial_speed: 0.055, ..Rules::default() };
    let mut game = Game::from_parts(
        Bounds::new(10, 10).unwrap(),
        Snake::new(points(&[(1, 3)]), Direction::Down).unwrap(),
        Point::new(2, 3),
        rules,
        StdRng::seed_from_u64(3),
    );

    game.step(None);

    assert_eq!(game.score(), 1);
    assert!((game.speed() - 0.05).abs() < 1e-9);
}

#[test]
fn filling_the_board_ends_the_game() {
    // A 4x3 grid has two playable cells.
    let mut game = game_with(4, 3, &[(1, 1)], Direction::Right, (1, 2));

    let events = game.step(None);

    assert_eq!(game.score(), 1);
    assert_eq!(game.game_over_reason(), Some(GameOverReason::BoardFull));
    assert_eq!(events.last(), Some(&Event::GameOver(GameOverReason::BoardFull)));
}

#[test]
fn apples_spawn_inside_and_off_the_snake() {
    let body = [(1, 1), (1, 2), (1, 3), (1, 4), (2, 4), (2, 3), (2, 2), (2, 1)];
    let mut game = game_with(6, 5, &body, Direction::Left, (3, 3));

    for _ in 0..200 {
        let apple = game.spawn_apple().unwrap();
        assert!(!game.bounds().is_wall(apple));
        assert!(!game.snake().contains(apple));
        assert_eq!(game.apple(), apple);
    }
}

#[test]
fn walls_beat_body_and_body_beats_apple() {
    let game = game_with(10, 10, &[(1, 1), (1, 2), (2, 2), (2, 1)], Direction::Left, (1, 1));

    assert_eq!(game.validate(Point::new(2, 0)), Verdict::Crash(GameOverReason::HitWall));
    assert_eq!(game.validate(Point::new(1, 1)), Verdict::Crash(GameOverReason::HitSelf));
    assert_eq!(game.validate(Point::new(3, 1)), Verdict::Clear);
}

#[test]
fn opening_apple_moves_when_off_grid() {
    let bounds = Bounds::new(30, 10).unwrap();
    let game = Game::with_rng(bounds, Rules::default(), StdRng::seed_from_u64(5)).unwrap();

    assert!(!bounds.is_wall(game.apple()));
    assert!(!game.snake().contains(game.apple()));
}

#[test]
fn tiny_terminal_is_refused() {
    let bounds = Bounds::new(5, 5).unwrap();
    assert!(Game::with_rng(bounds, Rules::default(), StdRng::seed_from_u64(5)).is_err());
}

#[test]
fn random_play_keeps_the_body_intact() {
    let mut rng = StdRng::seed_from_u64(42);

    for seed in 0..20 {
        let bounds = Bounds::new(16, 12).unwrap();
        let mut game =
            Game::with_rng(bounds, Rules::default(), StdRng::seed_from_u64(seed)).unwrap();

        while !game.is_over() {
            let before = game.snake().len();
            let turn = Direction::ALL[rng.gen_range(0..4)];
            let events = game.step(Some(turn));

            if game.is_over() && !matches!(events.first(), Some(Event::Moved { .. })) {
                assert_eq!(game.snake().len(), before);
                break;
            }

            let grew = events.iter().any(|e| matches!(e, Event::AppleEaten { .. }));
            assert_eq!(game.snake().len(), if grew { before + 1 } else { before });
            assert_contiguous(game.snake());
        }
    }
}
