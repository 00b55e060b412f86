//! Invariants that must hold for any input sequence

use brick_breaker::Config;
use brick_breaker::sim::{GamePhase, GameState, TickInput, tick};
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), prop::bool::weighted(0.2)).prop_map(|(left, right, launch)| {
        TickInput {
            left,
            right,
            launch,
            ..Default::default()
        }
    })
}

fn started(seed: u64) -> GameState {
    let mut state = GameState::new(Config::default(), seed);
    state.start();
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn speed_and_velocity_stay_consistent(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..1500),
    ) {
        let mut state = started(seed);
        let ball_cfg = state.config().ball.clone();
        for input in &inputs {
            tick(&mut state, input);
            let ball = &state.ball;
            prop_assert!(ball.speed >= ball_cfg.initial_speed - 1e-5);
            prop_assert!(ball.speed <= ball_cfg.max_speed + 1e-5);
            if ball.launched {
                prop_assert!((ball.vel.length() - ball.speed).abs() < 1e-3,
                    "|vel| = {} but speed = {}", ball.vel.length(), ball.speed);
            }
            prop_assert!(ball.trail.len() <= ball_cfg.trail_length);
        }
    }

    #[test]
    fn paddle_stays_on_screen(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..800),
    ) {
        let mut state = started(seed);
        let half = state.config().paddle.width / 2.0;
        let width = state.config().screen.width;
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!(state.paddle.x >= half);
            prop_assert!(state.paddle.x <= width - half);
        }
    }

    #[test]
    fn bricks_and_lives_never_come_back(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..1500),
    ) {
        let mut state = started(seed);
        let mut alive = state.alive_bricks();
        let mut lives = state.lives;
        let mut score = state.score;
        for input in &inputs {
            tick(&mut state, input);
            let now_alive = state.alive_bricks();
            prop_assert!(now_alive <= alive);
            prop_assert!(state.lives <= lives);
            prop_assert!(state.score >= score);
            prop_assert_eq!(state.phase == GamePhase::Win, now_alive == 0);
            prop_assert_eq!(state.phase == GamePhase::GameOver, state.lives == 0);
            alive = now_alive;
            lives = state.lives;
            score = state.score;
        }
    }

    #[test]
    fn restart_always_yields_fresh_round(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 0..600),
        terminal in prop::bool::ANY,
    ) {
        let mut state = started(seed);
        for input in &inputs {
            tick(&mut state, input);
        }
        state.phase = if terminal { GamePhase::Win } else { GamePhase::GameOver };

        tick(&mut state, &TickInput { restart: true, ..Default::default() });

        prop_assert_eq!(state.phase, GamePhase::Playing);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.lives, 3);
        prop_assert_eq!(state.alive_bricks(), state.bricks.len());
        prop_assert!(!state.ball.launched);
        prop_assert!(state.particles.is_empty());
    }
}
