use std::mem;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::collision::{Collision, CollisionDetector, Surroundings};
use crate::config::{GameConfig, GameOverAction, SelfCollisionPolicy};
use crate::error::{GameError, SpawnError};
use crate::food::{Food, FoodKind, FoodSpawner, Occupancy, RandomSource, expire_bonus_if_due};
use crate::grid::{Grid, Position};
use crate::input::{Direction, GameInput};
use crate::obstacle::ObstacleSet;
use crate::scene::{PALETTE_CLASSIC, Scene};
use crate::snake::Snake;

/// Direction every new snake starts with.
pub const START_DIRECTION: Direction = Direction::Right;

/// Why the game is paused.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PauseReason {
    /// The head ran into an obstacle; resuming costs the configured penalty.
    Obstacle,
    /// The player asked for a break.
    User,
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused(PauseReason),
    GameOver,
}

/// What ended a game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
    /// The player declined to resume a pause.
    Declined,
    /// The player quit while the game was paused.
    Quit,
}

/// Notable transitions, drained by the driver after each step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    FoodEaten { points: u32, score: u32 },
    BonusSpawned { position: Position, expires_at: Duration },
    BonusExpired,
    FoodRelocated { position: Position },
    Paused(PauseReason),
    Resumed { penalty: u32, score: u32 },
    GameOver { final_score: u32, cause: GameOverCause },
    Reset,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub bonus: Option<Food>,
    pub obstacles: ObstacleSet,
    pub score: u32,
    pub foods_eaten: u32,
    pub tick_count: u64,
    pub status: GameStatus,
}

impl GameState {
    /// Creates a running state with no food placed yet.
    #[must_use]
    pub fn fresh(snake: Snake, obstacles: ObstacleSet) -> Self {
        Self {
            snake,
            food: None,
            bonus: None,
            obstacles,
            score: 0,
            foods_eaten: 0,
            tick_count: 0,
            status: GameStatus::Running,
        }
    }
}

/// Tick-driven controller owning the game state.
#[derive(Debug)]
pub struct Game<R = StdRng> {
    state: GameState,
    config: GameConfig,
    grid: Grid,
    detector: CollisionDetector,
    spawner: FoodSpawner,
    rng: R,
    game_over_at: Option<Duration>,
    /// When the current normal food was placed, once a tick has seen it.
    food_placed_at: Option<Duration>,
    events: Vec<GameEvent>,
}

impl Game<StdRng> {
    /// Creates a game seeded from `config.seed`, or from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> Game<R> {
    /// Creates a game drawing food positions from `rng`.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let grid = config.grid();
        let snake = Snake::new(config.start_tile(), START_DIRECTION);
        let state = GameState::fresh(snake, config.obstacle_set());

        let mut spawner = FoodSpawner::new(config.max_spawn_attempts, config.bonus_rule());
        if let Some(area) = config.spawn_tiles() {
            spawner = spawner.within(area);
        }

        let mut game = Self {
            state,
            grid,
            detector: CollisionDetector::new(config.wall_policy),
            spawner,
            config,
            rng,
            game_over_at: None,
            food_placed_at: None,
            events: Vec::new(),
        };
        game.respawn_food()?;

        info!(
            columns = grid.size().width,
            rows = grid.size().height,
            obstacle_tiles = game.state.obstacles.covered_tiles(),
            wall_policy = ?game.config.wall_policy,
            "game created"
        );
        Ok(game)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted setups.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Returns true once the game is over and the session should not restart.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.status == GameStatus::GameOver
            && self.config.on_game_over == GameOverAction::Exit
    }

    /// Takes the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Builds the draw-list for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::build(
            &self.state,
            self.grid,
            &PALETTE_CLASSIC,
            self.config.obstacle_penalty,
        )
    }

    /// Applies one external input event.
    ///
    /// `Quit` ends a paused game so its score is reported; otherwise it is
    /// left to the driver and the state does not change.
    pub fn apply_input(&mut self, input: GameInput) -> Result<(), GameError> {
        match (input, self.state.status) {
            (GameInput::Direction(direction), GameStatus::Running) => {
                self.state.snake.buffer_direction(direction);
            }
            (GameInput::TogglePause, GameStatus::Running) => {
                self.pause(PauseReason::User);
            }
            (
                GameInput::TogglePause | GameInput::ConfirmResume,
                GameStatus::Paused(PauseReason::User),
            ) => self.resume(0)?,
            (GameInput::ConfirmResume, GameStatus::Paused(PauseReason::Obstacle)) => {
                self.resume(self.config.obstacle_penalty)?;
            }
            (GameInput::DeclineResume, GameStatus::Paused(_)) => {
                self.end_game(GameOverCause::Declined, None);
            }
            (GameInput::Quit, GameStatus::Paused(_)) => {
                self.end_game(GameOverCause::Quit, None);
            }
            _ => {}
        }
        Ok(())
    }

    /// Advances the simulation by one tick at clock reading `now`.
    pub fn tick(&mut self, now: Duration) -> Result<(), GameError> {
        match self.state.status {
            GameStatus::Running => {}
            GameStatus::Paused(_) => return Ok(()),
            GameStatus::GameOver => return self.tick_game_over(now),
        }

        self.state.tick_count += 1;

        if expire_bonus_if_due(&mut self.state.bonus, now) {
            self.events.push(GameEvent::BonusExpired);
        }
        self.relocate_food_if_due(now);

        self.state.snake.apply_buffered_direction();
        let proposed = self.state.snake.next_head();
        let contact = self.detector.classify(
            proposed,
            &Surroundings {
                grid: self.grid,
                obstacles: &self.state.obstacles,
                snake: &self.state.snake,
                food: self.state.food.as_ref(),
                bonus: self.state.bonus.as_ref(),
            },
        );

        match contact.collision {
            Collision::WallFatal => self.end_game(GameOverCause::Wall, Some(now)),
            Collision::SelfFatal => self.self_collision(Some(now))?,
            Collision::ObstaclePause => {
                self.state.snake.move_to(contact.head);
                self.pause(PauseReason::Obstacle);
            }
            Collision::FoodNormal | Collision::FoodBonus => {
                let eaten = if contact.collision == Collision::FoodNormal {
                    self.state.food.take()
                } else {
                    self.state.bonus.take()
                };
                self.state.snake.grow();
                self.state.snake.move_to(contact.head);
                if let Some(food) = eaten {
                    self.eat(food, now)?;
                }
            }
            Collision::None | Collision::WallWrap => {
                self.state.snake.move_to(contact.head);
            }
        }

        Ok(())
    }

    /// Reinitializes snake, score and food. Obstacles stay.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.state = GameState::fresh(
            Snake::new(self.config.start_tile(), START_DIRECTION),
            mem::take(&mut self.state.obstacles),
        );
        self.game_over_at = None;
        self.food_placed_at = None;
        self.respawn_food()?;

        info!("game reset");
        self.events.push(GameEvent::Reset);
        Ok(())
    }

    fn self_collision(&mut self, now: Option<Duration>) -> Result<(), GameError> {
        match self.config.self_collision {
            SelfCollisionPolicy::GameOver => {
                self.end_game(GameOverCause::SelfCollision, now);
                Ok(())
            }
            SelfCollisionPolicy::Reset => {
                self.report_game_over(GameOverCause::SelfCollision);
                self.reset()
            }
        }
    }

    fn eat(&mut self, food: Food, now: Duration) -> Result<(), GameError> {
        let points = food.points();
        self.state.score = self.state.score.saturating_add(points);
        self.state.foods_eaten += 1;
        debug!(points, score = self.state.score, "food eaten");
        self.events.push(GameEvent::FoodEaten {
            points,
            score: self.state.score,
        });

        if food.kind != FoodKind::Normal {
            return Ok(());
        }

        self.respawn_food()?;
        self.food_placed_at = Some(now);

        let reserved: Vec<Position> = self
            .state
            .food
            .iter()
            .map(|placed| placed.position)
            .collect();
        let occupancy = Occupancy {
            grid: self.grid,
            obstacles: &self.state.obstacles,
            snake: &self.state.snake,
            reserved: &reserved,
        };
        let spawned = self.spawner.maybe_spawn_bonus(
            &mut self.rng,
            self.state.score,
            now,
            &occupancy,
            &mut self.state.bonus,
        )?;
        if spawned {
            if let Some(Food {
                position,
                kind: FoodKind::Bonus { expires_at },
            }) = self.state.bonus
            {
                self.events.push(GameEvent::BonusSpawned {
                    position,
                    expires_at,
                });
            }
        }

        Ok(())
    }

    fn respawn_food(&mut self) -> Result<(), GameError> {
        let reserved: Vec<Position> = self
            .state
            .bonus
            .iter()
            .map(|bonus| bonus.position)
            .collect();
        let occupancy = Occupancy {
            grid: self.grid,
            obstacles: &self.state.obstacles,
            snake: &self.state.snake,
            reserved: &reserved,
        };
        let food = self.spawner.spawn_normal(&mut self.rng, &occupancy)?;
        self.state.food = Some(food);
        Ok(())
    }

    /// Moves uneaten normal food once it has sat for the relocation interval.
    fn relocate_food_if_due(&mut self, now: Duration) {
        let Some(interval) = self.config.food_relocate_interval() else {
            return;
        };
        let placed = *self.food_placed_at.get_or_insert(now);
        if now.saturating_sub(placed) < interval {
            return;
        }

        let reserved: Vec<Position> = [self.state.food, self.state.bonus]
            .iter()
            .flatten()
            .map(|food| food.position)
            .collect();
        let occupancy = Occupancy {
            grid: self.grid,
            obstacles: &self.state.obstacles,
            snake: &self.state.snake,
            reserved: &reserved,
        };
        match self.spawner.spawn_normal(&mut self.rng, &occupancy) {
            Ok(food) => {
                debug!(x = food.position.x, y = food.position.y, "food relocated");
                self.state.food = Some(food);
                self.events.push(GameEvent::FoodRelocated {
                    position: food.position,
                });
            }
            // Nowhere else to go; the food stays where it is.
            Err(SpawnError::NoFreeTile { attempts }) => {
                debug!(attempts, "food relocation skipped");
            }
        }
        self.food_placed_at = Some(now);
    }

    fn pause(&mut self, reason: PauseReason) {
        info!(?reason, score = self.state.score, "game paused");
        self.state.status = GameStatus::Paused(reason);
        self.events.push(GameEvent::Paused(reason));
    }

    fn resume(&mut self, penalty: u32) -> Result<(), GameError> {
        self.state.score = self.state.score.saturating_sub(penalty);
        self.state.status = GameStatus::Running;
        info!(penalty, score = self.state.score, "game resumed");
        self.events.push(GameEvent::Resumed {
            penalty,
            score: self.state.score,
        });

        // The obstacle tile the head stopped on was also a body tile.
        if self.state.snake.head_overlaps_body() {
            return self.self_collision(None);
        }
        Ok(())
    }

    fn end_game(&mut self, cause: GameOverCause, now: Option<Duration>) {
        self.state.status = GameStatus::GameOver;
        self.game_over_at = now;
        self.report_game_over(cause);
    }

    fn report_game_over(&mut self, cause: GameOverCause) {
        info!(?cause, score = self.state.score, "game over");
        self.events.push(GameEvent::GameOver {
            final_score: self.state.score,
            cause,
        });
    }

    fn tick_game_over(&mut self, now: Duration) -> Result<(), GameError> {
        if self.config.on_game_over != GameOverAction::Restart {
            return Ok(());
        }

        let since = *self.game_over_at.get_or_insert(now);
        if now.saturating_sub(since) >= self.config.reset_delay() {
            self.reset()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::collision::WallPolicy;
    use crate::config::{BonusConfig, GameConfig, GameOverAction, SelfCollisionPolicy};
    use crate::food::Food;
    use crate::grid::{PixelRect, Position};
    use crate::input::{Direction, GameInput};
    use crate::snake::Snake;

    use super::{Game, GameEvent, GameOverCause, GameStatus, PauseReason};

    fn small_config() -> GameConfig {
        GameConfig {
            width_px: 200,
            height_px: 200,
            tile_size: 20,
            start: Some(Position::new(1, 1)),
            ..GameConfig::default()
        }
    }

    fn game(config: GameConfig) -> Game {
        Game::with_rng(config, StdRng::seed_from_u64(1)).expect("valid config")
    }

    #[test]
    fn snake_grows_in_the_tick_it_eats() {
        let mut game = game(small_config());
        game.state_mut().food = Some(Food::normal(Position::new(2, 1)));

        game.tick(Duration::ZERO).expect("tick");

        let state = game.state();
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.head(), Position::new(2, 1));
        let food = state.food.expect("replacement food");
        assert!(!state.snake.occupies(food.position));
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut game = game(small_config());
        game.state_mut().snake = Snake::new(Position::new(9, 1), Direction::Right);
        game.state_mut().score = 3;

        game.tick(Duration::ZERO).expect("tick");

        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.state().score, 3);
        assert_eq!(game.state().snake.head(), Position::new(9, 1));
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::GameOver {
                final_score: 3,
                cause: GameOverCause::Wall,
            }]
        );
        assert!(game.is_finished());
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut game = game(small_config());
        game.state_mut().snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Left,
        );
        game.state_mut().food = Some(Food::normal(Position::new(8, 8)));
        game.apply_input(GameInput::Direction(Direction::Down)).expect("input");

        game.tick(Duration::ZERO).expect("tick");

        assert_eq!(game.status(), GameStatus::GameOver);
    }

    #[test]
    fn reset_policy_restarts_without_game_over() {
        let mut game = game(GameConfig {
            self_collision: SelfCollisionPolicy::Reset,
            ..small_config()
        });
        game.state_mut().snake = Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
            ],
            Direction::Down,
        );
        game.state_mut().food = Some(Food::normal(Position::new(8, 8)));
        game.state_mut().score = 4;

        game.tick(Duration::ZERO).expect("tick");

        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().snake.len(), 1);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::GameOver {
                    final_score: 4,
                    cause: GameOverCause::SelfCollision,
                },
                GameEvent::Reset,
            ]
        );
    }

    #[test]
    fn wrap_policy_never_ends_the_game_at_edges() {
        let mut game = game(GameConfig {
            wall_policy: WallPolicy::Wrap,
            ..small_config()
        });
        game.state_mut().snake = Snake::new(Position::new(9, 4), Direction::Right);
        game.state_mut().food = Some(Food::normal(Position::new(5, 8)));

        game.tick(Duration::ZERO).expect("tick");
        assert_eq!(game.state().snake.head(), Position::new(0, 4));

        game.apply_input(GameInput::Direction(Direction::Up)).expect("input");
        for _ in 0..6 {
            game.tick(Duration::ZERO).expect("tick");
        }

        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.state().snake.head(), Position::new(0, 8));
    }

    #[test]
    fn obstacle_pause_and_confirm_applies_clamped_penalty() {
        let mut game = game(GameConfig {
            obstacles: vec![PixelRect::new(60, 20, 20, 20)],
            ..small_config()
        });
        game.state_mut().food = Some(Food::normal(Position::new(8, 8)));
        game.state_mut().score = 5;

        game.tick(Duration::ZERO).expect("tick");
        game.tick(Duration::ZERO).expect("tick");

        assert_eq!(game.status(), GameStatus::Paused(PauseReason::Obstacle));
        assert_eq!(game.state().snake.head(), Position::new(3, 1));

        // Neither steering nor ticking resolves the pause.
        game.apply_input(GameInput::Direction(Direction::Down)).expect("input");
        game.apply_input(GameInput::TogglePause).expect("input");
        game.tick(Duration::ZERO).expect("tick");
        assert_eq!(game.status(), GameStatus::Paused(PauseReason::Obstacle));
        assert_eq!(game.state().snake.head(), Position::new(3, 1));

        game.apply_input(GameInput::ConfirmResume).expect("input");

        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn resuming_onto_own_body_ends_the_game() {
        let mut game = game(GameConfig {
            obstacles: vec![PixelRect::new(60, 60, 20, 20)],
            ..small_config()
        });
        game.state_mut().snake = Snake::from_segments(
            vec![
                Position::new(3, 3),
                Position::new(3, 4),
                Position::new(4, 4),
                Position::new(4, 3),
                Position::new(3, 3),
                Position::new(2, 3),
            ],
            Direction::Up,
        );
        game.state_mut().status = GameStatus::Paused(PauseReason::Obstacle);

        game.apply_input(GameInput::ConfirmResume).expect("input");

        assert_eq!(game.status(), GameStatus::GameOver);
        assert!(game.drain_events().contains(&GameEvent::GameOver {
            final_score: 0,
            cause: GameOverCause::SelfCollision,
        }));

        game.tick(Duration::ZERO).expect("tick");
        assert_eq!(game.status(), GameStatus::GameOver);
    }

    #[test]
    fn resuming_onto_own_body_under_reset_policy_starts_over() {
        let mut game = game(GameConfig {
            self_collision: SelfCollisionPolicy::Reset,
            obstacles: vec![PixelRect::new(60, 60, 20, 20)],
            ..small_config()
        });
        game.state_mut().snake = Snake::from_segments(
            vec![
                Position::new(3, 3),
                Position::new(3, 4),
                Position::new(4, 4),
                Position::new(4, 3),
                Position::new(3, 3),
                Position::new(2, 3),
            ],
            Direction::Up,
        );
        game.state_mut().score = 20;
        game.state_mut().status = GameStatus::Paused(PauseReason::Obstacle);

        game.apply_input(GameInput::ConfirmResume).expect("input");

        let state = game.state();
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::Resumed {
                    penalty: 10,
                    score: 10,
                },
                GameEvent::GameOver {
                    final_score: 10,
                    cause: GameOverCause::SelfCollision,
                },
                GameEvent::Reset,
            ]
        );
    }

    #[test]
    fn quitting_while_paused_ends_the_game() {
        let mut game = game(small_config());
        game.state_mut().score = 7;
        game.apply_input(GameInput::TogglePause).expect("input");
        game.drain_events();

        game.apply_input(GameInput::Quit).expect("input");

        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::GameOver {
                final_score: 7,
                cause: GameOverCause::Quit,
            }]
        );
    }

    #[test]
    fn quitting_while_running_leaves_state_alone() {
        let mut game = game(small_config());

        game.apply_input(GameInput::Quit).expect("input");

        assert_eq!(game.status(), GameStatus::Running);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn uneaten_food_moves_after_relocation_interval() {
        let mut game = game(GameConfig {
            food_relocate_ms: Some(4000),
            ..small_config()
        });
        game.state_mut().food = Some(Food::normal(Position::new(8, 8)));

        for ms in [0, 1000, 2000, 3000, 3999] {
            game.tick(Duration::from_millis(ms)).expect("tick");
            assert_eq!(game.state().food, Some(Food::normal(Position::new(8, 8))));
        }
        assert!(game.drain_events().is_empty());

        // Chasing its own tail, the head only enters a tile the snake holds.
        game.state_mut().snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
            ],
            Direction::Right,
        );
        game.tick(Duration::from_millis(4000)).expect("tick");

        let food = game.state().food.expect("food stays on the board");
        assert_ne!(food.position, Position::new(8, 8));
        assert!(!game.state().snake.occupies(food.position));
        assert_eq!(game.state().score, 0);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::FoodRelocated {
                position: food.position,
            }]
        );
    }

    #[test]
    fn food_stays_put_when_no_other_tile_is_free() {
        let mut game = game(GameConfig {
            width_px: 60,
            height_px: 20,
            start: Some(Position::new(0, 0)),
            food_relocate_ms: Some(100),
            max_spawn_attempts: 50,
            ..small_config()
        });
        // Head steps onto the vacated tail tile; every other tile is taken.
        game.state_mut().snake = Snake::from_segments(
            vec![Position::new(1, 0), Position::new(0, 0)],
            Direction::Left,
        );
        game.state_mut().food = Some(Food::normal(Position::new(2, 0)));
        game.food_placed_at = Some(Duration::ZERO);

        game.tick(Duration::from_millis(100)).expect("tick");

        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.state().food, Some(Food::normal(Position::new(2, 0))));
        assert_eq!(game.food_placed_at, Some(Duration::from_millis(100)));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn declining_resume_ends_the_game() {
        let mut game = game(GameConfig {
            obstacles: vec![PixelRect::new(40, 20, 20, 20)],
            ..small_config()
        });
        game.state_mut().food = Some(Food::normal(Position::new(8, 8)));

        game.tick(Duration::ZERO).expect("tick");
        game.apply_input(GameInput::DeclineResume).expect("input");

        assert_eq!(game.status(), GameStatus::GameOver);
        assert!(game.drain_events().contains(&GameEvent::GameOver {
            final_score: 0,
            cause: GameOverCause::Declined,
        }));
    }

    #[test]
    fn user_pause_resumes_without_penalty() {
        let mut game = game(small_config());
        game.state_mut().score = 7;

        game.apply_input(GameInput::TogglePause).expect("input");
        assert_eq!(game.status(), GameStatus::Paused(PauseReason::User));
        let head = game.state().snake.head();
        game.tick(Duration::ZERO).expect("tick");
        assert_eq!(game.state().snake.head(), head);

        game.apply_input(GameInput::TogglePause).expect("input");

        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.state().score, 7);
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = game(small_config());
        game.state_mut().food = Some(Food::normal(Position::new(8, 8)));

        game.apply_input(GameInput::Direction(Direction::Left)).expect("input");
        game.tick(Duration::ZERO).expect("tick");

        assert_eq!(game.state().snake.direction(), Direction::Right);
        assert_eq!(game.state().snake.head(), Position::new(2, 1));
    }

    #[test]
    fn bonus_food_spawns_at_milestone_and_scores_ten() {
        let mut game = game(GameConfig {
            bonus: Some(BonusConfig::default()),
            ..small_config()
        });
        game.state_mut().score = 4;
        game.state_mut().food = Some(Food::normal(Position::new(2, 1)));

        game.tick(Duration::from_millis(500)).expect("tick");

        let bonus = game.state().bonus.expect("bonus spawned at score 5");
        assert_eq!(bonus, Food::bonus(bonus.position, Duration::from_millis(7500)));

        // Put the bonus right in front of the head and eat it.
        game.state_mut().food = Some(Food::normal(Position::new(8, 8)));
        game.state_mut().bonus = Some(Food::bonus(
            Position::new(3, 1),
            Duration::from_millis(7500),
        ));
        game.tick(Duration::from_millis(600)).expect("tick");

        assert_eq!(game.state().score, 15);
        assert_eq!(game.state().snake.len(), 3);
        assert!(game.state().bonus.is_none());
    }

    #[test]
    fn restart_waits_for_reset_delay() {
        let mut game = game(GameConfig {
            on_game_over: GameOverAction::Restart,
            reset_delay_ms: 1500,
            ..small_config()
        });
        game.state_mut().snake = Snake::new(Position::new(9, 1), Direction::Right);
        game.state_mut().score = 2;

        game.tick(Duration::from_millis(100)).expect("tick");
        assert_eq!(game.status(), GameStatus::GameOver);
        assert!(!game.is_finished());

        game.tick(Duration::from_millis(1500)).expect("tick");
        assert_eq!(game.status(), GameStatus::GameOver);

        game.tick(Duration::from_millis(1600)).expect("tick");
        let state = game.state();
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.head(), Position::new(1, 1));
        assert_eq!(state.snake.direction(), Direction::Right);
        assert!(state.food.is_some());
    }
}
