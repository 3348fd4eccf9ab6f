use rand::Rng;
use tracing::{debug, info};

use super::{
    collision::{CollisionDetector, MoveOutcome},
    config::GameConfig,
    direction::{Direction, DirectionController},
    error::GameError,
    food::FoodSpawner,
    grid::{Cell, GridSpace},
    state::{EndReason, GameStatus, Snake, Snapshot},
};

/// The game engine that handles all game logic
///
/// Owns the snake, the food, the score and the heading. Nothing here keeps
/// time: the host calls [`SnakeEngine::tick`] at whatever cadence it likes.
pub struct SnakeEngine<R: Rng = rand::rngs::ThreadRng> {
    config: GameConfig,
    grid: GridSpace,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    ticks: u32,
    status: GameStatus,
    end_reason: Option<EndReason>,
    direction: DirectionController,
    spawner: FoodSpawner<R>,
}

impl SnakeEngine<rand::rngs::ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> SnakeEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let grid = GridSpace::new(config.grid_side);
        let snake = initial_snake(&config);

        Ok(Self {
            config,
            grid,
            snake,
            food: None,
            score: 0,
            ticks: 0,
            status: GameStatus::Idle,
            end_reason: None,
            direction: DirectionController::new(),
            spawner: FoodSpawner::with_rng(rng),
        })
    }

    /// Begin a new session, discarding whatever the previous one left behind
    pub fn start(&mut self) -> Result<Snapshot, GameError> {
        self.grid = GridSpace::new(self.config.grid_side);
        self.snake = initial_snake(&self.config);
        self.direction.reset();
        self.score = 0;
        self.ticks = 0;
        self.end_reason = None;
        self.food = None;
        self.status = GameStatus::Running;

        match self.spawner.spawn(self.snake.occupied(), &self.grid) {
            Ok(food) => self.food = Some(food),
            Err(err) => {
                self.finish(EndReason::BoardFilled);
                return Err(err);
            }
        }

        info!(
            grid_side = self.config.grid_side,
            length = self.snake.len(),
            "game started"
        );
        Ok(self.snapshot())
    }

    /// Advance the game by one cell. Does nothing unless the game is running.
    pub fn tick(&mut self) -> Result<Snapshot, GameError> {
        if self.status != GameStatus::Running {
            debug!(status = ?self.status, "tick ignored");
            return Ok(self.snapshot());
        }

        let next_head = self.snake.head().step(self.direction.current());
        let outcome = CollisionDetector::classify(next_head, &self.snake, self.food, &self.grid);
        self.ticks += 1;

        match outcome {
            MoveOutcome::FoodHit => {
                self.snake.grow(next_head);
                self.score += 1;
                debug!(score = self.score, length = self.snake.len(), "food eaten");

                match self.spawner.spawn(self.snake.occupied(), &self.grid) {
                    Ok(food) => self.food = Some(food),
                    Err(err) => {
                        self.food = None;
                        self.finish(EndReason::BoardFilled);
                        return Err(err);
                    }
                }
            }
            MoveOutcome::Advance => self.snake.advance(next_head),
            MoveOutcome::OutOfBounds => self.finish(EndReason::OutOfBounds),
            MoveOutcome::SelfCollision => self.finish(EndReason::SelfCollision),
        }

        Ok(self.snapshot())
    }

    /// Ask the snake to turn. Reversals are dropped; returns whether the
    /// heading changed.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let accepted = self.direction.request_change(direction);
        if !accepted {
            debug!(%direction, current = %self.direction.current(), "reversal dropped");
        }
        accepted
    }

    /// Replace the configuration used by the next [`SnakeEngine::start`]
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<(), GameError> {
        if self.status == GameStatus::Running {
            return Err(GameError::InvalidTransition {
                from: self.status,
                operation: "reconfigure",
            });
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_cells: self.snake.cells().collect(),
            food: self.food,
            score: self.score,
            status: self.status,
            direction: self.direction.current(),
            ticks: self.ticks,
            end_reason: self.end_reason,
            grid_side: self.grid.side(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn direction(&self) -> Direction {
        self.direction.current()
    }

    fn finish(&mut self, reason: EndReason) {
        self.status = GameStatus::GameOver;
        self.end_reason = Some(reason);
        info!(?reason, score = self.score, ticks = self.ticks, "game over");
    }

    #[cfg(test)]
    fn set_state(&mut self, snake: Snake, direction: Direction, food: Option<Cell>) {
        self.snake = snake;
        self.direction = DirectionController::new();
        if !self.direction.request_change(direction) {
            self.direction.request_change(Direction::Up);
            self.direction.request_change(direction);
        }
        self.food = food;
    }

    #[cfg(test)]
    fn set_grid(&mut self, side: usize) {
        self.grid = GridSpace::new(side);
    }
}

/// Horizontal snake on the middle row, head rightmost at x = length, tail at x = 1
fn initial_snake(config: &GameConfig) -> Snake {
    let length = config.initial_snake_length;
    let head = Cell::new(length as i32, (config.grid_side / 2) as i32);
    Snake::new(head, Direction::Right, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn engine(config: GameConfig) -> SnakeEngine<StdRng> {
        SnakeEngine::with_rng(config, StdRng::seed_from_u64(2024)).unwrap()
    }

    /// Engine on a 10x10 grid, below the configurable minimum
    fn small_engine(snake: Snake, direction: Direction, food: Option<Cell>) -> SnakeEngine<StdRng> {
        let mut engine = engine(GameConfig::default());
        engine.start().unwrap();
        engine.set_grid(10);
        engine.set_state(snake, direction, food);
        engine
    }

    fn assert_distinct(snapshot: &Snapshot) {
        let unique: HashSet<Cell> = snapshot.snake_cells.iter().copied().collect();
        assert_eq!(unique.len(), snapshot.snake_cells.len());
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = engine(GameConfig::default());
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.status, GameStatus::Idle);
        assert_eq!(snapshot.food, None);
        assert_eq!(snapshot.score, 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            grid_side: 5,
            ..Default::default()
        };
        assert!(matches!(
            SnakeEngine::new(config),
            Err(GameError::Configuration { field: "grid_side", .. })
        ));
    }

    #[test]
    fn test_start() {
        let mut engine = engine(GameConfig::default());
        let snapshot = engine.start().unwrap();

        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(
            snapshot.snake_cells,
            vec![Cell::new(3, 12), Cell::new(2, 12), Cell::new(1, 12)]
        );

        let food = snapshot.food.unwrap();
        assert!(!snapshot.snake_cells.contains(&food));
        assert!(GridSpace::new(25).contains(food));
    }

    #[test]
    fn test_start_is_idempotent() {
        let config = GameConfig {
            initial_snake_length: 5,
            ..Default::default()
        };
        let mut engine = engine(config);
        engine.start().unwrap();
        engine.request_direction(Direction::Down);
        for _ in 0..4 {
            engine.tick().unwrap();
        }

        let first = engine.start().unwrap();
        let second = engine.start().unwrap();

        for snapshot in [&first, &second] {
            assert_eq!(snapshot.score, 0);
            assert_eq!(snapshot.ticks, 0);
            assert_eq!(snapshot.direction, Direction::Right);
            assert_eq!(snapshot.snake_cells.len(), 5);
            assert_eq!(snapshot.status, GameStatus::Running);
            assert_eq!(snapshot.end_reason, None);
        }
        assert_eq!(first.snake_cells, second.snake_cells);
    }

    #[test]
    fn test_basic_movement() {
        let snake = Snake::from_cells([Cell::new(3, 5), Cell::new(2, 5), Cell::new(1, 5)]);
        let mut engine = small_engine(snake, Direction::Right, Some(Cell::new(8, 8)));

        let snapshot = engine.tick().unwrap();

        assert_eq!(snapshot.ticks, 1);
        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(
            snapshot.snake_cells,
            vec![Cell::new(4, 5), Cell::new(3, 5), Cell::new(2, 5)]
        );
        assert_eq!(snapshot.food, Some(Cell::new(8, 8)));
    }

    #[test]
    fn test_food_hit() {
        let snake = Snake::from_cells([Cell::new(3, 5), Cell::new(2, 5), Cell::new(1, 5)]);
        let mut engine = small_engine(snake, Direction::Right, Some(Cell::new(4, 5)));

        let snapshot = engine.tick().unwrap();

        assert_eq!(
            snapshot.snake_cells,
            vec![Cell::new(4, 5), Cell::new(3, 5), Cell::new(2, 5), Cell::new(1, 5)]
        );
        assert_eq!(snapshot.score, 1);
        let food = snapshot.food.unwrap();
        assert!(!snapshot.snake_cells.contains(&food));
        assert!(GridSpace::new(10).contains(food));
    }

    #[test]
    fn test_out_of_bounds() {
        let snake = Snake::from_cells([Cell::new(9, 5), Cell::new(8, 5), Cell::new(7, 5)]);
        let mut engine = small_engine(snake, Direction::Right, Some(Cell::new(0, 0)));
        let before = engine.snapshot();

        let snapshot = engine.tick().unwrap();

        assert_eq!(snapshot.status, GameStatus::GameOver);
        assert_eq!(snapshot.end_reason, Some(EndReason::OutOfBounds));
        assert_eq!(snapshot.snake_cells, before.snake_cells);
        assert_eq!(snapshot.score, 0);
    }

    #[test]
    fn test_self_collision() {
        // Heading up, then turning left onto (4, 5), which is not the tail
        let snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(5, 7),
            Cell::new(4, 7),
            Cell::new(4, 6),
            Cell::new(4, 5),
            Cell::new(4, 4),
        ]);
        let mut engine = small_engine(snake, Direction::Up, Some(Cell::new(0, 0)));
        assert!(engine.request_direction(Direction::Left));
        let before = engine.snapshot();

        let snapshot = engine.tick().unwrap();

        assert_eq!(snapshot.status, GameStatus::GameOver);
        assert_eq!(snapshot.end_reason, Some(EndReason::SelfCollision));
        assert_eq!(snapshot.snake_cells, before.snake_cells);
    }

    #[test]
    fn test_chasing_own_tail_is_safe() {
        let snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(5, 7),
            Cell::new(4, 7),
            Cell::new(4, 6),
            Cell::new(4, 5),
        ]);
        let mut engine = small_engine(snake, Direction::Up, Some(Cell::new(0, 0)));
        engine.request_direction(Direction::Left);

        let snapshot = engine.tick().unwrap();

        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.head(), Some(Cell::new(4, 5)));
        assert_eq!(snapshot.snake_cells.len(), 6);
        assert_distinct(&snapshot);
    }

    #[test]
    fn test_reversal_ignored_then_turn() {
        let snake = Snake::from_cells([Cell::new(3, 5), Cell::new(2, 5), Cell::new(1, 5)]);
        let mut engine = small_engine(snake, Direction::Right, Some(Cell::new(0, 0)));

        assert!(!engine.request_direction(Direction::Left));
        assert_eq!(engine.direction(), Direction::Right);
        assert!(engine.request_direction(Direction::Up));

        let snapshot = engine.tick().unwrap();

        assert_eq!(snapshot.head(), Some(Cell::new(3, 4)));
        assert_eq!(snapshot.direction, Direction::Up);
    }

    #[test]
    fn test_tick_when_not_running_is_noop() {
        let mut engine = engine(GameConfig::default());
        let idle = engine.tick().unwrap();
        assert_eq!(idle.status, GameStatus::Idle);
        assert_eq!(idle.ticks, 0);

        let snake = Snake::from_cells([Cell::new(9, 5), Cell::new(8, 5), Cell::new(7, 5)]);
        let mut engine = small_engine(snake, Direction::Right, Some(Cell::new(0, 0)));
        let over = engine.tick().unwrap();
        assert_eq!(over.status, GameStatus::GameOver);

        let after = engine.tick().unwrap();
        assert_eq!(after, over);
    }

    #[test]
    fn test_board_filled() {
        // Snake covers all of a 10x10 grid but the food cell in front of it
        let mut cells: Vec<Cell> = Vec::new();
        for y in 0..10 {
            let row: Vec<Cell> = (0..10).map(|x| Cell::new(x, y)).collect();
            if y % 2 == 0 {
                cells.extend(row);
            } else {
                cells.extend(row.into_iter().rev());
            }
        }
        // Walk order ends at (0, 9); reverse so the head is there
        cells.reverse();
        let food = cells.remove(0);
        let snake = Snake::from_cells(cells);
        assert_eq!(snake.head(), Cell::new(1, 9));

        let mut engine = small_engine(snake, Direction::Left, Some(food));
        let result = engine.tick();

        assert_eq!(result, Err(GameError::GridFull { side: 10 }));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.status, GameStatus::GameOver);
        assert_eq!(snapshot.end_reason, Some(EndReason::BoardFilled));
        assert_eq!(snapshot.food, None);
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.snake_cells.len(), 100);
    }

    #[test]
    fn test_reconfigure() {
        let mut engine = engine(GameConfig::default());
        let bigger = GameConfig::new(30);

        assert!(engine.reconfigure(bigger.clone()).is_ok());
        engine.start().unwrap();
        assert_eq!(engine.snapshot().grid_side, 30);

        assert_eq!(
            engine.reconfigure(GameConfig::default()),
            Err(GameError::InvalidTransition {
                from: GameStatus::Running,
                operation: "reconfigure",
            })
        );
        assert_eq!(engine.config(), &bigger);

        let invalid = GameConfig {
            tick_interval_ms: 5,
            ..Default::default()
        };
        engine.set_state(
            Snake::from_cells([Cell::new(29, 0), Cell::new(28, 0), Cell::new(27, 0)]),
            Direction::Right,
            Some(Cell::new(0, 10)),
        );
        engine.tick().unwrap();
        assert_eq!(engine.status(), GameStatus::GameOver);
        assert!(matches!(
            engine.reconfigure(invalid),
            Err(GameError::Configuration { .. })
        ));
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        let mut driver = StdRng::seed_from_u64(99);
        let mut engine = engine(GameConfig::small());

        for _ in 0..20 {
            let mut previous = engine.start().unwrap();

            while previous.is_running() {
                let wanted = directions[driver.gen_range(0..directions.len())];
                let heading_before = engine.direction();
                engine.request_direction(wanted);
                if wanted == heading_before.opposite() {
                    assert_eq!(engine.direction(), heading_before);
                }

                let expected_head = previous.head().unwrap().step(engine.direction());
                let snapshot = engine.tick().unwrap();

                assert_distinct(&snapshot);
                if snapshot.is_running() {
                    let grew = previous.food == Some(expected_head);
                    let expected_len = previous.snake_cells.len() + usize::from(grew);
                    assert_eq!(snapshot.snake_cells.len(), expected_len);
                    assert_eq!(snapshot.score, previous.score + u32::from(grew));
                    if let Some(food) = snapshot.food {
                        assert!(!snapshot.snake_cells.contains(&food));
                    }
                } else {
                    assert_eq!(snapshot.snake_cells, previous.snake_cells);
                }
                previous = snapshot;
            }
        }
    }
}
