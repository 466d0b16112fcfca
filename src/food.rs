use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::SpawnError;
use crate::grid::{Grid, Position, TileArea};
use crate::obstacle::ObstacleSet;
use crate::snake::Snake;

/// Score granted for normal food.
pub const NORMAL_FOOD_POINTS: u32 = 1;

/// Score granted for bonus food.
pub const BONUS_FOOD_POINTS: u32 = 10;

/// Default cap on rejection-sampling draws per spawn.
pub const DEFAULT_MAX_SPAWN_ATTEMPTS: u32 = 10_000;

/// Source of uniform random tile coordinates.
///
/// Every [`rand::Rng`] is a `RandomSource`; tests may supply a scripted one.
pub trait RandomSource {
    /// Returns a uniformly distributed value in `0..upper`.
    fn below(&mut self, upper: u16) -> u16;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, upper: u16) -> u16 {
        self.gen_range(0..upper)
    }
}

/// Food type and associated metadata.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    /// Expires once the clock is strictly past `expires_at`.
    Bonus { expires_at: Duration },
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    /// Creates a normal food at `position`.
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self {
            position,
            kind: FoodKind::Normal,
        }
    }

    /// Creates a bonus food at `position` that expires at `expires_at`.
    #[must_use]
    pub fn bonus(position: Position, expires_at: Duration) -> Self {
        Self {
            position,
            kind: FoodKind::Bonus { expires_at },
        }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self.kind {
            FoodKind::Normal => NORMAL_FOOD_POINTS,
            FoodKind::Bonus { .. } => BONUS_FOOD_POINTS,
        }
    }

    #[must_use]
    pub fn is_expired(self, now: Duration) -> bool {
        match self.kind {
            FoodKind::Normal => false,
            FoodKind::Bonus { expires_at } => now > expires_at,
        }
    }
}

/// When bonus food appears and how long it stays.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BonusRule {
    /// Bonus food spawns whenever the score reaches a positive multiple of this.
    pub interval: u32,
    pub duration: Duration,
}

impl BonusRule {
    #[must_use]
    pub fn is_milestone(self, score: u32) -> bool {
        self.interval > 0 && score > 0 && score % self.interval == 0
    }
}

/// Tiles a new food item must avoid.
#[derive(Debug, Clone, Copy)]
pub struct Occupancy<'a> {
    pub grid: Grid,
    pub obstacles: &'a ObstacleSet,
    pub snake: &'a Snake,
    /// Tiles held by other food items.
    pub reserved: &'a [Position],
}

impl Occupancy<'_> {
    #[must_use]
    pub fn is_free(&self, position: Position) -> bool {
        self.grid.contains(position)
            && !self.obstacles.covers(position)
            && !self.snake.occupies(position)
            && !self.reserved.contains(&position)
    }
}

/// Places food with capped rejection sampling.
#[derive(Debug, Clone, Copy)]
pub struct FoodSpawner {
    max_attempts: u32,
    bonus: Option<BonusRule>,
    /// Whole grid when unset.
    area: Option<TileArea>,
}

impl FoodSpawner {
    #[must_use]
    pub fn new(max_attempts: u32, bonus: Option<BonusRule>) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            bonus,
            area: None,
        }
    }

    /// Restricts every spawn to tiles inside `area`.
    #[must_use]
    pub fn within(self, area: TileArea) -> Self {
        Self {
            area: Some(area),
            ..self
        }
    }

    /// Spawns normal food on a free tile.
    pub fn spawn_normal<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        occupancy: &Occupancy<'_>,
    ) -> Result<Food, SpawnError> {
        self.free_tile(rng, occupancy).map(Food::normal)
    }

    /// Spawns bonus food into `slot` when `score` hits a milestone.
    ///
    /// Returns `Ok(true)` when a bonus was placed. Nothing happens while a
    /// bonus is already active or bonus food is disabled.
    pub fn maybe_spawn_bonus<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        score: u32,
        now: Duration,
        occupancy: &Occupancy<'_>,
        slot: &mut Option<Food>,
    ) -> Result<bool, SpawnError> {
        let Some(rule) = self.bonus else {
            return Ok(false);
        };
        if slot.is_some() || !rule.is_milestone(score) {
            return Ok(false);
        }

        let position = self.free_tile(rng, occupancy)?;
        let expires_at = now + rule.duration;
        debug!(x = position.x, y = position.y, ?expires_at, "bonus food spawned");
        *slot = Some(Food::bonus(position, expires_at));
        Ok(true)
    }

    fn free_tile<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        occupancy: &Occupancy<'_>,
    ) -> Result<Position, SpawnError> {
        let area = self.area.unwrap_or_else(|| occupancy.grid.area());
        if area.is_empty() {
            return Err(SpawnError::NoFreeTile { attempts: 0 });
        }

        for _ in 0..self.max_attempts {
            let candidate = Position {
                x: area.origin.x + i32::from(rng.below(area.size.width)),
                y: area.origin.y + i32::from(rng.below(area.size.height)),
            };
            if occupancy.is_free(candidate) {
                return Ok(candidate);
            }
        }

        warn!(attempts = self.max_attempts, "food spawn gave up");
        Err(SpawnError::NoFreeTile {
            attempts: self.max_attempts,
        })
    }
}

/// Removes the bonus food in `slot` once `now` is past its expiry.
///
/// Returns true when the bonus was removed. No points are awarded.
pub fn expire_bonus_if_due(slot: &mut Option<Food>, now: Duration) -> bool {
    if slot.is_some_and(|food| food.is_expired(now)) {
        *slot = None;
        debug!("bonus food expired");
        return true;
    }
    false
}
