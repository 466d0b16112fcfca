use serde::Deserialize;

use crate::food::Food;
use crate::grid::{Grid, Position};
use crate::obstacle::ObstacleSet;
use crate::snake::Snake;

/// What happens when the head leaves the grid.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallPolicy {
    #[default]
    Fatal,
    Wrap,
}

/// Classification of a proposed head position.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    None,
    WallFatal,
    WallWrap,
    SelfFatal,
    ObstaclePause,
    FoodNormal,
    FoodBonus,
}

/// A classified head position.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Contact {
    /// Head after applying the wall policy.
    pub head: Position,
    pub collision: Collision,
}

/// Everything a proposed head can run into during one tick.
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub grid: Grid,
    pub obstacles: &'a ObstacleSet,
    pub snake: &'a Snake,
    pub food: Option<&'a Food>,
    pub bonus: Option<&'a Food>,
}

/// Classifies head positions against the session's wall policy.
#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector {
    wall_policy: WallPolicy,
}

impl CollisionDetector {
    #[must_use]
    pub fn new(wall_policy: WallPolicy) -> Self {
        Self { wall_policy }
    }

    /// Reports exactly one outcome for `proposed`.
    ///
    /// Checks run in priority order: bounds, obstacles, own body, food. Under
    /// [`WallPolicy::Wrap`] an out-of-bounds head is wrapped first and the
    /// remaining checks see the wrapped head; `WallWrap` is only reported
    /// when none of them fires.
    #[must_use]
    pub fn classify(self, proposed: Position, around: &Surroundings<'_>) -> Contact {
        let mut wrapped = false;
        let head = if around.grid.contains(proposed) {
            proposed
        } else {
            match self.wall_policy {
                WallPolicy::Fatal => {
                    return Contact {
                        head: proposed,
                        collision: Collision::WallFatal,
                    };
                }
                WallPolicy::Wrap => {
                    wrapped = true;
                    around.grid.wrap(proposed)
                }
            }
        };

        let collision = if around.obstacles.covers(head) {
            Collision::ObstaclePause
        } else if around.snake.would_collide(head) {
            Collision::SelfFatal
        } else if around.food.is_some_and(|food| food.position == head) {
            Collision::FoodNormal
        } else if around.bonus.is_some_and(|food| food.position == head) {
            Collision::FoodBonus
        } else if wrapped {
            Collision::WallWrap
        } else {
            Collision::None
        };

        Contact { head, collision }
    }
}
