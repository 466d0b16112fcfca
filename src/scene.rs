//! Renderer-agnostic draw-list built from the game state.

use crate::game::{GameState, GameStatus, PauseReason};
use crate::grid::{Grid, PixelRect};

/// 24-bit color.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors for every drawable entity.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    pub food: Rgb,
    pub bonus_food: Rgb,
    pub snake_head: Rgb,
    pub snake_body: Rgb,
    pub obstacle: Rgb,
    pub text: Rgb,
}

/// Default palette: red apple, green bonus, blue head on a light body.
pub const PALETTE_CLASSIC: Palette = Palette {
    background: Rgb(0, 0, 0),
    food: Rgb(255, 0, 0),
    bonus_food: Rgb(0, 255, 0),
    snake_head: Rgb(80, 120, 200),
    snake_body: Rgb(173, 216, 230),
    obstacle: Rgb(0, 80, 70),
    text: Rgb(255, 255, 102),
};

/// One filled rectangle in screen pixels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FilledRect {
    pub rect: PixelRect,
    pub color: Rgb,
}

/// Everything a renderer needs for one frame, in draw order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Scene {
    pub width_px: u32,
    pub height_px: u32,
    pub tile_size: u16,
    pub background: Rgb,
    pub rects: Vec<FilledRect>,
    pub score_text: String,
    /// Centered message shown over the field (pause prompt, game over).
    pub banner: Option<String>,
    pub text_color: Rgb,
}

impl Scene {
    /// Builds the draw-list: normal food, bonus food, body from tail to head,
    /// then obstacles.
    #[must_use]
    pub fn build(state: &GameState, grid: Grid, palette: &Palette, penalty: u32) -> Self {
        let mut rects = Vec::with_capacity(state.snake.len() + state.obstacles.rects().len() + 2);

        if let Some(food) = &state.food {
            rects.push(FilledRect {
                rect: grid.tile_rect(food.position),
                color: palette.food,
            });
        }

        if let Some(bonus) = &state.bonus {
            rects.push(FilledRect {
                rect: grid.tile_rect(bonus.position),
                color: palette.bonus_food,
            });
        }

        for (index, segment) in state.snake.segments().enumerate().rev() {
            let color = if index == 0 {
                palette.snake_head
            } else {
                palette.snake_body
            };
            rects.push(FilledRect {
                rect: grid.tile_rect(*segment),
                color,
            });
        }

        rects.extend(state.obstacles.rects().iter().map(|rect| FilledRect {
            rect: *rect,
            color: palette.obstacle,
        }));

        let size = grid.size();
        let tile = u32::from(grid.tile_size());

        Self {
            width_px: u32::from(size.width) * tile,
            height_px: u32::from(size.height) * tile,
            tile_size: grid.tile_size(),
            background: palette.background,
            rects,
            score_text: format!("Score: {}", state.score),
            banner: banner_for(state, penalty),
            text_color: palette.text,
        }
    }
}

fn banner_for(state: &GameState, penalty: u32) -> Option<String> {
    match state.status {
        GameStatus::Running => None,
        GameStatus::Paused(PauseReason::Obstacle) => Some(format!(
            "Collision with obstacle! Press Y to continue (-{penalty} points) or N to quit."
        )),
        GameStatus::Paused(PauseReason::User) => {
            Some("Paused. Press Space to resume or N to quit.".to_owned())
        }
        GameStatus::GameOver => Some(format!("Game Over! Final Score: {}", state.score)),
    }
}
