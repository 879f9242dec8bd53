use macroquad::prelude::*;
use std::path::Path;

use crate::error::StartupError;
use crate::game::{Game, Position, State};

const BACKGROUND: Color = Color::new(0.94, 0.97, 1.0, 1.0); // alice blue
const SNAKE: Color = Color::new(0.13, 0.54, 0.13, 1.0); // forest green
const GAME_OVER: &str = "Game Over";
const GAME_OVER_SIZE: u16 = 52;

fn sprite_error(path: &Path, err: impl std::fmt::Display) -> StartupError {
    StartupError::Sprite {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn decode_sprite(path: &Path, bytes: &[u8]) -> Result<Image, StartupError> {
    Image::from_file_with_format(bytes, None).map_err(|e| sprite_error(path, e))
}

pub struct Renderer {
    food_sprite: Texture2D,
    cell: f32,
}

impl Renderer {
    /// Loads the sprite sheet; its top-left cell is the food frame.
    pub async fn load(path: &Path, cell: i32) -> Result<Self, StartupError> {
        let bytes = load_file(&path.to_string_lossy())
            .await
            .map_err(|e| sprite_error(path, e))?;
        let image = decode_sprite(path, &bytes)?;
        let food_sprite = Texture2D::from_image(&image);
        food_sprite.set_filter(FilterMode::Nearest);

        log::info!(
            "loaded sprite {} ({}x{})",
            path.display(),
            food_sprite.width(),
            food_sprite.height()
        );
        Ok(Self { food_sprite, cell: cell as f32 })
    }

    pub fn draw(&self, game: &Game) {
        clear_background(BACKGROUND);

        let head = game.head();
        self.draw_cell(head.position());
        for body in head.bodies() {
            self.draw_cell(body.position);
        }

        if let Some(food) = game.food() {
            self.draw_food(food.position);
        }

        if game.state() == State::Dead {
            let m = measure_text(GAME_OVER, None, GAME_OVER_SIZE, 1.0);
            let x = (game.bounds().width() as f32 - m.width) * 0.5;
            let y = (game.bounds().height() as f32 + m.height) * 0.5;
            draw_text(GAME_OVER, x, y, GAME_OVER_SIZE as f32, BLACK);
        }
    }

    fn draw_cell(&self, p: Position) {
        draw_rectangle(p.x as f32, p.y as f32, self.cell, self.cell, SNAKE);
    }

    fn draw_food(&self, p: Position) {
        let frame = Rect::new(
            0.0,
            0.0,
            self.cell.min(self.food_sprite.width()),
            self.cell.min(self.food_sprite.height()),
        );
        draw_texture_ex(
            &self.food_sprite,
            p.x as f32,
            p.y as f32,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(self.cell, self.cell)),
                source: Some(frame),
                ..Default::default()
            },
        );
    }
}
