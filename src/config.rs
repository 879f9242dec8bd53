use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::StartupError;
use crate::game::{Bounds, Direction, Position};

// Looked up in the working directory; absent means defaults.
const CONFIG_FILE: &str = "snake.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub tick_ms: u64,
    pub start_x: i32,
    pub start_y: i32,
    pub start_size: usize,
    pub start_direction: Direction,
    pub sprite_path: PathBuf,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Snake".to_owned(),
            width: 1024,
            height: 768,
            cell_size: 16,
            tick_ms: 64,
            start_x: 64,
            start_y: 64,
            start_size: 3,
            start_direction: Direction::Right,
            sprite_path: PathBuf::from("assets/snake-sprites.png"),
            log_level: "info".to_owned(),
        }
    }
}

impl GameConfig {
    pub fn load() -> Result<Self, StartupError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, StartupError> {
        let text = fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|source| StartupError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        let invalid =
            |msg: String| -> Result<(), StartupError> { Err(StartupError::InvalidConfig(msg)) };

        if self.cell_size <= 0 {
            return invalid(format!("cell_size must be positive, got {}", self.cell_size));
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value <= 0 || value % self.cell_size != 0 {
                return invalid(format!(
                    "{name} {value} must be a positive multiple of cell_size {}",
                    self.cell_size
                ));
            }
        }
        if self.tick_ms == 0 {
            return invalid("tick_ms must be non-zero".to_owned());
        }

        let start = self.start();
        if !self.bounds().contains(start) {
            return invalid(format!(
                "start ({}, {}) is not a grid cell inside {}x{}",
                self.start_x, self.start_y, self.width, self.height
            ));
        }

        // The initial body trails in a straight line and must not wrap onto the head.
        let line = match self.start_direction {
            Direction::Left | Direction::Right => self.bounds().columns(),
            Direction::Up | Direction::Down => self.bounds().rows(),
        };
        if self.start_size >= line as usize {
            return invalid(format!(
                "start_size {} does not fit in a line of {line} cells",
                self.start_size
            ));
        }

        if log::LevelFilter::from_str(&self.log_level).is_err() {
            return invalid(format!("unknown log_level {:?}", self.log_level));
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height, self.cell_size)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_x, self.start_y)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.log_level).unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GameConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bounds().columns(), 64);
        assert_eq!(config.bounds().rows(), 48);
        assert_eq!(config.tick(), Duration::from_millis(64));
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = parse(
            r#"{ "title": "Tiny", "width": 320, "height": 240, "start_direction": "up" }"#,
        );
        assert_eq!(config.title, "Tiny");
        assert_eq!(config.width, 320);
        assert_eq!(config.start_direction, Direction::Up);
        assert_eq!(config.cell_size, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "speed": 3 }"#).is_err());
    }

    #[test]
    fn rejects_misaligned_board() {
        let config = GameConfig { width: 1000, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_cell_and_tick() {
        let config = GameConfig { cell_size: 0, ..GameConfig::default() };
        assert!(config.validate().is_err());
        let config = GameConfig { tick_ms: 0, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_start_off_grid_or_outside() {
        let config = GameConfig { start_x: 70, ..GameConfig::default() };
        assert!(config.validate().is_err());
        let config = GameConfig { start_y: 768, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_body_longer_than_its_line() {
        let config = GameConfig {
            width: 64,
            height: 320,
            start_x: 0,
            start_y: 0,
            start_size: 4,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let vertical = GameConfig { start_direction: Direction::Down, ..config };
        assert!(vertical.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let config = GameConfig { log_level: "loud".to_owned(), ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameConfig::from_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, StartupError::ConfigRead { .. }));
    }
}
