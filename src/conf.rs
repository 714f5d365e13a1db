//! Game configuration.
//!
//! On startup the game looks for a `snake.toml` file in the working
//! directory. Any key left out of the file keeps its default value, and a
//! missing file means "all defaults", which reproduces the classic
//! 1200x800 field with 40 pixel cells and 5 ticks per second.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::apple::{SPAWN_COLUMNS, SPAWN_ROWS};
use crate::error::{GameError, GameResult};
use crate::grid::Field;

pub const CONF_FILE: &str = "snake.toml";

/// Paths of the audio clips, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct AssetConf {
    /// Set to `false` to run without sound; the clips are then not loaded.
    #[default = true]
    pub audio: bool,
    #[default(PathBuf::from("resources/bg_music_1.mp3"))]
    pub background_music: PathBuf,
    #[default(PathBuf::from("resources/1_snake_game_resources_ding.mp3"))]
    pub ding: PathBuf,
    #[default(PathBuf::from("resources/1_snake_game_resources_crash.mp3"))]
    pub crash: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Conf {
    pub field: Field,
    /// Time between two simulation steps. This is the game speed.
    #[default = 200]
    pub tick_interval_ms: u64,
    pub assets: AssetConf,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[default(String::from("info"))]
    pub log_level: String,
    #[default(PathBuf::from("snake.log"))]
    pub log_file: PathBuf,
}

impl Conf {
    /// Loads the config at `path`, falling back to the defaults if there
    /// is no such file. The result is validated either way.
    pub fn load<P: AsRef<Path>>(path: P) -> GameResult<Conf> {
        let conf = match fs::read_to_string(path.as_ref()) {
            Ok(s) => Conf::from_toml_str(&s)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Conf::default(),
            Err(e) => return Err(e.into()),
        };
        conf.validate()?;
        Ok(conf)
    }

    pub fn from_toml_str(s: &str) -> GameResult<Conf> {
        Ok(toml::from_str(s)?)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn log_level(&self) -> GameResult<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| GameError::ConfigError(format!("unknown log level {:?}", self.log_level)))
    }

    pub fn validate(&self) -> GameResult {
        let Field { width, height, cell_size } = self.field;

        if cell_size <= 0 || width <= 0 || height <= 0 {
            return Err(GameError::ConfigError(format!(
                "field dimensions must be positive, got {}x{} with cell size {}",
                width, height, cell_size
            )));
        }
        if width % cell_size != 0 || height % cell_size != 0 {
            return Err(GameError::ConfigError(format!(
                "cell size {} does not divide the {}x{} field",
                cell_size, width, height
            )));
        }
        if self.field.columns() <= SPAWN_COLUMNS.1 || self.field.rows() <= SPAWN_ROWS.1 {
            return Err(GameError::ConfigError(format!(
                "field of {}x{} cells is too small, apples spawn up to column {} and row {}",
                self.field.columns(),
                self.field.rows(),
                SPAWN_COLUMNS.1,
                SPAWN_ROWS.1
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::ConfigError("tick_interval_ms must be at least 1".to_string()));
        }
        self.log_level()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let conf = Conf::default();
        assert_eq!(conf.field.width, 1200);
        assert_eq!(conf.field.height, 800);
        assert_eq!(conf.field.cell_size, 40);
        assert_eq!(conf.tick_interval(), Duration::from_millis(200));
        assert!(conf.assets.audio);
        assert_eq!(conf.log_level().unwrap(), LevelFilter::Info);
        conf.validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let conf = Conf::from_toml_str(
            r#"
            tick_interval_ms = 120

            [assets]
            audio = false
            "#,
        )
        .unwrap();

        assert_eq!(conf.tick_interval_ms, 120);
        assert!(!conf.assets.audio);
        assert_eq!(conf.assets.ding, AssetConf::default().ding);
        assert_eq!(conf.field, Field::default());
    }

    #[test]
    fn cell_size_must_divide_field() {
        let conf = Conf::from_toml_str("[field]\ncell_size = 35\n").unwrap();
        assert!(matches!(conf.validate(), Err(GameError::ConfigError(_))));
    }

    #[test]
    fn spawn_region_must_fit() {
        let conf = Conf::from_toml_str("[field]\nwidth = 800\nheight = 400\n").unwrap();
        assert!(matches!(conf.validate(), Err(GameError::ConfigError(_))));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let conf = Conf::from_toml_str("tick_interval_ms = 0\n").unwrap();
        assert!(conf.validate().is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let conf = Conf::from_toml_str("log_level = \"loud\"\n").unwrap();
        assert!(conf.validate().is_err());
    }

    #[test]
    fn garbage_is_a_config_error() {
        assert!(matches!(
            Conf::from_toml_str("field = 3"),
            Err(GameError::ConfigError(_))
        ));
    }

    #[test]
    fn missing_file_means_defaults() {
        let conf = Conf::load("definitely/not/here/snake.toml").unwrap();
        assert_eq!(conf, Conf::default());
    }
}
