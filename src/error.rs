//! Error types and conversion functions.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can stop the game from starting or running.
/// Losing a round is not an error, see `game::TickOutcome`.
#[derive(Debug)]
pub enum GameError {
    /// An error in the config file
    ConfigError(String),
    /// An asset file does not exist
    ResourceNotFound(PathBuf),
    /// An asset file exists but could not be read or decoded
    ResourceLoadError(PathBuf, String),
    /// Something went wrong in the audio playback
    AudioError(String),
    /// The terminal could not be set up, drawn to or read from
    TerminalError(String),
    /// The logger could not be installed
    LoggerError(String),
    /// Something went wrong trying to read from a file
    IOError(io::Error),
}

pub type GameResult<T = ()> = Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::ConfigError(s) => write!(f, "Config error: {}", s),
            GameError::ResourceNotFound(path) => {
                write!(f, "Resource not found: {}", path.display())
            }
            GameError::ResourceLoadError(path, s) => {
                write!(f, "Error loading resource {}: {}", path.display(), s)
            }
            GameError::AudioError(s) => write!(f, "Audio error: {}", s),
            GameError::TerminalError(s) => write!(f, "Terminal error: {}", s),
            GameError::LoggerError(s) => write!(f, "Logger error: {}", s),
            GameError::IOError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> GameError {
        GameError::IOError(e)
    }
}

impl From<toml::de::Error> for GameError {
    fn from(e: toml::de::Error) -> GameError {
        GameError::ConfigError(format!("TOML decode error: {}", e))
    }
}

impl From<crossterm::ErrorKind> for GameError {
    fn from(e: crossterm::ErrorKind) -> GameError {
        GameError::TerminalError(e.to_string())
    }
}

impl From<rodio::StreamError> for GameError {
    fn from(e: rodio::StreamError) -> GameError {
        GameError::AudioError(format!("Unable to open output stream: {}", e))
    }
}

impl From<rodio::PlayError> for GameError {
    fn from(e: rodio::PlayError) -> GameError {
        GameError::AudioError(format!("Unable to play sound: {}", e))
    }
}

impl From<log::SetLoggerError> for GameError {
    fn from(e: log::SetLoggerError) -> GameError {
        GameError::LoggerError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_resource_names_the_path() {
        let err = GameError::ResourceNotFound(PathBuf::from("resources/ding.mp3"));
        assert_eq!(err.to_string(), "Resource not found: resources/ding.mp3");
    }

    #[test]
    fn toml_errors_become_config_errors() {
        let err: GameError = toml::from_str::<toml::Value>("x = [").unwrap_err().into();
        assert!(matches!(err, GameError::ConfigError(_)));
    }
}
