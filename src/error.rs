// Engine error handling

use std::fmt;

/// Startup and configuration errors. Player-input problems never surface
/// here; they become in-game messages. The only unrecoverable case is a
/// duplicate scene registration, which would leave scene bindings ambiguous.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// A scene id was registered twice. Fatal at startup.
    DuplicateScene(String),
    /// The initial scene handed to `start` was never registered.
    UnknownScene(String),
    /// Invalid or unparseable configuration.
    Config(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::DuplicateScene(id) => {
                write!(f, "scene \"{}\" registered twice", id)
            }
            EngineError::UnknownScene(id) => {
                write!(f, "unknown scene \"{}\"", id)
            }
            EngineError::Config(msg) => {
                write!(f, "configuration error: {}", msg)
            }
        }
    }
}

impl std::error::Error for EngineError {}
