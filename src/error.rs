use std::path::PathBuf;

use thiserror::Error;

/// Failures of the rendering/audio/input collaborator.  None of these are
/// recoverable inside a scene: the scene aborts and the error travels up to
/// process teardown.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing asset: {0}")]
    MissingAsset(String),
    #[error("input source disconnected")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
