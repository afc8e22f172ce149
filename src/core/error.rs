use thiserror::Error;

#[derive(Error, Debug)]
pub enum RealmsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Unsupported save version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

pub type Result<T> = std::result::Result<T, RealmsError>;
