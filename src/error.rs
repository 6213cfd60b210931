use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Tray error: {0}")]
    Tray(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
