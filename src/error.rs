use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Notification error: {0}")]
    Notify(#[from] notify_rust::error::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Watchlist error: {0}")]
    Watchlist(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
