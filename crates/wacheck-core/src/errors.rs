/// Core error type for the bot.
///
/// Adapter crates should map their transport-specific failures into this type
/// so the core can handle them consistently. Per-identifier lookup failures
/// and delivery failures never travel as `Error`; they are contained where
/// they occur, as a `Verdict` value or a log line. The only fatal variant is
/// `LoggedOut`, which the binary maps to a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("logged out from the messaging gateway")]
    LoggedOut,
}

pub type Result<T> = std::result::Result<T, Error>;
