#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// Structured `detail` message returned by the prediction service.
    #[error("{0}")]
    Api(String),

    #[error("HTTP {0}")]
    Status(u16),

    /// Network failure, timeout, or a body that could not be read.
    /// The reason is kept for logging; users see the generic message.
    #[error("Could not reach the API. Is the server running?")]
    Unreachable { reason: String },

    #[error("Data error: {0}")]
    Data(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    /// Detail suitable for the console, including hidden reasons.
    pub fn log_detail(&self) -> String {
        match self {
            Self::Unreachable { reason } => format!("{self} ({reason})"),
            other => other.to_string(),
        }
    }
}
