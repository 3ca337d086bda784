use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] slotwatch_core::ValidationError),

    #[error("month {month} is not offered; choose one of {offered} or pass --year")]
    MonthNotOffered { month: u8, offered: String },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Scan(#[from] slotwatch_core::ScanError),

    #[error(transparent)]
    Api(#[from] slotwatch_core::ApiError),

    #[error("http client error: {0}")]
    Http(#[from] slotwatch_core::HttpError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::MonthNotOffered { .. } => 2,
            Self::Config(_) => 3,
            Self::Scan(_) => 4,
            Self::Api(_) => 4,
            Self::Http(_) => 4,
            Self::Serialization(_) => 5,
            Self::Io(_) => 10,
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(error.to_string())
    }
}
