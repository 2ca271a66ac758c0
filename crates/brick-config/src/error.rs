#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("value {value} out of range [{min}, {max}]")]
    OutOfRange {
        value: String,
        min: String,
        max: String,
    },

    #[error("invalid {what}: {text:?}")]
    Parse { what: &'static str, text: String },

    #[error("{entity} config has no {option} option")]
    NoSuchOption { entity: String, option: String },

    #[error("expected {expected} value, got {got}")]
    WrongType {
        expected: &'static str,
        got: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn parse(what: &'static str, text: impl Into<String>) -> Self {
        Self::Parse {
            what,
            text: text.into(),
        }
    }

    pub(crate) fn out_of_range(
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
