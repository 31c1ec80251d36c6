use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(
        "{}Invalid value for {field}: {value} ({reason})",
        .property.map(|index| format!("Property {}: ", index)).unwrap_or_default()
    )]
    InvalidInput {
        /// 1-based property position, when the value belongs to a property
        property: Option<usize>,
        field: String,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn invalid_input(field: &str, value: impl ToString, reason: &str) -> Self {
        Error::InvalidInput {
            property: None,
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Attach the 1-based property position to an input error
    pub fn for_property(self, index: usize) -> Self {
        match self {
            Error::InvalidInput { field, value, reason, .. } => Error::InvalidInput {
                property: Some(index),
                field,
                value,
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
