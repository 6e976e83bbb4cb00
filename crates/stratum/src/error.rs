pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Predicate parse error at offset {offset}: {message}")]
    PredicateParse { offset: usize, message: String },

    #[error("Invalid regex in predicate ({pattern}): {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid prepare options: {message}")]
    InvalidOptions { message: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidOptions {
            message: err.to_string(),
        }
    }
}
