use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A caller-side precondition was violated (empty or unsorted series).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid time of day `{value}`: {source}")]
    TimeParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
