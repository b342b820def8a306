use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrdError {
    #[error("file must be UTF-8 encoded")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("content is {size} bytes, limit is {limit}")]
    ContentTooLarge { size: usize, limit: usize },

    #[error("no filename provided")]
    MissingFilename,

    #[error("unsupported file type '{filename}': expected one of {allowed}")]
    UnsupportedFileType { filename: String, allowed: String },

    #[error("content looks garbled: {0}")]
    GarbledContent(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid prd type: {0}")]
    InvalidPrdType(String),

    #[error("unknown section: {0}")]
    InvalidSection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PrdError>;
