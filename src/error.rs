use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("{0}")]
    Usage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No such project: {0}")]
    ProjectNotFound(String),

    #[error("Project {project} not found within {pages} pages")]
    PageLimitExceeded { project: String, pages: u32 },

    #[error("Project listing repeated page {page} without terminating")]
    PaginationStalled { page: u32 },

    #[error("Commit {commit} of branch {branch} has no pipeline")]
    NoPipeline { branch: String, commit: String },

    #[error("API request to {url} failed with status {status}: {message}")]
    ApiError {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ArtifactError {
    /// Process exit status for this error: 2 for usage mistakes, 1 for
    /// everything that went wrong after validation.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArtifactError>;
