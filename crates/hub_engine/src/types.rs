use thiserror::Error;

/// Identifies one conversion run.
pub type RunId = u64;
/// Identifies one text-generation request.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Progress { run: RunId, percent: f64 },
    Completed { run: RunId },
    Failed { run: RunId, failure: JobFailure },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Job(JobEvent),
    CompletionFinished {
        request: RequestId,
        result: Result<String, CompletionError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("job failed: {message}")]
pub struct JobFailure {
    pub message: String,
}

impl JobFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// No credential configured; no request was sent.
    #[error("API key is missing")]
    MissingCredential,
    #[error("upstream call failed with http status {0}")]
    UpstreamStatus(u16),
    #[error("upstream call timed out: {0}")]
    Timeout(String),
    #[error("upstream call failed: {0}")]
    Transport(String),
    #[error("upstream response is not valid JSON: {0}")]
    InvalidBody(String),
    #[error("invalid completion endpoint: {0}")]
    InvalidEndpoint(String),
}

impl CompletionError {
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, CompletionError::MissingCredential)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("backend returned http status {0}")]
    Status(u16),
    #[error("backend call timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("backend response is not valid JSON: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build completion client: {0}")]
    Completion(#[from] CompletionError),
}
