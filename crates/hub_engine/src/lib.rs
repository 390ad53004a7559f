//! ConvertHub engine: outbound calls, job runner and effect execution.
mod backend;
mod completion;
mod config;
mod engine;
mod job;
mod types;
mod wire;

pub use backend::{BackendClient, BackendRoute, BackendSettings, HttpMethod, DEFAULT_BACKEND_URL};
pub use completion::{CompletionSettings, GeminiClient, TextGenerator, DEFAULT_GEMINI_ENDPOINT};
pub use config::{ConfigError, HubConfig};
pub use engine::EngineHandle;
pub use job::{
    ChannelProgressSink, JobRunner, JobSettings, ProgressSink, ProgressSource, SimulatedProgress,
};
pub use types::{
    BackendError, CompletionError, EngineError, EngineEvent, JobEvent, JobFailure, RequestId,
    RunId,
};
