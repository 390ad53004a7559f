use hub_core::{AiFailure, Effect, JobToken, Msg};
use hub_engine::{CompletionError, EngineEvent, EngineHandle, HubConfig, JobEvent};
use hub_logging::{hub_info, hub_warn};

/// Executes core effects on the engine and turns engine events back into
/// messages for the update loop.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: HubConfig) -> Result<Self, hub_engine::EngineError> {
        Ok(Self {
            engine: EngineHandle::new(config)?,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartJob { token } => {
                    hub_info!("StartJob token={}", token.0);
                    self.engine.start_job(token.0);
                }
                Effect::CancelJob => {
                    hub_info!("CancelJob");
                    self.engine.cancel_job();
                }
                Effect::RequestCompletion { request, prompt } => {
                    hub_info!(
                        "RequestCompletion request={} prompt_len={}",
                        request,
                        prompt.len()
                    );
                    self.engine.complete(request, prompt);
                }
            }
        }
    }

    /// Drains pending engine events without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Job(JobEvent::Progress { run, percent }) => Msg::JobProgress {
            token: JobToken(run),
            percent,
        },
        EngineEvent::Job(JobEvent::Completed { run }) => Msg::JobCompleted {
            token: JobToken(run),
        },
        EngineEvent::Job(JobEvent::Failed { run, failure }) => {
            hub_warn!("Run {} failed: {}", run, failure);
            Msg::JobFailed {
                token: JobToken(run),
                reason: failure.message,
            }
        }
        EngineEvent::CompletionFinished { request, result } => Msg::AiReplied {
            request,
            outcome: result.map_err(map_failure),
        },
    }
}

fn map_failure(err: CompletionError) -> AiFailure {
    if err.is_missing_credential() {
        AiFailure::MissingCredential
    } else {
        hub_warn!("Text generation failed: {}", err);
        AiFailure::Upstream(err.to_string())
    }
}
