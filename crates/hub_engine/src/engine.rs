use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use hub_logging::hub_debug;

use crate::job::{ChannelProgressSink, JobRunner, JobSettings, ProgressSink};
use crate::{EngineError, EngineEvent, GeminiClient, HubConfig, RequestId, RunId, TextGenerator};

enum EngineCommand {
    Complete { request: RequestId, prompt: String },
    StartJob { run: RunId },
    CancelJob,
}

/// Owns a worker thread with a tokio runtime. Commands go in through
/// [`EngineHandle::complete`] and friends; results come back as
/// [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: HubConfig) -> Result<Self, EngineError> {
        let generator = Arc::new(GeminiClient::new(config.completion)?);
        Self::with_generator(generator, config.jobs)
    }

    pub fn with_generator(
        generator: Arc<dyn TextGenerator>,
        jobs: JobSettings,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let runner = JobRunner::new(jobs);

        thread::spawn(move || {
            let _guard = runtime.enter();
            let sink: Arc<dyn ProgressSink> = Arc::new(ChannelProgressSink::new(event_tx.clone()));
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Complete { request, prompt } => {
                        let generator = generator.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = generator.generate(&prompt).await;
                            let event = EngineEvent::CompletionFinished { request, result };
                            let _ = event_tx.send(event);
                        });
                    }
                    EngineCommand::StartJob { run } => {
                        runner.start(run, runner.simulated_source(), sink.clone());
                    }
                    EngineCommand::CancelJob => runner.cancel(),
                }
            }
            hub_debug!("Engine command channel closed; shutting down");
            runner.cancel();
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn complete(&self, request: RequestId, prompt: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Complete {
            request,
            prompt: prompt.into(),
        });
    }

    pub fn start_job(&self, run: RunId) {
        let _ = self.cmd_tx.send(EngineCommand::StartJob { run });
    }

    pub fn cancel_job(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelJob);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
