use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use hub_logging::{hub_debug, hub_info, hub_warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, JobEvent, JobFailure, RunId};

#[derive(Debug, Clone)]
pub struct JobSettings {
    pub tick_interval: Duration,
    /// Upper bound (exclusive) of the simulated per-tick increment.
    pub max_step: f64,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            max_step: 10.0,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Where a run's progress comes from. Polled once per tick; returns the
/// overall percentage the backend reports.
pub trait ProgressSource: Send {
    fn poll(&mut self) -> Result<f64, JobFailure>;
}

/// Stand-in for a conversion backend: every poll adds a uniformly drawn
/// increment in `[0, max_step)`.
pub struct SimulatedProgress {
    current: f64,
    max_step: f64,
    rng: StdRng,
}

impl SimulatedProgress {
    pub fn new(max_step: f64) -> Self {
        Self::with_rng(max_step, StdRng::from_entropy())
    }

    pub fn seeded(max_step: f64, seed: u64) -> Self {
        Self::with_rng(max_step, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_step: f64, rng: StdRng) -> Self {
        Self {
            current: 0.0,
            max_step,
            rng,
        }
    }
}

impl ProgressSource for SimulatedProgress {
    fn poll(&mut self) -> Result<f64, JobFailure> {
        if self.max_step > 0.0 {
            self.current += self.rng.gen_range(0.0..self.max_step);
        }
        Ok(self.current)
    }
}

/// Drives at most one run at a time. Starting a run cancels the previous one.
pub struct JobRunner {
    settings: JobSettings,
    current: Mutex<Option<CancellationToken>>,
}

impl JobRunner {
    pub fn new(settings: JobSettings) -> Self {
        Self {
            settings,
            current: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &JobSettings {
        &self.settings
    }

    pub fn simulated_source(&self) -> Box<dyn ProgressSource> {
        Box::new(SimulatedProgress::new(self.settings.max_step))
    }

    /// Spawns the tick loop for `run` on the current tokio runtime.
    pub fn start(
        &self,
        run: RunId,
        source: Box<dyn ProgressSource>,
        sink: Arc<dyn ProgressSink>,
    ) -> JoinHandle<()> {
        let cancel = CancellationToken::new();
        if let Some(previous) = self.lock_current().replace(cancel.clone()) {
            hub_debug!("Run {} supersedes a previous run", run);
            previous.cancel();
        }
        hub_info!("Run {} started", run);
        tokio::spawn(drive(
            run,
            source,
            sink,
            self.settings.tick_interval,
            cancel,
        ))
    }

    /// Stops the current run. The loop re-checks the token before every
    /// emit, but an emit already under way may still land; receivers match
    /// run ids and drop it.
    pub fn cancel(&self) {
        if let Some(current) = self.lock_current().take() {
            current.cancel();
        }
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn drive(
    run: RunId,
    mut source: Box<dyn ProgressSource>,
    sink: Arc<dyn ProgressSink>,
    tick_interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately; progress starts one interval in.
    ticker.tick().await;

    let mut last = 0.0_f64;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                hub_debug!("Run {} cancelled at {:.1}%", run, last);
                return;
            }
            _ = ticker.tick() => {}
        }

        let polled = source.poll();
        if cancel.is_cancelled() {
            return;
        }
        match polled {
            Ok(value) => {
                let value = if value.is_nan() {
                    last
                } else {
                    value.clamp(0.0, 100.0).max(last)
                };
                if value >= 100.0 {
                    let full = JobEvent::Progress {
                        run,
                        percent: 100.0,
                    };
                    if emit_live(&*sink, &cancel, full)
                        && emit_live(&*sink, &cancel, JobEvent::Completed { run })
                    {
                        hub_info!("Run {} completed", run);
                    }
                    return;
                }
                if value > last {
                    last = value;
                    if !emit_live(&*sink, &cancel, JobEvent::Progress { run, percent: value }) {
                        return;
                    }
                }
            }
            Err(failure) => {
                hub_warn!("Run {} failed: {}", run, failure);
                emit_live(&*sink, &cancel, JobEvent::Failed { run, failure });
                return;
            }
        }
    }
}

/// Emits `event` unless the run was cancelled. Returns false once cancelled.
fn emit_live(sink: &dyn ProgressSink, cancel: &CancellationToken, event: JobEvent) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    sink.emit(EngineEvent::Job(event));
    true
}
