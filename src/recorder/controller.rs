use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Utc;
use log::{error, info};
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::metrics::{IngestMetrics, IngestSnapshot};
use crate::models::EmotionSession;
use crate::sensing::{ExpressionAnalyzer, SamplingController};

use super::state::{RecorderState, RecorderStatus};
use super::RecorderConfig;

/// Active-duration accounting: paused windows are excluded by folding the
/// running window into a baseline on pause and re-anchoring on resume.
#[derive(Debug, Default)]
pub(crate) struct ActiveClock {
    baseline: Duration,
    anchor: Option<Instant>,
}

impl ActiveClock {
    pub(crate) fn start(&mut self, now: Instant) {
        self.baseline = Duration::ZERO;
        self.anchor = Some(now);
    }

    pub(crate) fn pause(&mut self, now: Instant) {
        if let Some(anchor) = self.anchor.take() {
            self.baseline += now - anchor;
        }
    }

    pub(crate) fn resume(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    pub(crate) fn active(&self, now: Instant) -> Duration {
        match self.anchor {
            Some(anchor) => self.baseline + (now - anchor),
            None => self.baseline,
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Recorder state plus its clock, guarded together so the sampling loop and
/// the elapsed ticker always see a consistent pair.
pub(crate) struct RecorderCore {
    pub(crate) state: RecorderState,
    pub(crate) clock: ActiveClock,
}

impl RecorderCore {
    pub(crate) fn new() -> Self {
        Self {
            state: RecorderState::new(),
            clock: ActiveClock::default(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecorderSnapshot {
    pub status: RecorderStatus,
    pub session_id: Option<String>,
    pub target_secs: u64,
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub sample_count: usize,
}

/// Async façade over the recorder: starts the sampling loop and the elapsed
/// ticker, auto-stops at the target duration, and publishes the finalized
/// session on a watch channel so manual and automatic stops are collected the
/// same way.
#[derive(Clone)]
pub struct SessionController {
    core: Arc<Mutex<RecorderCore>>,
    analyzer: Arc<dyn ExpressionAnalyzer>,
    config: RecorderConfig,
    sampler: Arc<Mutex<SamplingController>>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    metrics: IngestMetrics,
    completed_tx: Arc<watch::Sender<Option<EmotionSession>>>,
}

impl SessionController {
    pub fn new(analyzer: Arc<dyn ExpressionAnalyzer>, config: RecorderConfig) -> Self {
        let (completed_tx, _) = watch::channel(None);
        Self {
            core: Arc::new(Mutex::new(RecorderCore::new())),
            analyzer,
            config,
            sampler: Arc::new(Mutex::new(SamplingController::new())),
            ticker: Arc::new(Mutex::new(None)),
            metrics: IngestMetrics::new(),
            completed_tx: Arc::new(completed_tx),
        }
    }

    /// Start a new session. Returns its id.
    pub async fn start_session(&self, target_secs: u64) -> Result<String> {
        let mut sampler = self.sampler.lock().await;

        {
            let core = self.core.lock().await;
            if core.state.status() != RecorderStatus::Idle {
                bail!("session already active");
            }
        }

        // Join a sampling loop left over from a previous run, if any.
        sampler.stop_sampling().await?;
        self.metrics.reset().await;

        let session_id = {
            let mut core = self.core.lock().await;
            let session = core.state.begin(target_secs, Utc::now())?;
            let id = session.id.clone();
            core.clock.start(Instant::now());
            id
        };

        sampler.start_sampling(
            self.core.clone(),
            self.analyzer.clone(),
            self.metrics.clone(),
            self.config.clone(),
        )?;
        drop(sampler);

        self.spawn_ticker().await;

        info!("session {session_id} started (target {target_secs}s)");
        Ok(session_id)
    }

    /// Stop the active session, if any. Returns `None` when nothing is
    /// active, so a user stop racing the auto-stop is a harmless no-op.
    pub async fn stop_session(&self) -> Result<Option<EmotionSession>> {
        let session = {
            let mut core = self.core.lock().await;
            if core.state.status() == RecorderStatus::Idle {
                return Ok(None);
            }
            core.clock.reset();
            core.state.stop(Utc::now())?
        };

        self.sampler.lock().await.stop_sampling().await?;
        self.cancel_ticker().await;

        info!("session {} stopped with {} samples", session.id, session.samples.len());
        self.completed_tx.send_replace(Some(session.clone()));
        Ok(Some(session))
    }

    /// Suspend sampling and elapsed-time accounting.
    pub async fn pause_session(&self) -> Result<()> {
        let mut core = self.core.lock().await;
        core.state.pause()?;
        core.clock.pause(Instant::now());
        Ok(())
    }

    pub async fn resume_session(&self) -> Result<()> {
        let mut core = self.core.lock().await;
        core.state.resume()?;
        core.clock.resume(Instant::now());
        Ok(())
    }

    pub async fn snapshot(&self) -> RecorderSnapshot {
        let core = self.core.lock().await;
        let elapsed_secs = core.clock.active(Instant::now()).as_secs();
        let (session_id, target_secs, sample_count) = match core.state.session() {
            Some(session) => (
                Some(session.id.clone()),
                session.target_secs,
                session.samples.len(),
            ),
            None => (None, 0, 0),
        };

        RecorderSnapshot {
            status: core.state.status(),
            session_id,
            target_secs,
            elapsed_secs,
            remaining_secs: target_secs.saturating_sub(elapsed_secs),
            sample_count,
        }
    }

    /// Receives the finalized session whenever a run completes, whether the
    /// stop was manual or automatic.
    pub fn subscribe_completed(&self) -> watch::Receiver<Option<EmotionSession>> {
        self.completed_tx.subscribe()
    }

    pub async fn ingest_snapshot(&self) -> IngestSnapshot {
        self.metrics.snapshot().await
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let core = self.core.clone();
        let sampler = self.sampler.clone();
        let completed_tx = self.completed_tx.clone();
        let tick_interval = self.config.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            loop {
                interval.tick().await;

                let due = {
                    let core = core.lock().await;
                    if core.state.status() == RecorderStatus::Idle {
                        break;
                    }
                    let target_secs = core.state.session().map_or(0, |s| s.target_secs);
                    core.clock.active(Instant::now()) >= Duration::from_secs(target_secs)
                };
                if !due {
                    continue;
                }

                let finished = {
                    let mut core = core.lock().await;
                    if core.state.status() == RecorderStatus::Idle {
                        None
                    } else {
                        core.clock.reset();
                        match core.state.stop(Utc::now()) {
                            Ok(session) => Some(session),
                            Err(err) => {
                                error!("failed to finalize session at target: {err}");
                                None
                            }
                        }
                    }
                };

                if let Err(err) = sampler.lock().await.stop_sampling().await {
                    error!("failed to stop sampling after auto-stop: {err}");
                }

                if let Some(session) = finished {
                    info!(
                        "session {} reached its target and was finalized with {} samples",
                        session.id,
                        session.samples.len()
                    );
                    completed_tx.send_replace(Some(session));
                }

                break;
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn active_clock_excludes_paused_windows() {
        let mut clock = ActiveClock::default();
        clock.start(Instant::now());

        time::advance(Duration::from_secs(3)).await;
        clock.pause(Instant::now());

        time::advance(Duration::from_secs(10)).await;
        assert_eq!(clock.active(Instant::now()), Duration::from_secs(3));

        clock.resume(Instant::now());
        time::advance(Duration::from_secs(2)).await;
        assert_eq!(clock.active(Instant::now()), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn active_clock_reset_returns_to_zero() {
        let mut clock = ActiveClock::default();
        clock.start(Instant::now());
        time::advance(Duration::from_secs(4)).await;
        clock.reset();
        assert_eq!(clock.active(Instant::now()), Duration::ZERO);
    }
}
