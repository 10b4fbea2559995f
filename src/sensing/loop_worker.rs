use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::metrics::IngestMetrics;
use crate::recorder::{RecorderConfig, RecorderCore, RecorderStatus};

use super::analyzer::ExpressionAnalyzer;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = false;

use crate::{log_error, log_info};

/// Fixed-interval sampling loop: one analyzer call per tick, one serialized
/// append attempt per classification. Exits when the session goes idle or the
/// cancellation token fires.
pub(crate) async fn sampling_loop(
    core: Arc<Mutex<RecorderCore>>,
    analyzer: Arc<dyn ExpressionAnalyzer>,
    metrics: IngestMetrics,
    config: RecorderConfig,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(config.sample_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match core.lock().await.state.status() {
                    RecorderStatus::Idle => break,
                    RecorderStatus::Paused => continue,
                    RecorderStatus::Recording => {}
                }

                let scores = match analyzer.analyze() {
                    Ok(Some(scores)) => scores,
                    Ok(None) => {
                        metrics.record_empty_frame().await;
                        continue;
                    }
                    Err(err) => {
                        log_error!("frame analysis failed: {err:?}");
                        metrics.record_analyzer_error().await;
                        continue;
                    }
                };

                let outcome = {
                    let mut core = core.lock().await;
                    let elapsed_secs = core.clock.active(Instant::now()).as_secs_f64().round() as u64;
                    core.state.record(scores, elapsed_secs, &config)
                };
                metrics.record_outcome(outcome).await;
            }
            _ = cancel_token.cancelled() => {
                log_info!("sampling loop shutting down");
                break;
            }
        }
    }
}
