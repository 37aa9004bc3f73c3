//! Registration and periodic heartbeat.
//!
//! # Responsibilities
//! - Best-effort registration at startup
//! - Periodic heartbeats until shutdown
//!
//! # Design Decisions
//! - First heartbeat goes out one interval after start
//! - A failed heartbeat is logged; the loop keeps ticking
//! - Missed ticks are delayed, not burst

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::agent::{AgentClient, AgentError, AgentResult};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Register with the agent, returning whether it succeeded.
pub async fn auto_register(client: &dyn AgentClient) -> bool {
    match client.register().await {
        Ok(()) => {
            tracing::info!("Registered with agent");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to register with agent");
            tracing::warn!("Continuing without agent registration");
            false
        }
    }
}

/// Spawn the heartbeat loop.
///
/// The task runs until `shutdown` is triggered.
pub fn start_heartbeat(
    client: Arc<dyn AgentClient>,
    interval: Duration,
    shutdown: &Shutdown,
) -> AgentResult<JoinHandle<()>> {
    if interval.is_zero() {
        return Err(AgentError::InvalidInterval);
    }

    let stop = shutdown.wait();
    let handle = tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(stop);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match client.heartbeat().await {
                        Ok(()) => {
                            metrics::record_heartbeat(true);
                            tracing::debug!("Heartbeat sent");
                        }
                        Err(e) => {
                            metrics::record_heartbeat(false);
                            tracing::warn!(error = %e, "Heartbeat failed");
                        }
                    }
                }
                _ = &mut stop => {
                    tracing::info!("Heartbeat received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    });

    tracing::info!(interval_secs = interval.as_secs_f64(), "Heartbeat started");
    Ok(handle)
}
