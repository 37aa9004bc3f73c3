use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::health::unix_timestamp;
use crate::http::server::AppState;

/// Body of the info response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub service: String,
    pub version: String,
    pub timestamp: u64,
    /// Human readable, e.g. "1h2m3s".
    pub uptime: String,
    pub uptime_seconds: u64,
}

pub async fn service_info(State(state): State<AppState>) -> Json<InfoResponse> {
    let uptime = state.started_at.elapsed();
    Json(InfoResponse {
        service: state.service.name.clone(),
        version: state.service.version.clone(),
        timestamp: unix_timestamp(),
        uptime: format_uptime(uptime),
        uptime_seconds: uptime.as_secs(),
    })
}

/// Render a duration with whole-second precision, dropping leading zero units.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::ZERO), "0s");
        assert_eq!(format_uptime(Duration::from_millis(45_900)), "45s");
        assert_eq!(format_uptime(Duration::from_secs(60)), "1m0s");
        assert_eq!(format_uptime(Duration::from_secs(3723)), "1h2m3s");
        assert_eq!(format_uptime(Duration::from_secs(90_000)), "25h0m0s");
    }
}
