/// Health check endpoint
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::context::ApiContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub config: String,
    #[serde(rename = "submissionLog")]
    pub submission_log: String,
}

/// Health check handler
///
/// The submission log is best effort, so a missing log directory degrades
/// the report without failing submissions.
pub async fn handler(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let config = ctx.notifications.config();

    let config_status = match config.validate() {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            warn!("Configuration check failed: {}", e);
            "error".to_string()
        }
    };

    let log_dir = config
        .log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let log_status = match tokio::fs::metadata(log_dir).await {
        Ok(meta) if meta.is_dir() => "ok".to_string(),
        Ok(_) => "unavailable".to_string(),
        Err(e) => {
            warn!("Submission log directory check failed: {}", e);
            "unavailable".to_string()
        }
    };

    let all_healthy = config_status == "ok" && log_status == "ok";

    let response = HealthResponse {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks: HealthChecks {
            config: config_status,
            submission_log: log_status,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_structure() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: "2025-11-03T10:00:00Z".to_string(),
            checks: HealthChecks {
                config: "ok".to_string(),
                submission_log: "ok".to_string(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["checks"]["submissionLog"], "ok");
    }
}
