use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::core::health::{HealthReport, HealthState, MemoryUsage};

pub fn router(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/health", get(health_handler).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
}

/// Serve the health endpoint on `0.0.0.0:{port}` until the process exits.
pub async fn serve(port: u16, state: Arc<HealthState>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Health check server listening");
    axum::serve(listener, router(state)).await
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> Json<HealthReport> {
    Json(state.report(memory_usage()))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

fn memory_usage() -> MemoryUsage {
    MemoryUsage {
        rss: resident_set_size(),
    }
}

// Linux only; elsewhere the field is reported as null.
fn resident_set_size() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_of(response: axum::response::Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn health_reports_server_count() {
        let state = Arc::new(HealthState::new());
        state.set_server_count(12);

        let response = router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["servers"], 12);
        assert!(json["uptime"].is_u64());
        assert!(json.get("memory").is_some());
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn other_paths_and_methods_are_not_found() {
        let app = router(Arc::new(HealthState::new()));

        let response = app
            .clone()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, b"Not Found");

        let response = app
            .oneshot(Request::post("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
