//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // liveness / 브라우저 캡처 클라이언트
        .route("/", get(handlers::capture::home))
        // 캡처 시작 트리거
        .route("/start_capture", post(handlers::capture::start_capture))
        // 스크린샷 업로드 → 권고 텍스트
        .route(
            "/upload_screenshot",
            post(handlers::capture::upload_screenshot),
        )
}
