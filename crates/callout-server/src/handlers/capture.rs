//! 캡처 업로드 API 핸들러.
//!
//! 와이어 계약:
//! - `GET /` — liveness JSON 또는 브라우저 캡처 클라이언트 HTML
//! - `POST /start_capture` — `{"status":"success","message":...}` (멱등)
//! - `POST /upload_screenshot` — 멀티파트 `screenshot` 필드 → 평문 권고 텍스트

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};

use crate::embedded;
use crate::error::ApiError;
use crate::AppState;

/// 멀티파트 필드 이름 (클라이언트 계약)
const UPLOAD_FIELD_NAME: &str = "screenshot";

/// liveness 응답 본문
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    /// 상태 안내 메시지
    pub message: String,
}

/// 캡처 시작 응답 본문
#[derive(Debug, Serialize)]
pub struct StartCaptureResponse {
    /// 처리 상태 ("success" 고정)
    pub status: String,
    /// 안내 메시지
    pub message: String,
}

/// liveness 또는 브라우저 캡처 클라이언트
///
/// GET /
pub async fn home(State(state): State<AppState>) -> Response {
    if state.serve_client {
        embedded::client_page()
    } else {
        Json(HomeResponse {
            message: "CALLOUT advisory server running! POST to /upload_screenshot.".to_string(),
        })
        .into_response()
    }
}

/// 캡처 시작 트리거 (클라이언트 앱용)
///
/// POST /start_capture — 멱등: 서버는 상태를 갖지 않으므로 항상 같은 응답
pub async fn start_capture() -> Json<StartCaptureResponse> {
    Json(StartCaptureResponse {
        status: "success".to_string(),
        message: "Capture started! Send screenshots to /upload_screenshot.".to_string(),
    })
}

/// 스크린샷 수신 → 분석 → 권고 텍스트 반환
///
/// POST /upload_screenshot
///
/// 응답은 평문 텍스트 — 에이전트가 그대로 음성 합성에 넘긴다.
pub async fn upload_screenshot(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    // 멀티파트가 아예 아닌 요청도 "스크린샷 없음"으로 취급한다
    let mut multipart = multipart.map_err(|_| ApiError::MissingScreenshot)?;

    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = upload.ok_or(ApiError::MissingScreenshot)?;
    if filename.is_empty() {
        return Err(ApiError::EmptyFilename);
    }

    // 이미지 디코드 검증 — 깨진 업로드는 분석기에 도달하지 않는다
    let decoded = image::load_from_memory(&data).map_err(|e| {
        warn!("업로드 이미지 디코드 실패: {e}");
        ApiError::Internal(e.to_string())
    })?;

    debug!(
        "스크린샷 수신: {} bytes, {}x{}",
        data.len(),
        decoded.width(),
        decoded.height()
    );

    let advisory = state.analyzer.analyze(&data).await?;
    Ok(advisory.into_response())
}
