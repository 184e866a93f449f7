//! API 에러 처리.
//!
//! 에러 본문 형태는 `{"error": <reason>}` — 캡처 에이전트와 브라우저
//! 클라이언트 모두 이 형태에 의존한다.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 멀티파트에 screenshot 필드 없음
    #[error("No screenshot provided")]
    MissingScreenshot,

    /// screenshot 필드의 파일 이름이 비어 있음
    #[error("No file selected")]
    EmptyFilename,

    /// 그 외 잘못된 요청 (멀티파트 파싱 실패 등)
    #[error("{0}")]
    BadRequest(String),

    /// 내부 서버 오류 (이미지 디코드 실패, 분석기 실패)
    #[error("{0}")]
    Internal(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingScreenshot | ApiError::EmptyFilename | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<callout_core::error::CoreError> for ApiError {
    fn from(err: callout_core::error::CoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
