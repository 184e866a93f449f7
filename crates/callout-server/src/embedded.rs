//! 브라우저 캡처 클라이언트 임베드.
//!
//! rust-embed로 `web/` 디렉토리를 바이너리에 포함한다.
//! 브라우저 배포 변형에서 `GET /`가 이 페이지를 반환하면, 캡처 에이전트가
//! 브라우저 안에서 동작한다 (화면 공유 → 캔버스 다운스케일 → 주기 업로드 →
//! speechSynthesis 재생).

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use rust_embed::Embed;
use tracing::error;

/// 브라우저 캡처 클라이언트 자산
#[derive(Embed)]
#[folder = "web"]
#[include = "*.html"]
struct Assets;

/// 캡처 클라이언트 페이지 응답
pub fn client_page() -> Response {
    match Assets::get("index.html") {
        Some(content) => {
            let mime = mime_guess::from_path("index.html").first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => {
            // 임베드 자산 누락은 빌드 구성 오류
            error!("임베드 클라이언트 자산 없음: index.html");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>client asset missing</h1>".to_string()),
            )
                .into_response()
        }
    }
}
