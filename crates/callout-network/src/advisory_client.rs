//! 권고 업로드 클라이언트.
//!
//! `AdvisoryApi` 포트 구현. 프레임 하나를 멀티파트 업로드하고 응답 본문을
//! 권고 텍스트로 반환한다. 모든 실패는 권고 텍스트 채널로 흡수된다 —
//! 단일 요청 실패가 캡처 루프를 중단시키지 않는다.

use async_trait::async_trait;
use callout_core::error::CoreError;
use callout_core::models::advisory::AdvisoryMessage;
use callout_core::models::frame::CaptureFrame;
use callout_core::ports::advisory_api::AdvisoryApi;
use std::time::Duration;
use tracing::{debug, warn};

/// 멀티파트 필드 이름 (서버 계약)
const UPLOAD_FIELD_NAME: &str = "screenshot";

/// 업로드 파일 이름
const UPLOAD_FILE_NAME: &str = "screenshot.png";

/// HTTP 권고 클라이언트 — `AdvisoryApi` 포트 구현
pub struct HttpAdvisoryClient {
    client: reqwest::Client,
    endpoint_url: String,
}

impl HttpAdvisoryClient {
    /// 새 권고 클라이언트 생성
    ///
    /// `timeout`은 업로드 호출 전체에 적용된다. 응답이 멈춰도 루프가
    /// 무한정 정지하지 않도록 상한이 있어야 한다.
    pub fn new(endpoint_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.to_string(),
        })
    }
}

#[async_trait]
impl AdvisoryApi for HttpAdvisoryClient {
    async fn send_frame(&self, frame: &CaptureFrame) -> AdvisoryMessage {
        debug!(
            "프레임 업로드: {} bytes, 해상도 {}x{}",
            frame.size_bytes(),
            frame.resolution.0,
            frame.resolution.1
        );

        let part = reqwest::multipart::Part::bytes(frame.png.clone())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str("image/png")
            .unwrap_or_else(|_| {
                reqwest::multipart::Part::bytes(frame.png.clone()).file_name(UPLOAD_FILE_NAME)
            });
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await;

        let text = match response {
            Ok(resp) if resp.status().is_success() => resp.text().await.unwrap_or_else(|e| {
                warn!("응답 본문 읽기 실패: {e}");
                format!("Request failed: {e}")
            }),
            Ok(resp) => {
                // 비-2xx — 상태 코드를 합성 권고 텍스트로 변환
                let status = resp.status().as_u16();
                warn!("업로드 비정상 응답: {status}");
                format!("Error: {status}")
            }
            Err(e) => {
                // 전송 실패 (타임아웃, DNS, 연결 거부) — 역시 텍스트로 흡수
                warn!("업로드 전송 실패: {e}");
                format!("Request failed: {e}")
            }
        };

        AdvisoryMessage::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame() -> CaptureFrame {
        CaptureFrame::new(vec![0x89, b'P', b'N', b'G'], (100, 50))
    }

    #[tokio::test]
    async fn success_response_body_becomes_advisory() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload_screenshot")
            .with_status(200)
            .with_body("Enemy spotted at 3 o'clock")
            .create_async()
            .await;

        let url = format!("{}/upload_screenshot", server.url());
        let client = HttpAdvisoryClient::new(&url, Duration::from_secs(5)).unwrap();

        let advisory = client.send_frame(&make_frame()).await;
        assert_eq!(advisory.text, "Enemy spotted at 3 o'clock");
        assert!(advisory.is_speakable());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_becomes_error_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload_screenshot")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let url = format!("{}/upload_screenshot", server.url());
        let client = HttpAdvisoryClient::new(&url, Duration::from_secs(5)).unwrap();

        let advisory = client.send_frame(&make_frame()).await;
        assert_eq!(advisory.text, "Error: 500");
    }

    #[tokio::test]
    async fn connection_refused_becomes_request_failed_text() {
        // 아무도 리스닝하지 않는 포트
        let client =
            HttpAdvisoryClient::new("http://127.0.0.1:1/upload_screenshot", Duration::from_secs(2))
                .unwrap();

        let advisory = client.send_frame(&make_frame()).await;
        assert!(
            advisory.text.starts_with("Request failed:"),
            "예상과 다른 텍스트: {}",
            advisory.text
        );
    }

    #[tokio::test]
    async fn multipart_field_name_matches_contract() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload_screenshot")
            .match_body(mockito::Matcher::Regex(
                "name=\"screenshot\"".to_string(),
            ))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let url = format!("{}/upload_screenshot", server.url());
        let client = HttpAdvisoryClient::new(&url, Duration::from_secs(5)).unwrap();

        let advisory = client.send_frame(&make_frame()).await;
        assert_eq!(advisory.text, "ok");
        mock.assert_async().await;
    }
}
