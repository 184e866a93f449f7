//! 프레임 분석기 구현.
//!
//! `FrameAnalyzer` 포트의 두 구현:
//! - [`StubAnalyzer`] — 고정 권고 문구 (프로토타입 기본값)
//! - [`ForwardAnalyzer`] — 업스트림 분석 서비스로 포워딩, 실패 시 고정 문구 폴백
//!
//! 실제 추론 백엔드는 이 포트 뒤에 붙는다. HTTP 계층은 구현 교체와 무관하다.

use async_trait::async_trait;
use callout_core::config::ServerConfig;
use callout_core::error::CoreError;
use callout_core::ports::analyzer::FrameAnalyzer;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 프로토타입 고정 권고 문구
pub const STUB_ADVISORY: &str =
    "Screenshot received! Analysis: Enemy spotted at 3 o'clock. Reload and fire!";

/// 업스트림 포워딩 요청 타임아웃
const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

/// 스텁 분석기 — 항상 같은 권고 문구 반환
///
/// 요청 간 공유 상태 없음, 부수 효과 없음.
pub struct StubAnalyzer;

#[async_trait]
impl FrameAnalyzer for StubAnalyzer {
    async fn analyze(&self, image_bytes: &[u8]) -> Result<String, CoreError> {
        debug!("스텁 분석: {} bytes", image_bytes.len());
        Ok(STUB_ADVISORY.to_string())
    }
}

/// 포워딩 분석기 — 이미지를 업스트림 서비스로 재업로드하고 응답 텍스트 중계
///
/// 업스트림 실패는 요청을 실패시키지 않는다: 고정 권고 문구로 폴백한다.
pub struct ForwardAnalyzer {
    client: reqwest::Client,
    upstream_url: String,
}

impl ForwardAnalyzer {
    /// 새 포워딩 분석기 생성
    pub fn new(upstream_url: &str) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(FORWARD_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            upstream_url: upstream_url.to_string(),
        })
    }
}

#[async_trait]
impl FrameAnalyzer for ForwardAnalyzer {
    async fn analyze(&self, image_bytes: &[u8]) -> Result<String, CoreError> {
        let part = reqwest::multipart::Part::bytes(image_bytes.to_vec())
            .file_name("screenshot.png");
        let form = reqwest::multipart::Form::new().part("screenshot", part);

        let response = self
            .client
            .post(&self.upstream_url)
            .multipart(form)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(text) => {
                    debug!("업스트림 응답 수신: {} bytes", text.len());
                    Ok(text)
                }
                Err(e) => {
                    warn!("업스트림 응답 읽기 실패, 스텁으로 폴백: {e}");
                    Ok(STUB_ADVISORY.to_string())
                }
            },
            Ok(resp) => {
                warn!("업스트림 비정상 응답 {}, 스텁으로 폴백", resp.status());
                Ok(STUB_ADVISORY.to_string())
            }
            Err(e) => {
                warn!("업스트림 포워딩 실패, 스텁으로 폴백: {e}");
                Ok(STUB_ADVISORY.to_string())
            }
        }
    }
}

/// 서버 설정에 따른 분석기 선택
///
/// `forward_url`이 설정되어 있으면 포워딩, 아니면 스텁.
/// 포워딩 클라이언트 생성 실패 시에도 스텁으로 폴백한다.
pub fn analyzer_from_config(config: &ServerConfig) -> Arc<dyn FrameAnalyzer> {
    match &config.forward_url {
        Some(url) => match ForwardAnalyzer::new(url) {
            Ok(analyzer) => {
                info!("업스트림 포워딩 활성화: {url}");
                Arc::new(analyzer)
            }
            Err(e) => {
                warn!("포워딩 분석기 생성 실패, 스텁 사용: {e}");
                Arc::new(StubAnalyzer)
            }
        },
        None => Arc::new(StubAnalyzer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_returns_fixed_advisory() {
        let analyzer = StubAnalyzer;
        let text = analyzer.analyze(&[1, 2, 3]).await.unwrap();
        assert!(text.contains("Enemy spotted"));
    }

    #[tokio::test]
    async fn stub_is_idempotent() {
        let analyzer = StubAnalyzer;
        let a = analyzer.analyze(&[1]).await.unwrap();
        let b = analyzer.analyze(&[2]).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn forward_relays_upstream_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload_screenshot")
            .with_status(200)
            .with_body("Flank left!")
            .create_async()
            .await;

        let url = format!("{}/upload_screenshot", server.url());
        let analyzer = ForwardAnalyzer::new(&url).unwrap();

        let text = analyzer.analyze(&[9, 9]).await.unwrap();
        assert_eq!(text, "Flank left!");
    }

    #[tokio::test]
    async fn forward_falls_back_on_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/upload_screenshot")
            .with_status(503)
            .create_async()
            .await;

        let url = format!("{}/upload_screenshot", server.url());
        let analyzer = ForwardAnalyzer::new(&url).unwrap();

        let text = analyzer.analyze(&[9, 9]).await.unwrap();
        assert_eq!(text, STUB_ADVISORY);
    }

    #[tokio::test]
    async fn forward_falls_back_on_connection_refused() {
        let analyzer = ForwardAnalyzer::new("http://127.0.0.1:1/upload_screenshot").unwrap();
        let text = analyzer.analyze(&[1]).await.unwrap();
        assert_eq!(text, STUB_ADVISORY);
    }

    #[tokio::test]
    async fn config_without_forward_url_uses_stub() {
        let config = ServerConfig::default();
        let analyzer = analyzer_from_config(&config);
        let text = analyzer.analyze(&[0]).await.unwrap();
        assert_eq!(text, STUB_ADVISORY);
    }
}
