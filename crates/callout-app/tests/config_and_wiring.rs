//! 설정 및 와이어링 통합 테스트.
//!
//! AppConfig → 어댑터 생성, 에이전트 클라이언트 ↔ 분석 서버 실연동 검증.

use callout_core::config::AppConfig;
use callout_core::config_manager::ConfigManager;
use callout_core::models::frame::CaptureFrame;
use callout_core::ports::advisory_api::AdvisoryApi;
use callout_network::HttpAdvisoryClient;
use callout_server::AnalysisServer;
use std::time::Duration;

#[test]
fn config_defaults_are_valid() {
    let config = AppConfig::default_config();

    // 에이전트 설정
    assert!(config.agent.endpoint_url.starts_with("http"));
    assert!(config.agent.capture_interval_ms > 0);
    assert!(config.agent.request_timeout_ms > 0);

    // 서버 설정
    assert!(config.server.port > 0);
    assert!(config.server.forward_url.is_none());

    // 비전 설정
    assert!(config.vision.target_width > 0);

    // 음성 설정
    assert!(!config.speech.language.is_empty());
}

#[test]
fn config_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let manager = ConfigManager::with_path(path.clone()).unwrap();
    manager
        .update_with(|c| {
            c.agent.endpoint_url = "http://10.0.0.7:5000/upload_screenshot".to_string();
            c.server.serve_client = true;
        })
        .unwrap();

    let reloaded = ConfigManager::with_path(path).unwrap();
    assert_eq!(
        reloaded.get().agent.endpoint_url,
        "http://10.0.0.7:5000/upload_screenshot"
    );
    assert!(reloaded.get().server.serve_client);
}

/// 1x1 픽셀 PNG 프레임 생성
fn tiny_frame() -> CaptureFrame {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        1,
        1,
        image::Rgba([0, 0, 255, 255]),
    ));
    let png = callout_vision::encoder::encode_png(&img).unwrap();
    CaptureFrame::new(png, (1, 1))
}

#[tokio::test]
async fn agent_client_roundtrips_with_real_server() {
    // 분석 서버를 임시 포트에 구동
    let server = AnalysisServer::from_config(AppConfig::default_config().server);
    let app = server.router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // 에이전트 클라이언트로 실제 업로드
    let client = HttpAdvisoryClient::new(
        &format!("http://{addr}/upload_screenshot"),
        Duration::from_secs(5),
    )
    .unwrap();

    let advisory = client.send_frame(&tiny_frame()).await;
    assert!(
        advisory.text.contains("Enemy spotted"),
        "권고: {}",
        advisory.text
    );
    assert!(advisory.is_speakable());
}

#[tokio::test]
async fn agent_client_absorbs_unreachable_server() {
    // 리스닝하지 않는 포트 — 전송 실패가 텍스트로 흡수되어야 함
    let client = HttpAdvisoryClient::new(
        "http://127.0.0.1:1/upload_screenshot",
        Duration::from_secs(2),
    )
    .unwrap();

    let advisory = client.send_frame(&tiny_frame()).await;
    assert!(advisory.text.starts_with("Request failed:"));
}
