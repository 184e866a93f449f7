//! # callout-server
//!
//! 분석 서버.
//! Axum 기반 — 스크린샷 멀티파트 업로드를 받아 권고 텍스트를 반환한다.
//!
//! ## 기능
//! - `POST /upload_screenshot` — 이미지 수신 → 분석기 → 평문 권고
//! - `POST /start_capture` — 캡처 시작 트리거 (멱등)
//! - `GET /` — liveness 또는 브라우저 캡처 클라이언트
//!
//! 요청 간 공유 가변 상태 없음 — 상태는 분석기 핸들과 설정뿐이다.
//! 인스턴스마다 독립된 `ServerConfig`를 받으므로 테스트에서 서로 다른
//! 설정의 서버를 동시에 띄울 수 있다.

pub mod analyzer;
pub mod embedded;
pub mod error;
pub mod handlers;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use callout_core::config::ServerConfig;
use callout_core::ports::analyzer::FrameAnalyzer;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 업로드 본문 최대 크기 — 전체 해상도 PNG 스크린샷 여유분
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 프레임 분석기 (확장 지점)
    pub analyzer: Arc<dyn FrameAnalyzer>,
    /// `GET /`에서 브라우저 캡처 클라이언트 서빙 여부
    pub serve_client: bool,
}

/// 분석 서버
pub struct AnalysisServer {
    config: ServerConfig,
    state: AppState,
}

impl AnalysisServer {
    /// 새 분석 서버 생성
    ///
    /// 분석기를 명시적으로 주입한다 — 실제 추론 백엔드 교체는
    /// 이 인자만 바꾸면 된다.
    pub fn new(config: ServerConfig, analyzer: Arc<dyn FrameAnalyzer>) -> Self {
        let serve_client = config.serve_client;
        Self {
            config,
            state: AppState {
                analyzer,
                serve_client,
            },
        }
    }

    /// 설정 기본 분석기(스텁 또는 포워딩)로 서버 생성
    pub fn from_config(config: ServerConfig) -> Self {
        let analyzer = analyzer::analyzer_from_config(&config);
        Self::new(config, analyzer)
    }

    /// 라우터 구성 (미들웨어 포함)
    ///
    /// 테스트에서 소켓 없이 `tower::ServiceExt::oneshot`으로 직접 호출할 수 있다.
    pub fn router(&self) -> Router {
        routes::api_routes()
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 설정 포트부터 시작해 사용 중이면 다음 포트를 시도한다 (최대 10개).
    /// 종료 신호 수신 시 graceful shutdown.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };
        let base_port = self.config.port;
        let app = self.router();

        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);
            if port < base_port && attempt > 0 {
                break; // u16 오버플로우
            }

            let addr = SocketAddr::new(
                host.parse().map_err(|e| {
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{e}"))
                })?,
                port,
            );

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {base_port} 사용 불가, 대체 포트 {port} 사용");
                    }
                    info!("분석 서버 시작: http://{addr}");

                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("분석 서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    info!("분석 서버 종료");
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                    warn!("포트 {port} 이미 사용 중, 다음 포트 시도...");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}
