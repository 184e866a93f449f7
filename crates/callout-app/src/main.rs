//! # callout-app
//!
//! CALLOUT 바이너리 진입점.
//! `callout agent` — 로컬 캡처 에이전트 루프, `callout serve` — 분석 서버.
//! DI 컨테이너 역할: 설정 로드 → 어댑터 생성 → 루프/서버 구동.

mod capture_loop;
mod lifecycle;

use anyhow::{Context, Result};
use callout_core::config::AppConfig;
use callout_core::config_manager::ConfigManager;
use callout_core::error::CoreError;
use callout_core::ports::speech::SpeechSynthesizer;
use callout_network::HttpAdvisoryClient;
use callout_server::AnalysisServer;
use callout_speech::CliSynthesizer;
use callout_vision::CaptureProcessor;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::capture_loop::{CaptureLoop, CaptureLoopConfig};
use crate::lifecycle::Lifecycle;

/// CALLOUT 게임 어시스턴트
///
/// 화면 캡처 → 분석 서버 업로드 → 권고 텍스트 음성 재생
#[derive(Parser, Debug)]
#[command(name = "callout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 로컬 캡처 에이전트 실행
    Agent {
        /// 업로드 엔드포인트 URL (기본: http://localhost:5000/upload_screenshot)
        #[arg(long, short = 's')]
        server: Option<String>,

        /// 캡처 간격 (밀리초)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// 캡처 대상 모니터 인덱스 (기본: 주 모니터)
        #[arg(long)]
        monitor: Option<usize>,

        /// 음성 재생 비활성화 (텍스트/로그만)
        #[arg(long, short = 'm')]
        mute: bool,

        /// 한 틱만 실행하고 종료 (수동 점검용)
        #[arg(long)]
        once: bool,
    },

    /// 분석 서버 실행
    Serve {
        /// 리스닝 포트 (기본: 5000, PORT 환경변수로도 지정 가능)
        #[arg(long, short = 'p')]
        port: Option<u16>,

        /// GET /에서 브라우저 캡처 클라이언트 서빙
        #[arg(long)]
        serve_client: bool,

        /// 업스트림 분석 서비스 URL (스크린샷 포워딩)
        #[arg(long)]
        forward_url: Option<String>,

        /// 로컬호스트에서만 수신 (기본: 외부 접속 허용)
        #[arg(long)]
        local_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 로깅 초기화 — RUST_LOG가 있으면 우선
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 설정 로드: 파일 → 환경변수 순서로 적용, CLI 플래그가 최종 우선
    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }
    .context("설정 로드 실패")?;

    let mut config = config_manager.get();
    config.apply_env();

    match cli.command {
        Command::Agent {
            server,
            interval_ms,
            monitor,
            mute,
            once,
        } => {
            if let Some(url) = server {
                config.agent.endpoint_url = url;
            }
            if let Some(ms) = interval_ms {
                config.agent.capture_interval_ms = ms;
            }
            if monitor.is_some() {
                config.agent.monitor_index = monitor;
            }
            if mute {
                config.speech.enabled = false;
            }
            run_agent(config, once).await
        }
        Command::Serve {
            port,
            serve_client,
            forward_url,
            local_only,
        } => {
            if let Some(p) = port {
                config.server.port = p;
            }
            if serve_client {
                config.server.serve_client = true;
            }
            if forward_url.is_some() {
                config.server.forward_url = forward_url;
            }
            if local_only {
                config.server.allow_external = false;
            }
            run_server(config).await
        }
    }
}

/// 캡처 에이전트 구동
async fn run_agent(config: AppConfig, once: bool) -> Result<()> {
    let frame_source = Arc::new(CaptureProcessor::new(
        config.agent.monitor_index,
        config.vision.clone(),
    ));

    let advisory_api = Arc::new(
        HttpAdvisoryClient::new(
            &config.agent.endpoint_url,
            Duration::from_millis(config.agent.request_timeout_ms),
        )
        .map_err(|e| anyhow::anyhow!("업로드 클라이언트 생성 실패: {e}"))?,
    );

    // 합성 엔진이 없어도 에이전트는 동작한다 — 재생만 비활성화
    let synthesizer: Option<Arc<dyn SpeechSynthesizer>> = if config.speech.enabled {
        match CliSynthesizer::from_environment() {
            Ok(synth) => Some(Arc::new(synth)),
            Err(CoreError::SynthesisUnavailable(reason)) => {
                warn!("음성 재생 비활성화: {reason}");
                None
            }
            Err(e) => return Err(anyhow::anyhow!("합성기 초기화 실패: {e}")),
        }
    } else {
        info!("음성 재생 비활성화 (설정)");
        None
    };

    let capture_loop = CaptureLoop::new(
        CaptureLoopConfig {
            interval: Duration::from_millis(config.agent.capture_interval_ms),
            language: config.speech.language.clone(),
        },
        frame_source,
        advisory_api,
        synthesizer,
    );

    info!("캡처 에이전트 시작: 엔드포인트={}", config.agent.endpoint_url);

    if once {
        let outcome = capture_loop.run_once().await;
        info!("단일 틱 완료: {outcome:?}");
        return Ok(());
    }

    let lifecycle = Lifecycle::new();
    let shutdown_rx = lifecycle.subscribe();
    tokio::spawn(async move {
        lifecycle.wait_for_signal().await;
    });

    capture_loop.run(shutdown_rx).await;
    info!("캡처 에이전트 종료");
    Ok(())
}

/// 분석 서버 구동
async fn run_server(config: AppConfig) -> Result<()> {
    let server = AnalysisServer::from_config(config.server.clone());

    let lifecycle = Lifecycle::new();
    let shutdown_rx = lifecycle.subscribe();
    tokio::spawn(async move {
        lifecycle.wait_for_signal().await;
    });

    server.run(shutdown_rx).await.context("분석 서버 실행 실패")?;
    Ok(())
}
