//! 캡처 루프.
//!
//! 캡처 → 업로드 → 재생 → 대기를 엄격히 순차 실행한다.
//! 동시에 전송 중인 프레임은 항상 하나뿐이다 — 업로드 큐도, 프레임 버퍼도 없다.
//! 인터럽트를 제외한 어떤 실패도 루프를 중단시키지 않는다.

use callout_core::error::CoreError;
use callout_core::models::advisory::AdvisoryMessage;
use callout_core::ports::advisory_api::AdvisoryApi;
use callout_core::ports::frame_source::FrameSource;
use callout_core::ports::speech::SpeechSynthesizer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// 캡처 루프 설정
pub struct CaptureLoopConfig {
    /// 틱 간격 — 재생 종료 후 다음 캡처까지
    pub interval: Duration,
    /// 합성 언어 태그
    pub language: String,
}

impl Default for CaptureLoopConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            language: "en".to_string(),
        }
    }
}

/// 한 틱의 처리 결과
#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// 캡처 실패 — 이번 틱 건너뜀
    CaptureFailed,
    /// 권고 수신, 재생까지 완료 (또는 재생 비활성/불가로 건너뜀)
    Advised(String),
}

/// 캡처 루프
///
/// 포트 뒤의 구현만 바꾸면 로컬/테스트 구성이 동일한 루프를 공유한다.
pub struct CaptureLoop {
    config: CaptureLoopConfig,
    frame_source: Arc<dyn FrameSource>,
    advisory_api: Arc<dyn AdvisoryApi>,
    /// 음성 합성기 — `None`이면 텍스트/로그 전용 모드
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
}

impl CaptureLoop {
    /// 새 캡처 루프 생성
    pub fn new(
        config: CaptureLoopConfig,
        frame_source: Arc<dyn FrameSource>,
        advisory_api: Arc<dyn AdvisoryApi>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        Self {
            config,
            frame_source,
            advisory_api,
            synthesizer,
        }
    }

    /// 루프 실행 — 종료 신호 수신까지 반복
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "캡처 루프 시작: 간격={}ms, 음성={}",
            self.config.interval.as_millis(),
            self.synthesizer.is_some()
        );

        let mut interval = tokio::time::interval(self.config.interval);
        // 재생이 간격보다 길어도 틱이 몰리지 않도록 지연 처리
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let _ = self.run_once().await;
                }
                changed = shutdown_rx.changed() => {
                    // 송신자 드롭도 종료로 취급
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("캡처 루프 종료");
                        break;
                    }
                }
            }
        }
    }

    /// 한 틱 실행: 캡처 → 업로드 → 재생
    ///
    /// 실패 정책:
    /// - 캡처 실패 → 로그, 재생 없이 이번 틱 종료
    /// - 업로드 실패 → `AdvisoryApi`가 실패 설명 텍스트로 흡수 (여기 도달하는
    ///   권고는 항상 유효)
    /// - 합성/재생 실패 → 로그, 재생만 건너뜀
    pub async fn run_once(&self) -> TickOutcome {
        // 캡처는 블로킹 — 워커 스레드에서 실행
        let source = self.frame_source.clone();
        let captured = tokio::task::spawn_blocking(move || source.capture()).await;

        let frame = match captured {
            Ok(Ok(frame)) => frame,
            Ok(Err(e)) => {
                warn!("캡처 실패, 이번 틱 건너뜀: {e}");
                return TickOutcome::CaptureFailed;
            }
            Err(e) => {
                warn!("캡처 태스크 실패, 이번 틱 건너뜀: {e}");
                return TickOutcome::CaptureFailed;
            }
        };

        debug!(
            "프레임 캡처: {} bytes, {}x{}",
            frame.size_bytes(),
            frame.resolution.0,
            frame.resolution.1
        );

        // 업로드 — 실패는 권고 텍스트로 흡수되어 돌아온다
        let advisory = self.advisory_api.send_frame(&frame).await;
        drop(frame); // 프레임은 업로드 직후 폐기

        info!("권고 수신: {}", advisory.text);

        self.speak(&advisory).await;

        TickOutcome::Advised(advisory.text)
    }

    /// 권고 재생 — 비활성/공백/합성 불가 시 건너뜀
    async fn speak(&self, advisory: &AdvisoryMessage) {
        let Some(synthesizer) = &self.synthesizer else {
            return;
        };
        if !advisory.is_speakable() {
            debug!("공백 권고 — 재생 건너뜀");
            return;
        }

        match synthesizer
            .synthesize(&advisory.text, &self.config.language)
            .await
        {
            Ok(audio) => {
                // 재생 종료까지 대기 — 다음 캡처는 그 뒤에 온다
                if let Err(e) = synthesizer.play(&audio).await {
                    warn!("재생 실패, 건너뜀: {e}");
                }
            }
            Err(CoreError::SynthesisUnavailable(reason)) => {
                warn!("합성 엔진 사용 불가, 재생 건너뜀: {reason}");
            }
            Err(e) => {
                warn!("합성 실패, 재생 건너뜀: {e}");
            }
        }
    }
}
