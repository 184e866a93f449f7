//! 음성 합성 포트.
//!
//! 구현: `callout-speech` crate (CLI 엔진 기반)

use async_trait::async_trait;

use crate::error::CoreError;

/// 음성 합성기 — 텍스트를 오디오로 변환하고 재생
///
/// 합성 엔진이 없거나 실행에 실패하면 `CoreError::SynthesisUnavailable`.
/// 호출자는 이를 치명적이지 않은 실패로 취급하고 재생만 건너뛴다.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// 텍스트를 오디오 바이트(WAV)로 합성
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, CoreError>;

    /// 오디오를 재생하고 재생이 끝날 때까지 대기
    ///
    /// 출력 장치와 스테이징 임시 파일은 스코프 단위로 획득/해제된다.
    async fn play(&self, audio: &[u8]) -> Result<(), CoreError>;
}
