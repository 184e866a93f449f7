//! # callout-speech
//!
//! 권고 텍스트 음성 재생 어댑터.
//! 로컬 CLI 엔진(piper, espeak-ng, say)으로 합성하고 CLI 재생기로 재생한다.
//! 엔진/재생기가 없으면 `SynthesisUnavailable` — 호출자는 재생을 건너뛴다.
//!
//! 브라우저 배포 변형에서는 이 어댑터 대신 플랫폼 내장
//! speechSynthesis가 같은 의미로 동작한다 (`callout-server`의 임베드 클라이언트).

pub mod engine;
pub mod synthesizer;

pub use engine::{resolve_engine, resolve_player, SynthesisEngine};
pub use synthesizer::CliSynthesizer;
