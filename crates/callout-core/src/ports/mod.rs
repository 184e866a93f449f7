//! Hexagonal Architecture 포트 인터페이스.
//!
//! 어댑터 crate가 구현하는 trait 정의:
//! - [`frame_source`] — 스크린 캡처 (구현: `callout-vision`)
//! - [`advisory_api`] — 프레임 업로드 클라이언트 (구현: `callout-network`)
//! - [`analyzer`] — 이미지 → 권고 텍스트 분석 (구현: `callout-server`)
//! - [`speech`] — 음성 합성/재생 (구현: `callout-speech`)

pub mod advisory_api;
pub mod analyzer;
pub mod frame_source;
pub mod speech;
