//! # callout-network
//!
//! 캡처 에이전트의 네트워크 어댑터.
//! 프레임 멀티파트 업로드 → 권고 텍스트 수신 (`AdvisoryApi` 포트 구현).

pub mod advisory_client;

pub use advisory_client::HttpAdvisoryClient;
