//! 프레임 소스 포트.
//!
//! 구현: `callout-vision` crate (xcap, image, fast_image_resize)

use crate::error::CoreError;
use crate::models::frame::CaptureFrame;

/// 스크린 캡처 소스 — 현재 화면을 PNG 프레임으로 반환
///
/// 캡처는 블로킹 호출이다. 비동기 루프에서는 `spawn_blocking`으로 감싼다.
pub trait FrameSource: Send + Sync {
    /// 현재 화면 캡처.
    ///
    /// 디스플레이에 접근할 수 없으면 `CoreError::CaptureUnavailable`.
    fn capture(&self) -> Result<CaptureFrame, CoreError>;
}
