//! 캡처 파이프라인.
//!
//! 캡처 → 다운스케일 → PNG 인코딩을 묶어 `FrameSource` 포트를 구현한다.

use callout_core::config::VisionConfig;
use callout_core::error::CoreError;
use callout_core::models::frame::CaptureFrame;
use callout_core::ports::frame_source::FrameSource;

use crate::capture::ScreenCapture;
use crate::encoder::encode_png;
use crate::scaler::downscale_to_width;

/// 캡처 프로세서 — `FrameSource` 포트 구현
///
/// 틱마다 화면을 캡처해 설정된 목표 너비로 축소한 뒤 PNG로 인코딩한다.
/// 프레임에는 캡처 원본 해상도가 기록된다.
pub struct CaptureProcessor {
    screen: ScreenCapture,
    config: VisionConfig,
}

impl CaptureProcessor {
    /// 새 캡처 프로세서 생성
    pub fn new(monitor_index: Option<usize>, config: VisionConfig) -> Self {
        Self {
            screen: ScreenCapture::new(monitor_index),
            config,
        }
    }
}

impl FrameSource for CaptureProcessor {
    fn capture(&self) -> Result<CaptureFrame, CoreError> {
        let image = self.screen.grab()?;
        let source_resolution = (image.width(), image.height());

        let scaled = downscale_to_width(&image, self.config.target_width)?;
        let png = encode_png(&scaled)?;

        Ok(CaptureFrame::new(png, source_resolution))
    }
}
