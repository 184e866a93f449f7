//! 스크린 캡처.
//!
//! xcap 기반. 설정된 모니터 인덱스 또는 주 모니터를 캡처한다.

use callout_core::error::CoreError;
use image::DynamicImage;
use tracing::debug;
use xcap::Monitor;

/// 스크린 캡처 — xcap 기반
///
/// `monitor_index`가 `None`이면 주 모니터, 주 모니터 판별이 불가능하면
/// 첫 번째 모니터로 폴백한다.
pub struct ScreenCapture {
    monitor_index: Option<usize>,
}

impl ScreenCapture {
    /// 새 캡처 인스턴스 생성
    pub fn new(monitor_index: Option<usize>) -> Self {
        Self { monitor_index }
    }

    /// 현재 화면 캡처
    ///
    /// 디스플레이 접근 불가(권한 거부, 디스플레이 서버 없음, 잘못된 인덱스)는
    /// 모두 `CoreError::CaptureUnavailable`로 매핑된다.
    pub fn grab(&self) -> Result<DynamicImage, CoreError> {
        let monitors = Monitor::all()
            .map_err(|e| CoreError::CaptureUnavailable(format!("모니터 목록 조회 실패: {e}")))?;

        if monitors.is_empty() {
            return Err(CoreError::CaptureUnavailable(
                "모니터를 찾을 수 없음".to_string(),
            ));
        }

        let monitor = match self.monitor_index {
            Some(index) => monitors.into_iter().nth(index).ok_or_else(|| {
                CoreError::CaptureUnavailable(format!("모니터 인덱스 {index} 없음"))
            })?,
            None => {
                // 주 모니터 우선, 판별 실패 시 첫 번째 모니터
                let pos = monitors
                    .iter()
                    .position(|m| m.is_primary().unwrap_or(false))
                    .unwrap_or(0);
                monitors.into_iter().nth(pos).ok_or_else(|| {
                    CoreError::CaptureUnavailable("모니터를 찾을 수 없음".to_string())
                })?
            }
        };

        let image = monitor
            .capture_image()
            .map_err(|e| CoreError::CaptureUnavailable(format!("스크린 캡처 실패: {e}")))?;

        debug!("스크린 캡처 완료: {}x{}", image.width(), image.height());

        Ok(DynamicImage::ImageRgba8(image))
    }

    /// 사용 가능한 모니터 수
    pub fn monitor_count() -> Result<usize, CoreError> {
        Monitor::all()
            .map(|m| m.len())
            .map_err(|e| CoreError::CaptureUnavailable(format!("모니터 목록 조회 실패: {e}")))
    }
}
