//! 캡처 프레임 모델.
//!
//! 타이머 틱마다 생성되어 업로드 직후 폐기되는 요청 단위 엔티티.
//! 에이전트 인스턴스당 동시에 한 프레임만 존재한다 (루프가 순차적이므로).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 단일 스크린 캡처 프레임
///
/// PNG 인코딩된 이미지 바이트 + 캡처 시각 + 원본 해상도.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureFrame {
    /// PNG 인코딩된 이미지 데이터
    pub png: Vec<u8>,
    /// 캡처 시각
    pub timestamp: DateTime<Utc>,
    /// 캡처 원본 해상도 (width, height)
    pub resolution: (u32, u32),
}

impl CaptureFrame {
    /// 새 프레임 생성 (캡처 시각은 현재)
    pub fn new(png: Vec<u8>, resolution: (u32, u32)) -> Self {
        Self {
            png,
            timestamp: Utc::now(),
            resolution,
        }
    }

    /// 인코딩된 이미지 크기 (바이트)
    pub fn size_bytes(&self) -> usize {
        self.png.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size() {
        let frame = CaptureFrame::new(vec![0x89, 0x50, 0x4E, 0x47], (1920, 1080));
        assert_eq!(frame.size_bytes(), 4);
        assert_eq!(frame.resolution, (1920, 1080));
    }
}
