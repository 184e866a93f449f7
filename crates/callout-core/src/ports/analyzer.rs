//! 프레임 분석 포트.
//!
//! 이미지 바이트 → 권고 텍스트. 프로토타입의 유일한 확장 지점:
//! 실제 추론 백엔드는 이 trait 뒤에서 교체되며 HTTP 계층은 변하지 않는다.

use async_trait::async_trait;

use crate::error::CoreError;

/// 프레임 분석기 — 이미지 바이트에서 권고 텍스트 생성
///
/// 요청 간 공유 상태 없음. 실제 추론 백엔드를 붙일 경우
/// 자체 수용/큐잉 정책을 이 구현 내부에서 정의한다.
#[async_trait]
pub trait FrameAnalyzer: Send + Sync {
    /// 이미지를 분석하고 권고 텍스트 반환
    async fn analyze(&self, image_bytes: &[u8]) -> Result<String, CoreError>;
}
