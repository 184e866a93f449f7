//! 권고 업로드 클라이언트 포트.
//!
//! 구현: `callout-network` crate (reqwest multipart)

use async_trait::async_trait;

use crate::models::advisory::AdvisoryMessage;
use crate::models::frame::CaptureFrame;

/// 프레임 업로드 → 권고 텍스트 수신
///
/// 계약상 실패하지 않는다: 업로드 실패는 에러 대신 실패를 설명하는
/// 권고 텍스트로 흡수되어 루프가 단일 요청 실패로 중단되지 않는다.
/// - 비-2xx 응답 → `Error: <status>`
/// - 전송 실패 (타임아웃, 연결 거부 등) → `Request failed: <err>`
#[async_trait]
pub trait AdvisoryApi: Send + Sync {
    /// 프레임을 멀티파트 업로드하고 응답 본문을 권고 메시지로 반환
    async fn send_frame(&self, frame: &CaptureFrame) -> AdvisoryMessage;
}
