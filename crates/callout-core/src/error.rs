//! CALLOUT 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러를 `CoreError`로 매핑해 반환한다.
//! 업로드 실패는 에러가 아니라 권고 텍스트 채널로 흡수된다 (`AdvisoryApi` 참조).

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 화면/디스플레이 접근 불가 (권한 거부, 디스플레이 서버 없음 등)
    #[error("캡처 불가: {0}")]
    CaptureUnavailable(String),

    /// 음성 합성 엔진 사용 불가 (엔진 미설치, 실행 실패)
    #[error("음성 합성 불가: {0}")]
    SynthesisUnavailable(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}
