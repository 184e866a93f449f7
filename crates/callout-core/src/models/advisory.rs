//! 권고 메시지 모델.
//!
//! 분석 서비스가 프레임 하나당 반환하는 평문 텍스트.
//! 전송 계층은 내용을 해석하지 않는다 — 음성 어댑터와 로그만이 의미를 가진다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 분석 서비스의 권고 텍스트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryMessage {
    /// 권고 텍스트 (불투명 — 구조 없음)
    pub text: String,
    /// 수신 시각
    pub received_at: DateTime<Utc>,
}

impl AdvisoryMessage {
    /// 새 권고 메시지 생성 (수신 시각은 현재)
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            received_at: Utc::now(),
        }
    }

    /// 음성 재생 대상 여부 — 공백뿐인 메시지는 재생하지 않는다
    pub fn is_speakable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speakable_text() {
        assert!(AdvisoryMessage::new("Enemy spotted").is_speakable());
    }

    #[test]
    fn whitespace_only_is_not_speakable() {
        assert!(!AdvisoryMessage::new("   \t\n").is_speakable());
        assert!(!AdvisoryMessage::new("").is_speakable());
    }

    #[test]
    fn advisory_serde_roundtrip() {
        let msg = AdvisoryMessage::new("Reload and fire!");
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: AdvisoryMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.text, "Reload and fire!");
    }
}
