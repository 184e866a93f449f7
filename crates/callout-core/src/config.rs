//! 애플리케이션 설정 구조체.
//!
//! 캡처 에이전트 주기/엔드포인트, 분석 서버 포트, 비전(이미지 처리),
//! 음성 합성 설정을 정의한다. JSON 파일 로드는 [`crate::config_manager`] 담당,
//! `PORT`/`FORWARD_URL` 환경변수가 서버 설정을 덮어쓴다.

use serde::{Deserialize, Serialize};

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 캡처 에이전트 설정
    #[serde(default)]
    pub agent: AgentConfig,
    /// 분석 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 비전(이미지 처리) 설정
    #[serde(default)]
    pub vision: VisionConfig,
    /// 음성 합성 설정
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 환경변수 오버라이드 적용
    ///
    /// - `PORT` → `server.port`
    /// - `FORWARD_URL` → `server.forward_url`
    pub fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("PORT 환경변수 파싱 실패, 무시: {port}"),
            }
        }
        if let Ok(url) = std::env::var("FORWARD_URL") {
            if !url.trim().is_empty() {
                self.server.forward_url = Some(url);
            }
        }
    }
}

// ============================================================
// 캡처 에이전트 설정
// ============================================================

/// 캡처 에이전트 설정 — 캡처 주기, 업로드 엔드포인트, 타임아웃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// 스크린샷 업로드 엔드포인트 URL
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    /// 캡처 간격 (밀리초) — 재생 종료 후 다음 캡처까지의 간격
    #[serde(default = "default_capture_interval_ms")]
    pub capture_interval_ms: u64,
    /// 업로드 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 캡처 대상 모니터 인덱스 (None이면 주 모니터)
    #[serde(default)]
    pub monitor_index: Option<usize>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            capture_interval_ms: default_capture_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            monitor_index: None,
        }
    }
}

fn default_endpoint_url() -> String {
    "http://localhost:5000/upload_screenshot".to_string()
}

fn default_capture_interval_ms() -> u64 {
    3_000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

// ============================================================
// 분석 서버 설정
// ============================================================

/// 분석 서버 설정 — 포트, 외부 접속 허용, 업스트림 포워딩
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 리스닝 포트
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// 외부 접속 허용 (true: 0.0.0.0, false: 127.0.0.1)
    #[serde(default = "default_true")]
    pub allow_external: bool,
    /// `GET /`에서 브라우저 캡처 클라이언트 HTML 서빙 여부
    /// (false면 liveness JSON 반환)
    #[serde(default)]
    pub serve_client: bool,
    /// 업스트림 분석 서비스 URL (설정 시 스크린샷을 포워딩)
    #[serde(default)]
    pub forward_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            allow_external: true,
            serve_client: false,
            forward_url: None,
        }
    }
}

fn default_server_port() -> u16 {
    5_000
}

// ============================================================
// 비전 설정
// ============================================================

/// 비전 설정 — 업로드 전 다운스케일 목표 해상도
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// 업로드 전 다운스케일 목표 너비 (픽셀, 0이면 원본 유지)
    #[serde(default = "default_target_width")]
    pub target_width: u32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            target_width: default_target_width(),
        }
    }
}

fn default_target_width() -> u32 {
    1_280
}

// ============================================================
// 음성 합성 설정
// ============================================================

/// 음성 합성 설정 — 재생 여부, 언어 태그
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// 음성 재생 활성화 (false면 텍스트/로그만)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 합성 언어 태그 (예: "en", "hi")
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = AppConfig::default_config();
        assert_eq!(config.server.port, 5_000);
        assert!(config.server.allow_external);
        assert!(config.server.forward_url.is_none());
        assert_eq!(config.agent.capture_interval_ms, 3_000);
        assert_eq!(config.agent.request_timeout_ms, 10_000);
        assert_eq!(config.vision.target_width, 1_280);
        assert!(config.speech.enabled);
        assert_eq!(config.speech.language, "en");
    }

    #[test]
    fn partial_json_uses_field_defaults() {
        // 필드 일부만 있는 설정 파일도 로드 가능해야 함
        let json = r#"{"server": {"port": 8080}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.server.allow_external);
        assert_eq!(config.agent.capture_interval_ms, 3_000);
    }

    /// 병렬 테스트 간 PORT 환경변수 경쟁 방지용 락
    static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn env_port_override() {
        let _guard = ENV_TEST_LOCK.lock().unwrap();
        let mut config = AppConfig::default_config();
        std::env::set_var("PORT", "7777");
        config.apply_env();
        std::env::remove_var("PORT");
        assert_eq!(config.server.port, 7777);
    }

    #[test]
    fn env_invalid_port_ignored() {
        let _guard = ENV_TEST_LOCK.lock().unwrap();
        let mut config = AppConfig::default_config();
        std::env::set_var("PORT", "not-a-port");
        config.apply_env();
        std::env::remove_var("PORT");
        assert_eq!(config.server.port, 5_000);
    }
}
