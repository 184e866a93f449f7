//! 음성 합성 엔진/재생기 탐색.
//!
//! 로컬 CLI 엔진을 우선순위에 따라 선택한다:
//! 1. Piper (`PIPER_BIN` + `PIPER_VOICE`, 고품질, 보이스 모델 필요)
//! 2. espeak-ng (`ESPEAK_BIN` 또는 PATH, 널리 설치됨)
//! 3. macOS `say`
//!
//! 재생기는 `aplay`/`paplay`/`afplay`/`ffplay` 중 PATH에서 처음 발견되는 것.

use std::path::{Path, PathBuf};

/// 합성 엔진 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisEngine {
    /// Piper — 보이스 모델 경로 필요
    Piper {
        /// piper 실행 파일
        bin: PathBuf,
        /// 보이스 모델 경로
        voice: PathBuf,
    },
    /// espeak-ng — 언어 코드를 직접 받음
    Espeak {
        /// espeak-ng 실행 파일
        bin: PathBuf,
    },
    /// macOS 내장 say
    Say {
        /// say 실행 파일
        bin: PathBuf,
    },
}

impl SynthesisEngine {
    /// 합성 명령 구성: (실행 파일, 인자 목록, stdin으로 전달할 텍스트)
    ///
    /// `output` 경로에 오디오 파일을 생성하도록 구성된다.
    pub fn synth_command(
        &self,
        text: &str,
        language: &str,
        output: &Path,
    ) -> (PathBuf, Vec<String>, Option<String>) {
        match self {
            SynthesisEngine::Piper { bin, voice } => (
                bin.clone(),
                vec![
                    "--model".to_string(),
                    voice.to_string_lossy().into_owned(),
                    "--output_file".to_string(),
                    output.to_string_lossy().into_owned(),
                ],
                Some(text.to_string()),
            ),
            SynthesisEngine::Espeak { bin } => (
                bin.clone(),
                vec![
                    "-v".to_string(),
                    language.to_string(),
                    "-w".to_string(),
                    output.to_string_lossy().into_owned(),
                    text.to_string(),
                ],
                None,
            ),
            SynthesisEngine::Say { bin } => (
                bin.clone(),
                vec![
                    "-o".to_string(),
                    output.to_string_lossy().into_owned(),
                    text.to_string(),
                ],
                None,
            ),
        }
    }

    /// 엔진이 생성하는 오디오 파일 확장자
    pub fn output_suffix(&self) -> &'static str {
        match self {
            // say는 AIFF를 출력한다
            SynthesisEngine::Say { .. } => ".aiff",
            _ => ".wav",
        }
    }
}

/// 우선순위에 따라 사용 가능한 합성 엔진 탐색
///
/// 환경변수 오버라이드가 있으면 존재 검사 없이 그대로 신뢰한다
/// (컨테이너 등 PATH 탐색이 불가능한 환경 지원).
pub fn resolve_engine() -> Option<SynthesisEngine> {
    // 1. Piper — bin + voice 둘 다 있어야 함
    if let Ok(bin) = std::env::var("PIPER_BIN") {
        if let Ok(voice) = std::env::var("PIPER_VOICE") {
            return Some(SynthesisEngine::Piper {
                bin: PathBuf::from(bin),
                voice: PathBuf::from(voice),
            });
        }
    }

    // 2. espeak-ng
    if let Ok(bin) = std::env::var("ESPEAK_BIN") {
        return Some(SynthesisEngine::Espeak {
            bin: PathBuf::from(bin),
        });
    }
    if let Some(bin) = find_in_path("espeak-ng") {
        return Some(SynthesisEngine::Espeak { bin });
    }

    // 3. macOS say
    if let Some(bin) = find_in_path("say") {
        return Some(SynthesisEngine::Say { bin });
    }

    None
}

/// 사용 가능한 오디오 재생기 탐색
///
/// ffplay는 창 없이 재생 종료 시 빠져나오도록 인자가 필요하다.
pub fn resolve_player() -> Option<(PathBuf, Vec<String>)> {
    for name in ["aplay", "paplay", "afplay"] {
        if let Some(bin) = find_in_path(name) {
            return Some((bin, Vec::new()));
        }
    }
    if let Some(bin) = find_in_path("ffplay") {
        return Some((
            bin,
            vec![
                "-nodisp".to_string(),
                "-autoexit".to_string(),
                "-loglevel".to_string(),
                "quiet".to_string(),
            ],
        ));
    }
    None
}

/// PATH에서 실행 파일 탐색
fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
