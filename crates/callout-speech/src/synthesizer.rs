//! CLI 엔진 기반 음성 합성기.
//!
//! `SpeechSynthesizer` 포트 구현. 합성 결과와 재생 입력 모두
//! `NamedTempFile`로 스테이징한다 — 임시 파일은 드롭 시점에 삭제되므로
//! 인터럽트를 포함한 모든 종료 경로에서 해제가 보장된다.

use async_trait::async_trait;
use callout_core::error::CoreError;
use callout_core::ports::speech::SpeechSynthesizer;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::engine::{resolve_engine, resolve_player, SynthesisEngine};

/// CLI 음성 합성기 — `SpeechSynthesizer` 포트 구현
pub struct CliSynthesizer {
    engine: SynthesisEngine,
}

impl CliSynthesizer {
    /// 사용 가능한 엔진을 탐색해 합성기 생성
    ///
    /// 엔진이 없으면 `SynthesisUnavailable`. 호출자는 재생을 비활성화하고
    /// 계속 진행해야 한다 (루프를 중단시키는 실패가 아님).
    pub fn from_environment() -> Result<Self, CoreError> {
        let engine = resolve_engine().ok_or_else(|| {
            CoreError::SynthesisUnavailable(
                "사용 가능한 합성 엔진 없음 (piper/espeak-ng/say)".to_string(),
            )
        })?;
        debug!("합성 엔진 선택: {engine:?}");
        Ok(Self { engine })
    }

    /// 지정한 엔진으로 합성기 생성
    pub fn with_engine(engine: SynthesisEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl SpeechSynthesizer for CliSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, CoreError> {
        // 스테이징 파일 — 드롭 시 삭제
        let staging = tempfile::Builder::new()
            .prefix("callout-tts-")
            .suffix(self.engine.output_suffix())
            .tempfile()
            .map_err(|e| CoreError::SynthesisUnavailable(format!("임시 파일 생성 실패: {e}")))?;

        let (bin, args, stdin_text) = self.engine.synth_command(text, language, staging.path());
        run_engine(&bin, &args, stdin_text).await?;

        let audio = tokio::fs::read(staging.path())
            .await
            .map_err(|e| CoreError::SynthesisUnavailable(format!("합성 결과 읽기 실패: {e}")))?;

        if audio.is_empty() {
            return Err(CoreError::SynthesisUnavailable(
                "합성 엔진이 빈 오디오를 생성".to_string(),
            ));
        }

        debug!("음성 합성 완료: {} bytes", audio.len());
        Ok(audio)
    }

    async fn play(&self, audio: &[u8]) -> Result<(), CoreError> {
        let (player, base_args) = resolve_player().ok_or_else(|| {
            CoreError::SynthesisUnavailable(
                "사용 가능한 오디오 재생기 없음 (aplay/paplay/afplay/ffplay)".to_string(),
            )
        })?;

        // 재생 입력 스테이징 — 드롭 시 삭제
        let mut staging = tempfile::Builder::new()
            .prefix("callout-play-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| CoreError::SynthesisUnavailable(format!("임시 파일 생성 실패: {e}")))?;

        std::io::Write::write_all(&mut staging, audio)
            .map_err(|e| CoreError::SynthesisUnavailable(format!("오디오 스테이징 실패: {e}")))?;

        let mut args = base_args;
        args.push(staging.path().to_string_lossy().into_owned());

        // 재생 종료까지 블로킹 — 다음 캡처는 재생이 끝난 뒤에 시작된다
        let status = Command::new(&player)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                CoreError::SynthesisUnavailable(format!(
                    "재생기 실행 실패 ({}): {e}",
                    player.display()
                ))
            })?;

        if !status.success() {
            warn!("재생기 비정상 종료: {status}");
        }

        Ok(())
    }
}

/// 합성 엔진 프로세스 실행
///
/// 엔진 미설치(NotFound)와 비정상 종료 모두 `SynthesisUnavailable`로 매핑한다.
async fn run_engine(
    bin: &PathBuf,
    args: &[String],
    stdin_text: Option<String>,
) -> Result<(), CoreError> {
    let mut command = Command::new(bin);
    command.args(args).stdout(Stdio::null()).stderr(Stdio::piped());

    if stdin_text.is_some() {
        command.stdin(Stdio::piped());
    } else {
        command.stdin(Stdio::null());
    }

    let mut child = command.spawn().map_err(|e| {
        CoreError::SynthesisUnavailable(format!("합성 엔진 실행 실패 ({}): {e}", bin.display()))
    })?;

    if let Some(text) = stdin_text {
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| CoreError::SynthesisUnavailable(format!("엔진 입력 실패: {e}")))?;
            // stdin 드롭으로 EOF 전달
        }
    }

    let output = child.wait_with_output().await.map_err(|e| {
        CoreError::SynthesisUnavailable(format!("합성 엔진 대기 실패: {e}"))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CoreError::SynthesisUnavailable(format!(
            "합성 엔진 비정상 종료 ({}): {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_engine_binary_is_synthesis_unavailable() {
        let synth = CliSynthesizer::with_engine(SynthesisEngine::Espeak {
            bin: PathBuf::from("/nonexistent/espeak-ng"),
        });

        let result = synth.synthesize("hello", "en").await;
        assert!(matches!(
            result,
            Err(CoreError::SynthesisUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn failing_engine_is_synthesis_unavailable() {
        // /bin/false는 즉시 비정상 종료 — 출력 파일을 만들지 않는다
        let synth = CliSynthesizer::with_engine(SynthesisEngine::Espeak {
            bin: PathBuf::from("/bin/false"),
        });

        let result = synth.synthesize("hello", "en").await;
        assert!(matches!(
            result,
            Err(CoreError::SynthesisUnavailable(_))
        ));
    }
}
