//! 라이프사이클 관리.
//!
//! 외부 인터럽트가 캡처 루프와 서버를 종료시키는 유일한 경로다.
//! 시그널 수신 → watch 채널 브로드캐스트 → 각 루프가 graceful 종료.

use tokio::sync::watch;
use tracing::info;

/// 라이프사이클 관리자
pub struct Lifecycle {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Lifecycle {
    /// 새 라이프사이클 관리자 생성
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
    }

    /// 종료 신호 발송 여부
    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// OS 시그널 대기 후 종료 신호 발송 (SIGINT, SIGTERM)
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            match (
                signal(SignalKind::interrupt()),
                signal(SignalKind::terminate()),
            ) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => info!("SIGINT 수신"),
                        _ = sigterm.recv() => info!("SIGTERM 수신"),
                    }
                }
                _ => {
                    // 시그널 핸들러 등록 실패 시 ctrl_c로 폴백
                    let _ = tokio::signal::ctrl_c().await;
                    info!("Ctrl+C 수신");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
            info!("Ctrl+C 수신");
        }

        self.shutdown();
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_shutdown() {
        let lifecycle = Lifecycle::new();
        assert!(!lifecycle.is_shutdown());
        assert!(!*lifecycle.subscribe().borrow());
    }

    #[test]
    fn shutdown_reaches_subscribers() {
        let lifecycle = Lifecycle::new();
        let rx = lifecycle.subscribe();
        lifecycle.shutdown();
        assert!(*rx.borrow());
        assert!(lifecycle.is_shutdown());
    }
}
