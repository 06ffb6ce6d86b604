//! 콘솔 알림 어댑터.
//!
//! `Notifier` 포트 구현. 설정에 따라 조건부로 stderr에 한 줄 알림을 출력한다.

use async_trait::async_trait;
use parking_lot::Mutex;
use potscan_core::config::NotificationConfig;
use potscan_core::error::CoreError;
use potscan_core::models::ui::NotificationKind;
use potscan_core::ports::notifier::Notifier;
use std::io::Write;
use tracing::debug;

/// 콘솔 알림 어댑터: `Notifier` 포트 구현
pub struct ConsoleNotifier {
    config: NotificationConfig,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    /// stderr로 출력하는 알림 어댑터 생성
    pub fn new(config: NotificationConfig) -> Self {
        Self::with_writer(config, Box::new(std::io::stderr()))
    }

    /// 지정 writer로 출력
    pub fn with_writer(config: NotificationConfig, out: Box<dyn Write + Send>) -> Self {
        Self {
            config,
            out: Mutex::new(out),
        }
    }

    /// 알림 표시 여부 (경고/에러는 enabled만 확인)
    fn should_show(&self, kind: NotificationKind) -> bool {
        if !self.config.enabled {
            return false;
        }
        kind != NotificationKind::Success || self.config.show_success
    }
}

fn icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✅",
        NotificationKind::Warning => "⚠️ ",
        NotificationKind::Error => "❌",
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> Result<(), CoreError> {
        if !self.should_show(kind) {
            debug!("알림 생략 ({kind}): {title}");
            return Ok(());
        }

        let mut out = self.out.lock();
        writeln!(out, "{} {title}: {message}", icon(kind))?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// 테스트용 공유 버퍼
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn notifier(enabled: bool, show_success: bool) -> (ConsoleNotifier, SharedBuf) {
        let buf = SharedBuf::default();
        let config = NotificationConfig {
            enabled,
            show_success,
        };
        (
            ConsoleNotifier::with_writer(config, Box::new(buf.clone())),
            buf,
        )
    }

    #[tokio::test]
    async fn prints_error_line() {
        let (n, buf) = notifier(true, true);
        n.notify(NotificationKind::Error, "Upload Failed", "corrupt file")
            .await
            .unwrap();
        assert_eq!(buf.text(), "❌ Upload Failed: corrupt file\n");
    }

    #[tokio::test]
    async fn success_can_be_muted() {
        let (n, buf) = notifier(true, false);
        n.notify(NotificationKind::Success, "Analysis Complete", "ok")
            .await
            .unwrap();
        n.notify(NotificationKind::Warning, "No File Selected", "pick one")
            .await
            .unwrap();
        let text = buf.text();
        assert!(!text.contains("Analysis Complete"));
        assert!(text.contains("No File Selected: pick one"));
    }

    #[tokio::test]
    async fn disabled_prints_nothing() {
        let (n, buf) = notifier(false, true);
        n.notify(NotificationKind::Error, "Upload Failed", "x")
            .await
            .unwrap();
        assert!(buf.text().is_empty());
    }
}
