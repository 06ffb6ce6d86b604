//! 알림 포트.
//!
//! 구현: `potscan-app` crate (콘솔 알림)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::ui::NotificationKind;

/// 결과 알림 수신자
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 알림 표시 (종류 + 제목 + 본문)
    async fn notify(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> Result<(), CoreError>;
}
