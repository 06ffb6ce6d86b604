//! 파이프라인 실행 세대(generation) 태그.
//!
//! 새 파일이 선택될 때마다 세대가 1 증가한다. 각 비동기 단계는 완료 직후
//! 자신의 세대가 여전히 최신인지 확인하고, 대체되었으면 결과를 버린다.
//! `tokio::sync::watch` 채널로 구현하여 대기 중인 future도 즉시 취소할 수 있다.

use std::future::Future;

use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;

/// 세대 카운터: 오케스트레이터가 단독 소유
#[derive(Debug)]
pub struct GenerationCounter {
    tx: watch::Sender<u64>,
}

impl GenerationCounter {
    /// 세대 0에서 시작하는 카운터 생성
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// 세대를 1 증가시키고 새 세대 태그 반환.
    ///
    /// 이전 세대의 태그는 모두 stale 상태가 된다.
    pub fn advance(&self) -> Generation {
        let mut id = 0;
        self.tx.send_modify(|current| {
            *current += 1;
            id = *current;
        });
        debug!("세대 증가: {id}");
        Generation {
            id,
            rx: self.tx.subscribe(),
        }
    }

    /// 현재 세대 태그
    pub fn current(&self) -> Generation {
        Generation {
            id: *self.tx.borrow(),
            rx: self.tx.subscribe(),
        }
    }

    /// 현재 세대 번호
    pub fn current_id(&self) -> u64 {
        *self.tx.borrow()
    }
}

impl Default for GenerationCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// 특정 세대에 묶인 태그
#[derive(Debug, Clone)]
pub struct Generation {
    id: u64,
    rx: watch::Receiver<u64>,
}

impl Generation {
    /// 세대 번호
    pub fn id(&self) -> u64 {
        self.id
    }

    /// 이 세대가 여전히 최신인지
    pub fn is_current(&self) -> bool {
        *self.rx.borrow() == self.id
    }

    /// 최신이 아니면 `CoreError::Superseded` 반환
    pub fn ensure_current(&self) -> Result<(), CoreError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(CoreError::Superseded {
                generation: self.id,
            })
        }
    }

    /// 이 세대가 대체될 때까지 대기.
    ///
    /// 카운터가 drop되면 더 이상 대체될 수 없으므로 영원히 대기한다.
    pub async fn superseded(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() != self.id {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// future를 이 세대에 묶어 실행.
    ///
    /// 완료 전에 세대가 대체되면 future를 drop하고 `Superseded`를 반환한다.
    /// 완료 후에도 한 번 더 확인하여 stale 결과가 새어 나가지 않게 한다.
    pub async fn guard<T, F>(&self, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        tokio::select! {
            biased;
            _ = self.superseded() => Err(CoreError::Superseded { generation: self.id }),
            result = fut => {
                self.ensure_current()?;
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn advance_invalidates_previous() {
        let counter = GenerationCounter::new();
        let first = counter.advance();
        assert!(first.is_current());
        assert_eq!(first.id(), 1);

        let second = counter.advance();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(counter.current_id(), 2);
    }

    #[test]
    fn ensure_current_reports_generation() {
        let counter = GenerationCounter::new();
        let stale = counter.advance();
        counter.advance();

        match stale.ensure_current() {
            Err(CoreError::Superseded { generation }) => assert_eq!(generation, 1),
            other => panic!("예상치 못한 결과: {other:?}"),
        }
    }

    #[tokio::test]
    async fn guard_passes_through_current_result() {
        let counter = GenerationCounter::new();
        let generation = counter.advance();
        let value = generation.guard(async { Ok::<_, CoreError>(7) }).await;
        assert_eq!(value.unwrap(), 7);
    }

    #[tokio::test]
    async fn guard_cancels_pending_future_when_superseded() {
        let counter = GenerationCounter::new();
        let generation = counter.advance();

        let guarded = generation.guard(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok::<_, CoreError>(())
        });

        let (result, _) = tokio::join!(guarded, async {
            tokio::task::yield_now().await;
            counter.advance();
        });

        assert!(matches!(result, Err(CoreError::Superseded { generation: 1 })));
    }

    #[tokio::test]
    async fn current_tag_tracks_latest() {
        let counter = GenerationCounter::new();
        counter.advance();
        let tag = counter.current();
        assert_eq!(tag.id(), 1);
        assert!(tag.is_current());
    }
}
