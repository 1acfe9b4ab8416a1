use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use super::object::AttackObject;
use super::registry::AttackRegistry;
use crate::enums::Direction;
use crate::world::EntityRef;

/// 분노 공격 쿨다운. 한 번에 하나만 날아간다.
///
/// 발사 후 `warmup_ms + active_ms` 가 지나야 다음 발사를 받는다. 공격을 중간에
/// 끊어도 쿨다운은 그대로 흐른다.
#[derive(Debug, Clone, Default)]
pub struct AngerCooldown {
    launched: Arc<AtomicBool>,
}

impl AngerCooldown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cooling_down(&self) -> bool {
        self.launched.load(Ordering::SeqCst)
    }

    /// 쿨다운 중이면 None
    pub fn try_launch(
        &self,
        registry: &Arc<AttackRegistry>,
        origin: EntityRef,
        direction: Direction,
        width: f32,
        active_ms: u64,
        warmup_ms: u64,
    ) -> Option<AttackObject> {
        if self.launched.swap(true, Ordering::SeqCst) {
            debug!("anger attack still cooling down");
            return None;
        }

        let attack = registry.launch(origin, direction, width, active_ms, warmup_ms);
        let launched = Arc::clone(&self.launched);
        tokio::spawn(async move {
            sleep(Duration::from_millis(warmup_ms + active_ms)).await;
            launched.store(false, Ordering::SeqCst);
        });
        Some(attack)
    }
}
