use tracing::debug;

use super::ghost::ReplayActor;
use crate::engine::VirtualTime;

/// 여러 기록을 하나의 시계에 맞춰 동시에 재생한다.
///
/// 고스트마다 커서 하나를 두고, `tick` 때마다 타임스탬프가 경과 시간보다 작은
/// 입력을 전부 적용한다. 커서는 줄어들지 않으므로 같은 시각으로 여러 번 불러도
/// 새로 적용되는 입력이 없다.
#[derive(Debug, Default)]
pub struct TimelineReplayer {
    base: VirtualTime,
    cursors: Vec<usize>,
}

impl TimelineReplayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 재생 시작. `base` 는 세션이 시작된 시각.
    pub fn reset(&mut self, base: VirtualTime, ghost_count: usize) {
        self.base = base;
        self.cursors.clear();
        self.cursors.resize(ghost_count, 0);
        debug!("replayer reset: base={}, ghosts={}", base, ghost_count);
    }

    pub fn base(&self) -> VirtualTime {
        self.base
    }

    pub fn elapsed(&self, now: VirtualTime) -> VirtualTime {
        now.saturating_sub(self.base)
    }

    pub fn cursor(&self, ghost: usize) -> Option<usize> {
        self.cursors.get(ghost).copied()
    }

    /// 재생 한 번. 이번에 적용한 입력 수를 돌려준다.
    ///
    /// `reset` 때보다 고스트가 많으면 늘어난 고스트는 처음부터 재생된다.
    pub fn tick<A: ReplayActor>(&mut self, now: VirtualTime, ghosts: &mut [A]) -> usize {
        if self.cursors.len() < ghosts.len() {
            debug!(
                "replayer picked up {} untracked ghost(s)",
                ghosts.len() - self.cursors.len()
            );
            self.cursors.resize(ghosts.len(), 0);
        }

        let elapsed = self.elapsed(now);
        let mut applied = 0;

        for (ghost, cursor) in ghosts.iter_mut().zip(self.cursors.iter_mut()) {
            let len = ghost.actions().len();
            if ghost.is_gone() {
                *cursor = len;
                continue;
            }

            while *cursor < len {
                let stamp = ghost.actions()[*cursor];
                if stamp.timestamp >= elapsed {
                    break;
                }
                ghost.apply(stamp.action);
                *cursor += 1;
                applied += 1;
            }
        }
        applied
    }

    /// 모든 기록을 끝까지 재생했는지
    pub fn is_finished<A: ReplayActor>(&self, ghosts: &[A]) -> bool {
        ghosts
            .iter()
            .zip(self.cursors.iter())
            .all(|(ghost, cursor)| *cursor >= ghost.actions().len())
    }
}
