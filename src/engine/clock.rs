use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::time::Instant;

/// 가상 시간 (ms)
pub type VirtualTime = u64;

pub trait VirtualClock: Send + Sync {
    /// 단조 증가하는 런타임 시각
    fn now(&self) -> VirtualTime;
}

#[derive(Debug, Clone, Copy, Default)]
struct ClockState {
    /// 현재 세션이 시작된 런타임 시각
    origin: VirtualTime,
    /// 게임 종료 등으로 멈춘 엔진 시각
    halted_at: Option<VirtualTime>,
}

/// tokio 시계 기반 엔진 시계
///
/// `now()` 는 생성 시점부터의 런타임이고, `engine_time()` 은 현재 세션 원점부터의
/// 경과 시간이다. `halt()` 하면 엔진 시간만 멈추고 런타임은 계속 흐른다.
#[derive(Debug)]
pub struct EngineClock {
    started: Instant,
    state: Mutex<ClockState>,
}

impl EngineClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            state: Mutex::new(ClockState::default()),
        }
    }

    pub fn runtime(&self) -> VirtualTime {
        self.started.elapsed().as_millis() as VirtualTime
    }

    /// 새 세션 시작. 원점을 지금으로 옮기고 정지를 푼다.
    pub fn rebase(&self) -> VirtualTime {
        let now = self.runtime();
        let mut state = self.state.lock();
        state.origin = now;
        state.halted_at = None;
        now
    }

    pub fn engine_time(&self) -> VirtualTime {
        let state = *self.state.lock();
        match state.halted_at {
            Some(halted) => halted,
            None => self.runtime().saturating_sub(state.origin),
        }
    }

    pub fn halt(&self) {
        let engine_time = self.engine_time();
        let mut state = self.state.lock();
        if state.halted_at.is_none() {
            state.halted_at = Some(engine_time);
        }
    }

    /// 멈췄던 엔진 시각에서 이어서 흐른다. 멈춘 동안의 런타임은 원점 이동으로 흡수된다.
    pub fn resume(&self) {
        let now = self.runtime();
        let mut state = self.state.lock();
        if let Some(halted) = state.halted_at.take() {
            state.origin = now.saturating_sub(halted);
        }
    }

    pub fn is_halted(&self) -> bool {
        self.state.lock().halted_at.is_some()
    }
}

impl Default for EngineClock {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualClock for EngineClock {
    fn now(&self) -> VirtualTime {
        self.runtime()
    }
}

/// 손으로 움직이는 시계 (벤치마크, 동기 테스트용)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: VirtualTime) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    pub fn advance(&self, delta: VirtualTime) -> VirtualTime {
        self.now.fetch_add(delta, Ordering::Relaxed) + delta
    }

    pub fn set(&self, now: VirtualTime) {
        self.now.fetch_max(now, Ordering::Relaxed);
    }
}

impl VirtualClock for ManualClock {
    fn now(&self) -> VirtualTime {
        self.now.load(Ordering::Relaxed)
    }
}
