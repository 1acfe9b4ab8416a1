use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::clock::{VirtualClock, VirtualTime};

type TickHook = Box<dyn FnMut(VirtualTime) + Send>;

struct IntervalHook {
    period_ms: u64,
    next_due: Option<VirtualTime>,
    hook: TickHook,
}

/// 고정 간격 프레임 루프
///
/// 매 프레임 `on_every_tick` 훅을 등록 순서대로 부르고, 주기가 돌아온
/// `on_interval_tick` 훅을 부른다. 훅 안에서 await 할 수 없으므로 긴 작업은
/// 별도 태스크로 넘겨야 한다.
pub struct FrameLoop {
    clock: Arc<dyn VirtualClock>,
    step: Duration,
    every_tick: Vec<TickHook>,
    intervals: Vec<IntervalHook>,
    frames: u64,
}

impl FrameLoop {
    pub fn new(clock: Arc<dyn VirtualClock>, step_ms: u64) -> Self {
        Self {
            clock,
            step: Duration::from_millis(step_ms.max(1)),
            every_tick: Vec::new(),
            intervals: Vec::new(),
            frames: 0,
        }
    }

    pub fn on_every_tick<F>(&mut self, hook: F)
    where
        F: FnMut(VirtualTime) + Send + 'static,
    {
        self.every_tick.push(Box::new(hook));
    }

    /// 첫 호출은 등록 후 `period_ms` 가 지난 첫 프레임
    pub fn on_interval_tick<F>(&mut self, period_ms: u64, hook: F)
    where
        F: FnMut(VirtualTime) + Send + 'static,
    {
        self.intervals.push(IntervalHook {
            period_ms: period_ms.max(1),
            next_due: None,
            hook: Box::new(hook),
        });
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// 프레임 하나 실행
    pub fn step_once(&mut self) {
        let now = self.clock.now();
        self.frames += 1;

        for hook in self.every_tick.iter_mut() {
            hook(now);
        }

        for interval in self.intervals.iter_mut() {
            let due = *interval
                .next_due
                .get_or_insert(now + interval.period_ms);
            if now >= due {
                (interval.hook)(now);
                interval.next_due = Some(now + interval.period_ms);
            }
        }
    }

    /// `frame_count` 프레임 동안 실행
    pub async fn run_frames(&mut self, frame_count: u64) {
        let mut ticker = tokio::time::interval(self.step);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for _ in 0..frame_count {
            ticker.tick().await;
            self.step_once();
        }
        debug!("frame loop ran {} frame(s)", frame_count);
    }

    /// `stop` 이 true 를 돌려줄 때까지 실행. 실행한 프레임 수를 돌려준다.
    pub async fn run_until<F>(&mut self, max_frames: u64, mut stop: F) -> u64
    where
        F: FnMut() -> bool,
    {
        let mut ticker = tokio::time::interval(self.step);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ran = 0;
        while ran < max_frames && !stop() {
            ticker.tick().await;
            self.step_once();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::{EngineClock, ManualClock};
    use parking_lot::Mutex;

    #[test]
    fn test_interval_hook_fires_on_period() {
        let clock = Arc::new(ManualClock::new(0));
        let mut frame_loop = FrameLoop::new(clock.clone(), 10);

        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        frame_loop.on_interval_tick(500, move |now| sink.lock().push(now));

        for _ in 0..120 {
            frame_loop.step_once();
            clock.advance(10);
        }

        assert_eq!(*fired.lock(), vec![500, 1000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_tick_runs_each_frame() {
        let clock = Arc::new(EngineClock::new());
        let mut frame_loop = FrameLoop::new(clock, 20);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        frame_loop.on_every_tick(move |now| sink.lock().push(now));

        frame_loop.run_frames(5).await;

        // interval 의 첫 tick 은 즉시 완료된다
        assert_eq!(*seen.lock(), vec![0, 20, 40, 60, 80]);
        assert_eq!(frame_loop.frames(), 5);
    }
}
