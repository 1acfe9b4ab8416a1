//! 공격 표시 레지스트리
//!
//! 충돌 판정은 전혀 하지 않는다. 등록된 표시를 프레임마다 한 번씩 다시 그릴 뿐이다.

pub mod canvas;
pub mod visuals;

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use crate::engine::VirtualTime;
use crate::enums::constant::COLOR_CLEAR;

pub use canvas::{Canvas, CommandCanvas, DrawCommand};
pub use visuals::{BuildupAnimation, ExplosionAnimation, LaserAnimation, LaserPhase};

pub trait AttackAnimation: Send + Sync {
    fn draw(&self, canvas: &mut dyn Canvas, now: VirtualTime);

    /// 예열이 끝나 실제 공격 표시로 바뀔 때
    fn fire(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualId(u64);

#[derive(Default)]
pub struct AnimationHolder {
    next_id: AtomicU64,
    animations: Mutex<Vec<(VisualId, Box<dyn AttackAnimation>)>>,
}

impl AnimationHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, animation: Box<dyn AttackAnimation>) -> VisualId {
        let id = VisualId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.animations.lock().push((id, animation));
        debug!("visual {:?} registered", id);
        id
    }

    /// 이미 빠진 표시면 false
    pub fn unregister(&self, id: VisualId) -> bool {
        let mut animations = self.animations.lock();
        let before = animations.len();
        animations.retain(|(visual_id, _)| *visual_id != id);
        before != animations.len()
    }

    pub fn fire(&self, id: VisualId) -> bool {
        let mut animations = self.animations.lock();
        match animations.iter_mut().find(|(visual_id, _)| *visual_id == id) {
            Some((_, animation)) => {
                animation.fire();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: VisualId) -> bool {
        self.animations.lock().iter().any(|(visual_id, _)| *visual_id == id)
    }

    pub fn len(&self) -> usize {
        self.animations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 캔버스를 지우고 등록 순서대로 다시 그린다
    pub fn paint(&self, canvas: &mut dyn Canvas, now: VirtualTime) {
        canvas.clear(COLOR_CLEAR);
        for (_, animation) in self.animations.lock().iter() {
            animation.draw(canvas, now);
        }
    }
}
