use glam::Vec2;

use super::canvas::Canvas;
use super::AttackAnimation;
use crate::engine::VirtualTime;
use crate::enums::constant::{COLOR_INNER, COLOR_OUTER};
use crate::enums::Direction;
use crate::world::EntityRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserPhase {
    WarmingUp,
    Firing,
}

/// 빔 공격 표시. 원점 엔티티를 따라 움직인다.
pub struct LaserAnimation {
    origin: EntityRef,
    width: f32,
    direction: Direction,
    bounds: Vec2,
    phase: LaserPhase,
}

impl LaserAnimation {
    pub fn new(origin: EntityRef, width: f32, direction: Direction, bounds: Vec2) -> Self {
        Self {
            origin,
            width: width.max(0.0),
            direction,
            bounds,
            phase: LaserPhase::WarmingUp,
        }
    }

    pub fn phase(&self) -> LaserPhase {
        self.phase
    }

    fn draw_beam(&self, canvas: &mut dyn Canvas, at: Vec2, thickness: f32, color: u8) {
        let half = thickness / 2.0;
        match self.direction {
            Direction::Right => {
                canvas.fill_rect(at.x, at.y - half, self.bounds.x - at.x, thickness, color)
            }
            Direction::Left => canvas.fill_rect(0.0, at.y - half, at.x, thickness, color),
            Direction::Up => canvas.fill_rect(at.x - half, 0.0, thickness, at.y, color),
            Direction::Down => {
                canvas.fill_rect(at.x - half, at.y, thickness, self.bounds.y - at.y, color)
            }
        }
    }
}

impl AttackAnimation for LaserAnimation {
    fn draw(&self, canvas: &mut dyn Canvas, _now: VirtualTime) {
        if self.origin.is_destroyed() {
            return;
        }
        let at = self.origin.position();

        canvas.fill_circle(at, self.width, COLOR_OUTER);
        if self.phase == LaserPhase::Firing {
            self.draw_beam(canvas, at, self.width, COLOR_OUTER);
            self.draw_beam(canvas, at, self.width / 2.0, COLOR_INNER);
        }
        canvas.fill_circle(at, self.width / 2.0, COLOR_INNER);
    }

    fn fire(&mut self) {
        self.phase = LaserPhase::Firing;
    }
}

/// 폭발 직전 예고 표시. 예열 시간 동안 다섯 단계로 커진다.
pub struct BuildupAnimation {
    anchor: Vec2,
    radius: f32,
    started_at: VirtualTime,
    period_ms: u64,
}

pub const BUILDUP_FRAMES: u64 = 5;

impl BuildupAnimation {
    pub fn new(anchor: Vec2, radius: f32, started_at: VirtualTime, period_ms: u64) -> Self {
        Self {
            anchor,
            radius: radius.max(0.0),
            started_at,
            period_ms,
        }
    }

    /// 0 부터 `BUILDUP_FRAMES - 1` 까지
    pub fn frame_at(&self, now: VirtualTime) -> u64 {
        if self.period_ms == 0 {
            return BUILDUP_FRAMES - 1;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed * BUILDUP_FRAMES / self.period_ms).min(BUILDUP_FRAMES - 1)
    }
}

impl AttackAnimation for BuildupAnimation {
    fn draw(&self, canvas: &mut dyn Canvas, now: VirtualTime) {
        let step = (self.frame_at(now) + 1) as f32 / BUILDUP_FRAMES as f32;
        canvas.fill_circle(self.anchor, self.radius * step, COLOR_OUTER);
    }
}

/// 폭발 표시
pub struct ExplosionAnimation {
    center: Vec2,
    radius: f32,
}

impl ExplosionAnimation {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

impl AttackAnimation for ExplosionAnimation {
    fn draw(&self, canvas: &mut dyn Canvas, _now: VirtualTime) {
        canvas.fill_circle(self.center, self.radius, COLOR_OUTER);
        canvas.fill_circle(self.center, self.radius / 3.0 * 2.0, COLOR_INNER);
    }
}
