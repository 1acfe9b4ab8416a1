use glam::Vec2;

use super::checker::{scan_targets, AttackChecker};
use super::dispatch::{HitCallback, HitDispatcher, HitRegistration};
use crate::enums::SpriteKind;
use crate::geometry::in_radius;
use crate::world::EntityRegistry;

/// 원형 폭발 판정
///
/// `evaluate` 는 한 번만 효과가 있다. 폭발 하나당 대상마다 최대 한 번 맞는다.
#[derive(Clone, Default)]
pub struct BlastChecker {
    center: Option<Vec2>,
    radius: f32,
    evaluated: bool,
    registrations: Vec<HitRegistration>,
}

impl BlastChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, center: Vec2, radius: f32) {
        self.center = Some(center);
        self.radius = radius;
        self.evaluated = false;
    }

    pub fn center(&self) -> Option<Vec2> {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// 등록은 그대로 두고 파라미터만 비운 복사본
    pub fn clone_template(&self) -> Self {
        Self {
            center: None,
            radius: 0.0,
            evaluated: false,
            registrations: self.registrations.clone(),
        }
    }

    /// 폭발 판정. 맞은 대상 수를 돌려주고 이후 호출은 0 이다.
    pub fn evaluate(&mut self, scene: &dyn EntityRegistry, dispatcher: &HitDispatcher) -> usize {
        if self.evaluated {
            return 0;
        }
        self.evaluated = true;

        let Some(center) = self.center else {
            return 0;
        };
        let radius = self.radius;
        scan_targets(&self.registrations, scene, dispatcher, |candidate| {
            in_radius(candidate.position(), center, radius)
        })
    }

    /// 판정 없이 소모 처리
    pub fn disarm(&mut self) {
        self.evaluated = true;
    }

    pub fn is_spent(&self) -> bool {
        self.evaluated
    }
}

impl AttackChecker for BlastChecker {
    fn register_hit(&mut self, kind: SpriteKind, callback: HitCallback) {
        self.registrations.push(HitRegistration::new(kind, callback));
    }

    fn registrations(&self) -> &[HitRegistration] {
        &self.registrations
    }
}
