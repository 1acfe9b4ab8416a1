use std::collections::HashSet;

use glam::Vec2;
use tracing::debug;

use super::checker::{scan_targets, AttackChecker, CheckerStatus};
use super::dispatch::{HitCallback, HitDispatcher, HitRegistration};
use crate::enums::{Direction, SpriteKind};
use crate::exception::GameError;
use crate::geometry::BeamRegion;
use crate::world::{EntityId, EntityRef, EntityRegistry};

/// 지속형 빔 판정
///
/// STARTED 동안 매 틱 원점 엔티티의 현재 위치로 영역을 다시 계산한다. 한 번 맞은
/// 대상은 `define` 으로 다시 정의할 때까지 다시 맞지 않는다.
pub struct BeamChecker {
    status: CheckerStatus,
    origin: Option<EntityRef>,
    half_width: f32,
    direction: Direction,
    hit_targets: HashSet<EntityId>,
    registrations: Vec<HitRegistration>,
    region: Option<BeamRegion>,
}

impl BeamChecker {
    pub fn new() -> Self {
        Self::with_registrations(Vec::new())
    }

    pub fn with_registrations(registrations: Vec<HitRegistration>) -> Self {
        Self {
            status: CheckerStatus::Created,
            origin: None,
            half_width: 0.0,
            direction: Direction::Right,
            hit_targets: HashSet::new(),
            registrations,
            region: None,
        }
    }

    /// 파라미터를 (재)설정한다. STARTED 중에는 거부된다.
    pub fn define(
        &mut self,
        origin: EntityRef,
        width: f32,
        direction: Direction,
    ) -> Result<(), GameError> {
        if self.status == CheckerStatus::Started {
            return Err(GameError::CheckerBusy(self.status));
        }

        self.status = CheckerStatus::Created;
        self.origin = Some(origin);
        self.half_width = if width > 0.0 { width / 2.0 } else { 0.0 };
        self.direction = direction;
        self.hit_targets.clear();
        self.region = None;
        Ok(())
    }

    /// CREATED 에서만 시작된다
    pub fn start(&mut self) -> bool {
        if self.status == CheckerStatus::Created {
            self.status = CheckerStatus::Started;
            return true;
        }
        false
    }

    pub fn stop(&mut self) {
        if self.status != CheckerStatus::Stopped {
            self.status = CheckerStatus::Stopped;
            debug!("beam stopped after {} hit(s)", self.hit_targets.len());
        }
    }

    pub fn status(&self) -> CheckerStatus {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 마지막 틱에서 쓴 영역
    pub fn region(&self) -> Option<BeamRegion> {
        self.region
    }

    pub fn has_hit(&self, id: EntityId) -> bool {
        self.hit_targets.contains(&id)
    }

    pub fn hit_count(&self) -> usize {
        self.hit_targets.len()
    }

    /// 판정 한 번. 새로 맞은 대상 수를 돌려준다.
    pub fn tick(
        &mut self,
        scene: &dyn EntityRegistry,
        bounds: Vec2,
        dispatcher: &HitDispatcher,
    ) -> usize {
        if self.status != CheckerStatus::Started {
            return 0;
        }
        let Some(origin) = self.origin.as_ref() else {
            return 0;
        };

        let region = BeamRegion::anchored(origin.position(), self.half_width, self.direction, bounds);
        self.region = Some(region);

        let hit_targets = &mut self.hit_targets;
        scan_targets(&self.registrations, scene, dispatcher, |candidate| {
            if hit_targets.contains(&candidate.id()) {
                return false;
            }
            if region.contains(candidate.position()) {
                hit_targets.insert(candidate.id());
                return true;
            }
            false
        })
    }
}

impl Default for BeamChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackChecker for BeamChecker {
    fn register_hit(&mut self, kind: SpriteKind, callback: HitCallback) {
        self.registrations.push(HitRegistration::new(kind, callback));
    }

    fn registrations(&self) -> &[HitRegistration] {
        &self.registrations
    }
}
