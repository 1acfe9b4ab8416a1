use glam::Vec2;
use tracing::{debug, info};

use super::action::{Action, ActionStamp};
use super::log::ArchivedLog;
use crate::enums::SpriteKind;
use crate::world::{EntityRef, EntityRegistry};

/// 리플레이어가 구동하는 대상
pub trait ReplayActor {
    /// 재생할 기록
    fn actions(&self) -> &[ActionStamp];

    fn apply(&mut self, action: Action);

    /// 엔티티가 이미 사라져서 남은 입력을 버려야 하는지
    fn is_gone(&self) -> bool;
}

/// 지난 세션의 플레이어를 흉내 내는 고스트
pub struct GhostActor {
    entity: EntityRef,
    log: ArchivedLog,
    speed: f32,
    farewell: bool,
    faded: bool,
}

impl GhostActor {
    pub const FAREWELL: &'static str = "R to another timeline, keep fighting";

    /// # Arguments
    ///
    /// * `entity` - 고스트 스프라이트
    /// * `log` - 재생할 세션 기록
    /// * `speed` - 이동 입력 하나가 만드는 속력
    /// * `farewell` - 사라질 때 작별 인사를 남길지
    pub fn new(entity: EntityRef, log: ArchivedLog, speed: f32, farewell: bool) -> Self {
        Self {
            entity,
            log,
            speed,
            farewell,
            faded: false,
        }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn session(&self) -> usize {
        self.log.session()
    }

    pub fn says_farewell(&self) -> bool {
        self.farewell
    }

    pub fn is_faded(&self) -> bool {
        self.faded
    }

    /// 더 이상 충돌하지 않게 하고 멈춘다
    pub fn fade_out(&mut self) {
        if self.faded {
            return;
        }
        let mut flags = self.entity.flags();
        flags.ghost = true;
        self.entity.set_flags(flags);
        self.entity.set_velocity(Vec2::ZERO);
        self.faded = true;

        if self.farewell {
            info!("ghost #{} says: {}", self.session(), Self::FAREWELL);
        } else {
            debug!("ghost #{} faded out", self.session());
        }
    }

    /// 오른쪽으로 발사체 하나. 사라졌거나 페이드아웃된 고스트는 쏘지 않는다.
    pub fn fire(&self, scene: &dyn EntityRegistry, projectile_speed: f32) -> bool {
        if self.faded || self.entity.is_destroyed() {
            return false;
        }
        scene.spawn_projectile(
            &self.entity,
            Vec2::new(projectile_speed, 0.0),
            SpriteKind::Projectile,
            None,
        );
        true
    }
}

impl ReplayActor for GhostActor {
    fn actions(&self) -> &[ActionStamp] {
        self.log.actions()
    }

    fn apply(&mut self, action: Action) {
        match action.direction() {
            Some(direction) => self.entity.set_velocity(direction.unit() * self.speed),
            None => self.fade_out(),
        }
    }

    fn is_gone(&self) -> bool {
        self.entity.is_destroyed()
    }
}
