//! 엔티티 쪽 협력자 인터페이스
//!
//! 스프라이트 생성/렌더링은 이 크레이트의 관심사가 아니다. 공격 판정과 리플레이는
//! 아래 두 트레이트만 통해서 엔티티를 본다. `World` 는 헤드리스 실행과 테스트를 위한
//! 메모리 구현이다.

pub mod sprite;

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::SpriteKind;

pub use sprite::{Sprite, World};

pub type EntityId = Uuid;
pub type EntityRef = Arc<dyn Entity>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFlags {
    /// 충돌하지 않는 상태 (페이드아웃된 고스트 등)
    pub ghost: bool,
    /// 화면 고정 UI 요소
    pub relative_to_camera: bool,
    pub stay_in_screen: bool,
}

impl SpriteFlags {
    /// 판정 대상에서 빠져야 하는지
    pub fn is_non_interactive(&self) -> bool {
        self.ghost || self.relative_to_camera
    }
}

pub trait Entity: Send + Sync {
    fn id(&self) -> EntityId;
    fn kind(&self) -> SpriteKind;
    fn position(&self) -> Vec2;
    fn set_position(&self, position: Vec2);
    fn velocity(&self) -> Vec2;
    fn set_velocity(&self, velocity: Vec2);
    fn flags(&self) -> SpriteFlags;
    fn set_flags(&self, flags: SpriteFlags);
    fn destroy(&self);
    fn is_destroyed(&self) -> bool;
}

pub trait EntityRegistry: Send + Sync {
    /// 살아 있는 해당 종류 엔티티 전부
    fn all_of_kind(&self, kind: SpriteKind) -> Vec<EntityRef>;

    fn spawn(&self, kind: SpriteKind, position: Vec2) -> EntityRef;

    /// `source` 위치에서 발사체 생성. `lifespan_ms` 가 지나면 스스로 사라진다.
    fn spawn_projectile(
        &self,
        source: &EntityRef,
        velocity: Vec2,
        kind: SpriteKind,
        lifespan_ms: Option<u64>,
    ) -> EntityRef;
}
