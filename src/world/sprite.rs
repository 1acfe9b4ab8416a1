use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{Entity, EntityId, EntityRef, EntityRegistry, SpriteFlags};
use crate::enums::SpriteKind;

#[derive(Debug, Clone)]
struct SpriteState {
    position: Vec2,
    velocity: Vec2,
    flags: SpriteFlags,
    lifespan_ms: Option<u64>,
    destroyed: bool,
}

/// 메모리 상의 스프라이트
#[derive(Debug)]
pub struct Sprite {
    id: EntityId,
    kind: SpriteKind,
    state: Mutex<SpriteState>,
}

impl Sprite {
    pub fn new(kind: SpriteKind, position: Vec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            state: Mutex::new(SpriteState {
                position,
                velocity: Vec2::ZERO,
                flags: SpriteFlags::default(),
                lifespan_ms: None,
                destroyed: false,
            }),
        }
    }

    pub fn lifespan_ms(&self) -> Option<u64> {
        self.state.lock().lifespan_ms
    }

    pub fn set_lifespan_ms(&self, lifespan_ms: Option<u64>) {
        self.state.lock().lifespan_ms = lifespan_ms;
    }

    /// `dt_ms` 만큼 이동. 수명이 다하면 파괴된다.
    fn advance(&self, dt_ms: u64, bounds: Vec2) {
        let mut state = self.state.lock();
        if state.destroyed {
            return;
        }

        let delta = state.velocity * (dt_ms as f32 / 1000.0);
        state.position += delta;
        if state.flags.stay_in_screen {
            state.position = state.position.clamp(Vec2::ZERO, bounds);
        }

        if let Some(remaining) = state.lifespan_ms {
            let remaining = remaining.saturating_sub(dt_ms);
            state.lifespan_ms = Some(remaining);
            if remaining == 0 {
                state.destroyed = true;
            }
        }
    }
}

impl Entity for Sprite {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> SpriteKind {
        self.kind
    }

    fn position(&self) -> Vec2 {
        self.state.lock().position
    }

    fn set_position(&self, position: Vec2) {
        self.state.lock().position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.state.lock().velocity
    }

    fn set_velocity(&self, velocity: Vec2) {
        self.state.lock().velocity = velocity;
    }

    fn flags(&self) -> SpriteFlags {
        self.state.lock().flags
    }

    fn set_flags(&self, flags: SpriteFlags) {
        self.state.lock().flags = flags;
    }

    fn destroy(&self) {
        self.state.lock().destroyed = true;
    }

    fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }
}

/// 헤드리스 스프라이트 월드
pub struct World {
    sprites: Mutex<Vec<Arc<Sprite>>>,
    bounds: Vec2,
}

impl World {
    pub fn new(bounds: Vec2) -> Self {
        Self {
            sprites: Mutex::new(Vec::new()),
            bounds,
        }
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// 물리 한 스텝. 파괴된 스프라이트는 여기서 정리된다.
    pub fn step(&self, dt_ms: u64) {
        let mut sprites = self.sprites.lock();
        for sprite in sprites.iter() {
            sprite.advance(dt_ms, self.bounds);
        }
        sprites.retain(|sprite| !sprite.is_destroyed());
    }

    pub fn destroy_all_of_kind(&self, kind: SpriteKind) -> usize {
        let sprites = self.sprites.lock();
        let mut count = 0;
        for sprite in sprites.iter().filter(|s| s.kind == kind) {
            sprite.destroy();
            count += 1;
        }
        debug!("destroyed {} sprite(s) of kind {}", count, kind);
        count
    }

    pub fn len(&self) -> usize {
        self.sprites
            .lock()
            .iter()
            .filter(|sprite| !sprite.is_destroyed())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, sprite: Sprite) -> Arc<Sprite> {
        let sprite = Arc::new(sprite);
        self.sprites.lock().push(Arc::clone(&sprite));
        sprite
    }
}

impl EntityRegistry for World {
    fn all_of_kind(&self, kind: SpriteKind) -> Vec<EntityRef> {
        self.sprites
            .lock()
            .iter()
            .filter(|sprite| sprite.kind == kind && !sprite.is_destroyed())
            .map(|sprite| Arc::clone(sprite) as EntityRef)
            .collect()
    }

    fn spawn(&self, kind: SpriteKind, position: Vec2) -> EntityRef {
        self.insert(Sprite::new(kind, position))
    }

    fn spawn_projectile(
        &self,
        source: &EntityRef,
        velocity: Vec2,
        kind: SpriteKind,
        lifespan_ms: Option<u64>,
    ) -> EntityRef {
        let sprite = Sprite::new(kind, source.position());
        sprite.set_velocity(velocity);
        sprite.set_lifespan_ms(lifespan_ms);
        self.insert(sprite)
    }
}
