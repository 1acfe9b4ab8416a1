#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use parking_lot::Mutex;

use timeline_strike::animation::AnimationHolder;
use timeline_strike::attack::{hit_callback, AttackRegistry, HitCallback};
use timeline_strike::config::GameBalanceConfig;
use timeline_strike::engine::EngineClock;
use timeline_strike::world::{EntityId, EntityRef, World};

pub const ARENA: Vec2 = Vec2::new(160.0, 120.0);

pub struct Harness {
    pub world: Arc<World>,
    pub animations: Arc<AnimationHolder>,
    pub clock: Arc<EngineClock>,
    pub registry: Arc<AttackRegistry>,
    pub config: GameBalanceConfig,
}

/// tokio 런타임 안에서 만들어야 한다
pub fn harness() -> Harness {
    let config = GameBalanceConfig::default();
    let world = Arc::new(World::new(ARENA));
    let animations = Arc::new(AnimationHolder::new());
    let clock = Arc::new(EngineClock::new());
    let registry = AttackRegistry::new(world.clone(), animations.clone(), clock.clone(), &config);
    Harness {
        world,
        animations,
        clock,
        registry,
        config,
    }
}

/// 맞은 대상 id 를 모으는 콜백
pub fn recorder() -> (Arc<Mutex<Vec<EntityId>>>, HitCallback) {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&hits);
    let callback = hit_callback(move |target: EntityRef| {
        let sink = Arc::clone(&sink);
        async move {
            sink.lock().push(target.id());
        }
    });
    (hits, callback)
}

/// 밀린 콜백 태스크가 끝나도록 가상 시간을 조금 흘린다
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
