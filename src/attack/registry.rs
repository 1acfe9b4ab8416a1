use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use parking_lot::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::beam::BeamChecker;
use super::blast::BlastChecker;
use super::checker::{AttackChecker, Checker, CheckerStatus};
use super::dispatch::{HitCallback, HitDispatcher, HitRegistration};
use super::object::{AttackId, AttackObject};
use crate::animation::{
    AnimationHolder, AttackAnimation, BuildupAnimation, ExplosionAnimation, LaserAnimation,
    VisualId,
};
use crate::config::{AttackConfig, GameBalanceConfig};
use crate::engine::VirtualClock;
use crate::enums::{Direction, SpriteKind};
use crate::world::{EntityRef, EntityRegistry};

struct AttackEntry {
    checker: Checker,
    visual: Option<VisualId>,
}

#[derive(Default)]
struct Slot {
    generation: u32,
    entry: Option<AttackEntry>,
}

#[derive(Default)]
struct RegistryInner {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// 새 빔마다 복사되는 등록 목록
    beam_hits: Vec<HitRegistration>,
    blast_template: BlastChecker,
}

impl RegistryInner {
    fn entry_mut(&mut self, id: AttackId) -> Option<&mut AttackEntry> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    fn insert(&mut self, entry: AttackEntry) -> AttackId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.entry = Some(entry);
        AttackId {
            index,
            generation: slot.generation,
        }
    }

    fn remove(&mut self, id: AttackId) -> Option<AttackEntry> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(entry)
    }
}

/// 진행 중인 공격 전체를 관리한다.
///
/// 빔/폭발 히트 등록, 공격 생명주기(예열, 발사, 종료), 프레임마다 빔 판정을 맡는다.
/// 공격마다 분리된 tokio 태스크가 타이밍을 진행시키고, 공격이 회수되면 남은 단계는
/// 아무 일도 하지 않는다.
///
/// 내부 잠금은 await 를 넘어서 잡지 않고 `AnimationHolder` 잠금과 겹쳐 잡지 않는다.
pub struct AttackRegistry {
    inner: Mutex<RegistryInner>,
    scene: Arc<dyn EntityRegistry>,
    animations: Arc<AnimationHolder>,
    dispatcher: HitDispatcher,
    clock: Arc<dyn VirtualClock>,
    arena: Vec2,
    config: AttackConfig,
}

impl AttackRegistry {
    /// tokio 런타임 안에서 호출해야 한다 (히트 디스패처 태스크를 띄운다)
    pub fn new(
        scene: Arc<dyn EntityRegistry>,
        animations: Arc<AnimationHolder>,
        clock: Arc<dyn VirtualClock>,
        config: &GameBalanceConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(RegistryInner::default()),
            scene,
            animations,
            dispatcher: HitDispatcher::spawn(),
            clock,
            arena: Vec2::new(config.arena.width, config.arena.height),
            config: config.attack.clone(),
        })
    }

    pub fn dispatcher(&self) -> &HitDispatcher {
        &self.dispatcher
    }

    pub fn animations(&self) -> &Arc<AnimationHolder> {
        &self.animations
    }

    /// 이후에 발사되는 빔에 적용된다. 이미 날아가는 빔은 바뀌지 않는다.
    pub fn on_beam_hit(&self, kind: SpriteKind, callback: HitCallback) {
        self.inner
            .lock()
            .beam_hits
            .push(HitRegistration::new(kind, callback));
    }

    pub fn on_blast_hit(&self, kind: SpriteKind, callback: HitCallback) {
        self.inner.lock().blast_template.register_hit(kind, callback);
    }

    /// 빔 공격 시작
    ///
    /// # Arguments
    ///
    /// * `origin` - 빔이 따라다닐 엔티티
    /// * `width` - 빔 전체 폭
    /// * `active_ms` - 발사 후 유지 시간
    /// * `warmup_ms` - 예열 시간. 여기에 설정의 유예 시간이 더해진 뒤 판정이 시작된다.
    pub fn launch(
        self: &Arc<Self>,
        origin: EntityRef,
        direction: Direction,
        width: f32,
        active_ms: u64,
        warmup_ms: u64,
    ) -> AttackObject {
        let mut beam = BeamChecker::with_registrations(self.inner.lock().beam_hits.clone());
        if let Err(e) = beam.define(origin.clone(), width, direction) {
            warn!("fresh beam rejected its parameters: {}", e);
        }

        let visual = self.animations.register(Box::new(LaserAnimation::new(
            origin, width, direction, self.arena,
        )));
        let id = self.inner.lock().insert(AttackEntry {
            checker: Checker::Beam(beam),
            visual: Some(visual),
        });
        info!(
            "beam {} launched: direction={}, width={}, warmup={}ms, active={}ms",
            id, direction, width, warmup_ms, active_ms
        );

        let registry = Arc::downgrade(self);
        let delay = warmup_ms + self.config.laser_grace_ms;
        tokio::spawn(async move {
            sleep(Duration::from_millis(delay)).await;
            let started = registry
                .upgrade()
                .map(|registry| registry.start_beam(id))
                .unwrap_or(false);
            if !started {
                return;
            }

            sleep(Duration::from_millis(active_ms)).await;
            if let Some(registry) = registry.upgrade() {
                registry.retire(id);
            }
        });

        AttackObject::new(id, Arc::downgrade(self))
    }

    /// 자폭 공격 시작. 예열이 끝나면 `actor` 의 마지막 위치에서 폭발한다.
    pub fn detonate(self: &Arc<Self>, actor: EntityRef, radius: f32, buildup_ms: u64) -> AttackObject {
        actor.set_velocity(Vec2::ZERO);

        let mut blast = self.inner.lock().blast_template.clone_template();
        blast.define(actor.position(), radius);

        let visual = self.animations.register(Box::new(BuildupAnimation::new(
            actor.position(),
            radius,
            self.clock.now(),
            buildup_ms,
        )));
        let id = self.inner.lock().insert(AttackEntry {
            checker: Checker::Blast(blast),
            visual: Some(visual),
        });
        info!("blast {} armed: radius={}, buildup={}ms", id, radius, buildup_ms);

        let registry = Arc::downgrade(self);
        let display_ms = self.config.blast_display_ms;
        tokio::spawn(async move {
            sleep(Duration::from_millis(buildup_ms)).await;
            let exploded = registry
                .upgrade()
                .map(|registry| registry.explode(id, &actor))
                .unwrap_or(false);

            actor.destroy();
            if !exploded {
                debug!("blast {} was cancelled before detonation", id);
                return;
            }
            if let Some(registry) = registry.upgrade() {
                registry.spawn_debris(&actor);
            }

            // 폭발 연출만 남는다
            sleep(Duration::from_millis(display_ms)).await;
            if let Some(registry) = registry.upgrade() {
                registry.retire(id);
            }
        });

        AttackObject::new(id, Arc::downgrade(self))
    }

    /// 프레임마다 호출. 발사 중인 빔 전부를 판정하고 새로 맞은 대상 수를 돌려준다.
    pub fn tick(&self) -> usize {
        let mut inner = self.inner.lock();
        let mut hits = 0;
        for slot in inner.slots.iter_mut() {
            if let Some(AttackEntry {
                checker: Checker::Beam(beam),
                ..
            }) = slot.entry.as_mut()
            {
                hits += beam.tick(self.scene.as_ref(), self.arena, &self.dispatcher);
            }
        }
        hits
    }

    /// 공격을 끝낸다. 이미 끝난 공격이면 false.
    pub fn retire(&self, id: AttackId) -> bool {
        let entry = self.inner.lock().remove(id);
        let Some(mut entry) = entry else {
            return false;
        };

        entry.checker.stop();
        if let Some(visual) = entry.visual {
            self.animations.unregister(visual);
        }
        info!("attack {} retired", id);
        true
    }

    pub fn is_live(&self, id: AttackId) -> bool {
        self.inner.lock().entry_mut(id).is_some()
    }

    /// 빔 체커의 현재 상태. 끝났거나 빔이 아니면 None.
    pub fn beam_status(&self, id: AttackId) -> Option<CheckerStatus> {
        self.inner
            .lock()
            .entry_mut(id)
            .and_then(|entry| entry.checker.as_beam().map(|beam| beam.status()))
    }

    pub fn active_count(&self) -> usize {
        self.inner
            .lock()
            .slots
            .iter()
            .filter(|slot| slot.entry.is_some())
            .count()
    }

    /// 진행 중인 공격 전부 회수
    pub fn stop_all(&self) -> usize {
        let ids: Vec<AttackId> = {
            let inner = self.inner.lock();
            inner
                .slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.entry.is_some())
                .map(|(index, slot)| AttackId {
                    index: index as u32,
                    generation: slot.generation,
                })
                .collect()
        };
        ids.into_iter().filter(|id| self.retire(*id)).count()
    }

    fn start_beam(&self, id: AttackId) -> bool {
        let visual = {
            let mut inner = self.inner.lock();
            let Some(entry) = inner.entry_mut(id) else {
                return false;
            };
            let Checker::Beam(beam) = &mut entry.checker else {
                return false;
            };
            if !beam.start() {
                return false;
            }
            entry.visual
        };

        if let Some(visual) = visual {
            self.animations.fire(visual);
        }
        info!("beam {} firing", id);
        true
    }

    fn explode(&self, id: AttackId, actor: &EntityRef) -> bool {
        let center = actor.position();
        let (hits, radius, old_visual) = {
            let mut inner = self.inner.lock();
            let Some(entry) = inner.entry_mut(id) else {
                return false;
            };
            let Checker::Blast(blast) = &mut entry.checker else {
                return false;
            };
            if blast.is_spent() {
                return false;
            }
            let radius = blast.radius();
            blast.define(center, radius);
            let hits = blast.evaluate(self.scene.as_ref(), &self.dispatcher);
            (hits, radius, entry.visual.take())
        };
        info!("blast {} detonated at {:?}: {} hit(s)", id, center, hits);

        if let Some(visual) = old_visual {
            self.animations.unregister(visual);
        }
        self.swap_visual(id, Box::new(ExplosionAnimation::new(center, radius)));
        true
    }

    fn swap_visual(&self, id: AttackId, animation: Box<dyn AttackAnimation>) {
        let visual = self.animations.register(animation);
        let attached = {
            let mut inner = self.inner.lock();
            match inner.entry_mut(id) {
                Some(entry) => {
                    entry.visual = Some(visual);
                    true
                }
                None => false,
            }
        };
        if !attached {
            self.animations.unregister(visual);
        }
    }

    fn spawn_debris(&self, source: &EntityRef) {
        let speed = self.config.debris_speed;
        for (vx, vy) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
            self.scene.spawn_projectile(
                source,
                Vec2::new(vx * speed, vy * speed),
                SpriteKind::EnemyProjectile,
                Some(self.config.debris_lifespan_ms),
            );
        }
        debug!("debris spawned at {:?}", source.position());
    }
}
