//! 시간 여행 흐름
//!
//! 세션 하나 = 우주 하나. 플레이어가 죽으면 그 세션의 입력 기록이 보관되고, 다음
//! 세션에서는 보관된 기록마다 고스트가 하나씩 나타나 지난 플레이를 그대로 따라 한다.

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use tracing::{info, warn};

use crate::config::{GameBalanceConfig, ReplayConfig};
use crate::engine::{EngineClock, VirtualTime};
use crate::enums::{Direction, SpriteKind};
use crate::timeline::{
    Action, ActionLog, ArchivedLog, GhostActor, TimelineArchive, TimelineReplayer,
};
use crate::world::{EntityRef, EntityRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Normal,
    EndGame,
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::EndGame => write!(f, "ENDGAME"),
        }
    }
}

pub struct TimelineEngine {
    archive: TimelineArchive,
    live: Option<ActionLog>,
    ghosts: Vec<GhostActor>,
    replayer: TimelineReplayer,
    player: Option<EntityRef>,
    clock: Arc<EngineClock>,
    scene: Arc<dyn EntityRegistry>,
    config: ReplayConfig,
    spawn_at: Vec2,
    status: EngineStatus,
    destroyed_universes: u32,
}

impl TimelineEngine {
    pub fn new(
        scene: Arc<dyn EntityRegistry>,
        clock: Arc<EngineClock>,
        config: &GameBalanceConfig,
    ) -> Self {
        Self {
            archive: TimelineArchive::new(),
            live: None,
            ghosts: Vec::new(),
            replayer: TimelineReplayer::new(),
            player: None,
            clock,
            scene,
            config: config.replay.clone(),
            spawn_at: Vec2::new(config.replay.ghost_spawn_x, config.arena.height / 2.0),
            status: EngineStatus::EndGame,
            destroyed_universes: 0,
        }
    }

    /// 새 우주 시작
    ///
    /// 이전 세션의 플레이어와 고스트를 치우고, 시계 원점을 옮기고, 보관된 기록마다
    /// 고스트를 하나씩 만든다. 새 플레이어 엔티티를 돌려준다.
    pub fn begin_session(&mut self) -> EntityRef {
        if let Some(player) = self.player.take() {
            player.destroy();
        }
        for ghost in self.ghosts.drain(..) {
            ghost.entity().destroy();
        }

        let base = self.clock.rebase();
        let player = self.spawn_pilot(SpriteKind::Player);

        let farewell = self.destroyed_universes <= self.config.farewell_universe_limit;
        self.ghosts = self
            .archive
            .iter()
            .map(|log| {
                let entity = self.spawn_pilot(SpriteKind::TimeTravelPlayer);
                GhostActor::new(entity, log.clone(), self.config.ghost_speed, farewell)
            })
            .collect();

        self.replayer.reset(base, self.ghosts.len());
        self.live = Some(ActionLog::new(self.archive.len()));
        self.player = Some(player.clone());
        self.status = EngineStatus::Normal;

        info!(
            "universe #{} begins with {} ghost(s)",
            self.archive.len() + 1,
            self.ghosts.len()
        );
        player
    }

    /// 현재 엔진 시각으로 입력 기록. ENDGAME 중이면 무시하고 false.
    pub fn record(&mut self, action: Action) -> bool {
        if self.status != EngineStatus::Normal {
            return false;
        }
        let timestamp = self.clock.engine_time();
        match self.live.as_mut() {
            Some(log) => {
                log.record(action, timestamp);
                true
            }
            None => {
                warn!("no live session, dropping {}", action);
                false
            }
        }
    }

    /// 플레이어 조작. 속도를 바꾸고 입력을 기록한다.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.status != EngineStatus::Normal {
            return false;
        }
        if let Some(player) = self.player.as_ref() {
            player.set_velocity(direction.unit() * self.config.ghost_speed);
        }
        self.record(Action::from(direction))
    }

    /// 현재 세션 종료. 이미 종료 중이면 false.
    ///
    /// 엔진 시계를 멈추고 움직이던 것을 전부 세운 뒤 종료 입력을 붙여 기록을 보관한다.
    pub fn end_session(&mut self) -> bool {
        if self.status == EngineStatus::EndGame {
            return false;
        }
        self.status = EngineStatus::EndGame;
        self.clock.halt();

        if let Some(player) = self.player.as_ref() {
            let mut flags = player.flags();
            flags.ghost = true;
            player.set_flags(flags);
        }
        self.freeze_everything();

        let halted_at = self.clock.engine_time();
        if let Some(mut log) = self.live.take() {
            log.record(Action::Destroy, halted_at);
            self.archive.push(log.archive());
        }
        self.destroyed_universes += 1;

        info!(
            "universe #{} destroyed at {}ms",
            self.destroyed_universes, halted_at
        );
        true
    }

    /// 고스트 재생 한 단계. 적용한 입력 수를 돌려준다.
    pub fn tick(&mut self) -> usize {
        if self.status != EngineStatus::Normal {
            return 0;
        }
        self.replayer.tick(self.clock.runtime(), &mut self.ghosts)
    }

    /// 살아 있는 고스트 전부 한 발씩 쏜다
    pub fn fire_ghosts(&self) -> usize {
        if self.status != EngineStatus::Normal {
            return 0;
        }
        self.ghosts
            .iter()
            .filter(|ghost| ghost.fire(self.scene.as_ref(), self.config.projectile_speed))
            .count()
    }

    pub fn fire_player(&self) -> bool {
        if self.status != EngineStatus::Normal {
            return false;
        }
        match self.player.as_ref() {
            Some(player) if !player.is_destroyed() => {
                self.scene.spawn_projectile(
                    player,
                    Vec2::new(self.config.projectile_speed, 0.0),
                    SpriteKind::Projectile,
                    None,
                );
                true
            }
            _ => false,
        }
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn engine_time(&self) -> VirtualTime {
        self.clock.engine_time()
    }

    pub fn destroyed_universes(&self) -> u32 {
        self.destroyed_universes
    }

    pub fn archive(&self) -> &TimelineArchive {
        &self.archive
    }

    pub fn last_archived(&self) -> Option<&ArchivedLog> {
        self.archive.logs().last()
    }

    pub fn ghosts(&self) -> &[GhostActor] {
        &self.ghosts
    }

    pub fn player(&self) -> Option<&EntityRef> {
        self.player.as_ref()
    }

    pub fn live_len(&self) -> usize {
        self.live.as_ref().map(ActionLog::len).unwrap_or(0)
    }

    pub fn replayer(&self) -> &TimelineReplayer {
        &self.replayer
    }

    fn freeze_everything(&self) {
        for kind in [
            SpriteKind::Player,
            SpriteKind::TimeTravelPlayer,
            SpriteKind::Projectile,
            SpriteKind::EnemyProjectile,
            SpriteKind::Explosion,
        ] {
            for entity in self.scene.all_of_kind(kind) {
                entity.set_velocity(Vec2::ZERO);
            }
        }
    }

    fn spawn_pilot(&self, kind: SpriteKind) -> EntityRef {
        let entity = self.scene.spawn(kind, self.spawn_at);
        let mut flags = entity.flags();
        flags.stay_in_screen = true;
        entity.set_flags(flags);
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;
    use std::time::Duration;
    use tokio::time::sleep;

    fn engine() -> (Arc<World>, TimelineEngine) {
        let config = GameBalanceConfig::default();
        let world = Arc::new(World::new(Vec2::new(160.0, 120.0)));
        let engine = TimelineEngine::new(world.clone(), Arc::new(EngineClock::new()), &config);
        (world, engine)
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_session_archives_with_destroy() {
        let (_world, mut engine) = engine();
        engine.begin_session();

        sleep(Duration::from_millis(100)).await;
        assert!(engine.steer(Direction::Up));
        sleep(Duration::from_millis(800)).await;
        assert!(engine.end_session());
        assert!(!engine.end_session());
        assert!(!engine.record(Action::Left));

        let log = engine.last_archived().unwrap();
        assert_eq!(log.dump(), "100:up;900:destroy;");
        assert_eq!(engine.destroyed_universes(), 1);
        assert_eq!(engine.status(), EngineStatus::EndGame);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_session_freezes_moving_sprites() {
        let (world, mut engine) = engine();
        engine.begin_session();
        engine.steer(Direction::Right);
        assert!(engine.fire_player());
        let source = world.spawn(SpriteKind::Boss, Vec2::new(100.0, 60.0));
        let debris = world.spawn_projectile(
            &source,
            Vec2::new(-50.0, 50.0),
            SpriteKind::EnemyProjectile,
            None,
        );

        engine.end_session();
        world.step(500);

        let player = engine.player().unwrap();
        assert_eq!(player.velocity(), Vec2::ZERO);
        assert!(player.flags().ghost);
        assert_eq!(debris.velocity(), Vec2::ZERO);
        assert_eq!(debris.position(), Vec2::new(100.0, 60.0));
        for shot in world.all_of_kind(SpriteKind::Projectile) {
            assert_eq!(shot.velocity(), Vec2::ZERO);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_halts_during_endgame() {
        let (_world, mut engine) = engine();
        engine.begin_session();
        sleep(Duration::from_millis(300)).await;
        engine.end_session();

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(engine.engine_time(), 300);
        assert_eq!(engine.tick(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_session_spawns_one_ghost_per_log() {
        let (world, mut engine) = engine();
        for _ in 0..2 {
            engine.begin_session();
            sleep(Duration::from_millis(50)).await;
            engine.end_session();
        }
        engine.begin_session();

        assert_eq!(engine.ghosts().len(), 2);
        assert_eq!(world.all_of_kind(SpriteKind::TimeTravelPlayer).len(), 2);
        assert_eq!(world.all_of_kind(SpriteKind::Player).len(), 1);
        assert_eq!(engine.ghosts()[0].entity().position(), Vec2::new(32.0, 60.0));
        assert_eq!(engine.fire_ghosts(), 2);
    }
}
