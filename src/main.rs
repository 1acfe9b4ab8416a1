use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use glam::Vec2;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info};

use timeline_strike::animation::{AnimationHolder, CommandCanvas};
use timeline_strike::attack::{hit_callback, AngerCooldown, AttackRegistry};
use timeline_strike::config::GameBalanceConfig;
use timeline_strike::engine::{EngineClock, FrameLoop, VirtualClock};
use timeline_strike::enums::{Direction, SpriteKind};
use timeline_strike::exception::GameError;
use timeline_strike::session::TimelineEngine;
use timeline_strike::world::{EntityRef, EntityRegistry, World};
use timeline_strike::{setup_logger, LogExt};

#[derive(Parser)]
#[command(
    name = "timeline strike",
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,
)]
struct Args {
    /// 플레이할 우주(세션) 수
    #[arg(long, default_value_t = 3)]
    sessions: usize,

    /// 세션 하나의 최대 프레임 수
    #[arg(long, default_value_t = 600)]
    frames: u64,

    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// 밸런스 설정 파일. 없으면 기본 탐색 경로를 쓴다.
    #[arg(long)]
    config: Option<PathBuf>,

    /// 보관된 기록을 JSON 으로 남길 디렉터리
    #[arg(long)]
    dump_dir: Option<PathBuf>,
}

const BOSS_ATTACK_PERIOD_MS: u64 = 2000;
const STEER_PERIOD_MS: u64 = 300;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), GameError> {
    setup_logger();
    let args = Args::parse();

    let config = match args.config.as_ref() {
        Some(path) => GameBalanceConfig::load_from(path)
            .log_ok(|_| info!("loaded config from {}", path.display()))
            .log_err(|e| error!("failed to load {}: {} ({})", path.display(), e, e.code()))?,
        None => GameBalanceConfig::global().clone(),
    };

    let arena = Vec2::new(config.arena.width, config.arena.height);
    let world = Arc::new(World::new(arena));
    let clock = Arc::new(EngineClock::new());
    let animations = Arc::new(AnimationHolder::new());
    let registry = AttackRegistry::new(world.clone(), animations.clone(), clock.clone(), &config);
    let engine = Arc::new(Mutex::new(TimelineEngine::new(
        world.clone(),
        clock.clone(),
        &config,
    )));

    let player_down = Arc::new(AtomicBool::new(false));
    let player_hit = {
        let player_down = Arc::clone(&player_down);
        hit_callback(move |target: EntityRef| {
            let player_down = Arc::clone(&player_down);
            async move {
                if !target.is_destroyed() {
                    player_down.store(true, Ordering::SeqCst);
                }
            }
        })
    };
    registry.on_beam_hit(SpriteKind::Player, player_hit.clone());
    registry.on_blast_hit(SpriteKind::Player, player_hit);
    registry.on_beam_hit(
        SpriteKind::TimeTravelPlayer,
        hit_callback(|target: EntityRef| async move {
            info!("a ghost was caught by the beam");
            target.destroy();
        }),
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    for _ in 0..args.sessions {
        player_down.store(false, Ordering::SeqCst);
        engine.lock().begin_session();
        let boss = world.spawn(
            SpriteKind::Boss,
            Vec2::new(arena.x - 16.0, arena.y / 2.0),
        );

        let mut frame_loop = FrameLoop::new(clock.clone(), config.frame.step_ms);
        {
            let world = world.clone();
            let registry = registry.clone();
            let engine = engine.clone();
            let animations = animations.clone();
            let step_ms = config.frame.step_ms;
            let mut canvas = CommandCanvas::new();
            frame_loop.on_every_tick(move |now| {
                world.step(step_ms);
                registry.tick();
                engine.lock().tick();
                animations.paint(&mut canvas, now);
            });
        }
        {
            let engine = engine.clone();
            frame_loop.on_interval_tick(config.replay.ghost_fire_period_ms, move |_| {
                let engine = engine.lock();
                engine.fire_ghosts();
                engine.fire_player();
            });
        }
        {
            let engine = engine.clone();
            let mut rng = StdRng::seed_from_u64(rng.gen());
            frame_loop.on_interval_tick(STEER_PERIOD_MS, move |_| {
                let direction = match rng.gen_range(0..4) {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                engine.lock().steer(direction);
            });
        }
        {
            let registry = registry.clone();
            let world = world.clone();
            let boss = boss.clone();
            let cooldown = AngerCooldown::new();
            let mut rng = StdRng::seed_from_u64(rng.gen());
            frame_loop.on_interval_tick(BOSS_ATTACK_PERIOD_MS, move |_| {
                if rng.gen_bool(0.7) {
                    cooldown.try_launch(&registry, boss.clone(), Direction::Left, 20.0, 1500, 1000);
                } else {
                    let at = Vec2::new(rng.gen_range(16.0..arena.x - 16.0), rng.gen_range(16.0..arena.y - 16.0));
                    let mine = world.spawn(SpriteKind::Explosion, at);
                    registry.detonate(mine, 24.0, 1000);
                }
                boss.set_velocity(Vec2::new(0.0, rng.gen_range(-30.0..30.0)));
            });
        }

        let down = Arc::clone(&player_down);
        let frames = frame_loop
            .run_until(args.frames, || down.load(Ordering::SeqCst))
            .await;

        engine.lock().end_session();
        let stopped = registry.stop_all();
        for kind in [
            SpriteKind::Boss,
            SpriteKind::Projectile,
            SpriteKind::EnemyProjectile,
            SpriteKind::Explosion,
        ] {
            world.destroy_all_of_kind(kind);
        }
        info!(
            "session over after {} frame(s) at {}ms, {} attack(s) cut short",
            frames,
            clock.now(),
            stopped
        );
    }

    let engine = engine.lock();
    println!(
        "{} universe(s) destroyed, {} hit(s) dispatched",
        engine.destroyed_universes(),
        registry.dispatcher().dispatched()
    );
    println!("{}", engine.archive().dump());

    if let Some(dir) = args.dump_dir.as_ref() {
        std::fs::create_dir_all(dir)?;
        for log in engine.archive().iter() {
            log.write_json(dir.join(format!("universe_{}.json", log.session())))?;
        }
    }
    Ok(())
}
