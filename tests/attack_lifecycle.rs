mod common;

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use parking_lot::Mutex;
use tokio::time::sleep;

use timeline_strike::animation::CommandCanvas;
use timeline_strike::attack::{hit_callback, AngerCooldown, AttackObject, CheckerStatus};
use timeline_strike::enums::{Direction, SpriteKind};
use timeline_strike::world::{EntityRef, EntityRegistry};

use common::{harness, recorder, settle};

#[tokio::test(start_paused = true)]
async fn laser_visual_switches_to_firing_with_checker() {
    let h = harness();
    let boss = h.world.spawn(SpriteKind::Boss, Vec2::new(140.0, 60.0));
    let attack = h.registry.launch(boss, Direction::Left, 20.0, 1000, 1000);

    let mut canvas = CommandCanvas::new();
    h.animations.paint(&mut canvas, 0);
    assert_eq!(canvas.rect_count(), 0);

    sleep(Duration::from_millis(1501)).await;
    assert_eq!(
        h.registry.beam_status(attack.id()),
        Some(CheckerStatus::Started)
    );
    h.animations.paint(&mut canvas, 1501);
    assert_eq!(canvas.rect_count(), 2);

    sleep(Duration::from_millis(1000)).await;
    assert!(!attack.is_active());
    h.animations.paint(&mut canvas, 2501);
    assert_eq!(canvas.commands.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn stopped_attack_never_starts() {
    let h = harness();
    let boss = h.world.spawn(SpriteKind::Boss, Vec2::new(50.0, 50.0));
    h.world.spawn(SpriteKind::Player, Vec2::new(80.0, 50.0));
    let (hits, callback) = recorder();
    h.registry.on_beam_hit(SpriteKind::Player, callback);

    let attack = h.registry.launch(boss, Direction::Right, 20.0, 1000, 0);
    sleep(Duration::from_millis(200)).await;
    assert!(attack.stop_at_once());

    sleep(Duration::from_millis(400)).await;
    assert_eq!(h.registry.tick(), 0);
    settle().await;
    assert!(hits.lock().is_empty());
    assert_eq!(h.registry.beam_status(attack.id()), None);
}

#[tokio::test(start_paused = true)]
async fn hit_callback_can_cut_its_own_attack_short() {
    let h = harness();
    let boss = h.world.spawn(SpriteKind::Boss, Vec2::new(50.0, 50.0));
    h.world.spawn(SpriteKind::Player, Vec2::new(80.0, 50.0));

    let handle: Arc<Mutex<Option<AttackObject>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&handle);
    h.registry.on_beam_hit(
        SpriteKind::Player,
        hit_callback(move |_target: EntityRef| {
            let slot = Arc::clone(&slot);
            async move {
                let attack = slot.lock().clone();
                if let Some(attack) = attack {
                    attack.stop_at_once();
                }
            }
        }),
    );

    let attack = h.registry.launch(boss, Direction::Right, 20.0, 5000, 0);
    *handle.lock() = Some(attack.clone());

    sleep(Duration::from_millis(501)).await;
    assert_eq!(h.registry.tick(), 1);
    settle().await;

    assert!(!attack.is_active());
    assert!(h.animations.is_empty());
}

#[tokio::test(start_paused = true)]
async fn detonation_hits_then_scatters_debris() {
    let h = harness();
    let mine = h.world.spawn(SpriteKind::Explosion, Vec2::new(100.0, 100.0));
    mine.set_velocity(Vec2::new(10.0, 0.0));
    let victim = h.world.spawn(SpriteKind::Player, Vec2::new(110.0, 100.0));
    let (hits, callback) = recorder();
    h.registry.on_blast_hit(SpriteKind::Player, callback);

    let attack = h.registry.detonate(mine.clone(), 24.0, 1000);
    assert_eq!(mine.velocity(), Vec2::ZERO);

    sleep(Duration::from_millis(999)).await;
    assert!(hits.lock().is_empty());

    sleep(Duration::from_millis(2)).await;
    assert_eq!(*hits.lock(), vec![victim.id()]);
    assert!(mine.is_destroyed());
    assert!(attack.is_active());
    assert_eq!(h.animations.len(), 1);

    let debris = h.world.all_of_kind(SpriteKind::EnemyProjectile);
    assert_eq!(debris.len(), 4);
    let mut velocities: Vec<(i32, i32)> = debris
        .iter()
        .map(|d| (d.velocity().x as i32, d.velocity().y as i32))
        .collect();
    velocities.sort();
    assert_eq!(velocities, vec![(-50, -50), (-50, 50), (50, -50), (50, 50)]);
    assert!(debris.iter().all(|d| d.position() == Vec2::new(100.0, 100.0)));

    sleep(Duration::from_millis(1000)).await;
    assert!(!attack.is_active());
    assert!(h.animations.is_empty());
    assert_eq!(h.world.all_of_kind(SpriteKind::EnemyProjectile).len(), 4);
}

#[tokio::test(start_paused = true)]
async fn cancelled_detonation_only_removes_the_actor() {
    let h = harness();
    let mine = h.world.spawn(SpriteKind::Explosion, Vec2::new(100.0, 100.0));
    h.world.spawn(SpriteKind::Player, Vec2::new(100.0, 100.0));
    let (hits, callback) = recorder();
    h.registry.on_blast_hit(SpriteKind::Player, callback);

    let attack = h.registry.detonate(mine.clone(), 24.0, 1000);
    sleep(Duration::from_millis(500)).await;
    assert!(attack.stop_at_once());
    assert!(h.animations.is_empty());

    sleep(Duration::from_millis(600)).await;
    settle().await;
    assert!(mine.is_destroyed());
    assert!(hits.lock().is_empty());
    assert!(h.world.all_of_kind(SpriteKind::EnemyProjectile).is_empty());
}

#[tokio::test(start_paused = true)]
async fn anger_attack_waits_for_its_cooldown() {
    let h = harness();
    let boss = h.world.spawn(SpriteKind::Boss, Vec2::new(140.0, 60.0));
    let cooldown = AngerCooldown::new();

    let first = cooldown.try_launch(&h.registry, boss.clone(), Direction::Left, 50.0, 1000, 2000);
    assert!(first.is_some());
    assert!(cooldown.is_cooling_down());

    sleep(Duration::from_millis(500)).await;
    assert!(first.as_ref().is_some_and(|attack| attack.stop_at_once()));
    assert!(cooldown
        .try_launch(&h.registry, boss.clone(), Direction::Left, 50.0, 1000, 2000)
        .is_none());

    sleep(Duration::from_millis(2499)).await;
    assert!(cooldown.is_cooling_down());

    sleep(Duration::from_millis(2)).await;
    assert!(!cooldown.is_cooling_down());
    let second = cooldown.try_launch(&h.registry, boss, Direction::Left, 50.0, 1000, 2000);
    assert!(second.is_some_and(|attack| attack.is_active()));
    assert_eq!(h.registry.active_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn detonation_ignores_faded_ghosts() {
    let h = harness();
    let mine = h.world.spawn(SpriteKind::Explosion, Vec2::new(60.0, 60.0));
    let faded = h.world.spawn(SpriteKind::TimeTravelPlayer, Vec2::new(60.0, 70.0));
    let mut flags = faded.flags();
    flags.ghost = true;
    faded.set_flags(flags);
    let solid = h.world.spawn(SpriteKind::TimeTravelPlayer, Vec2::new(70.0, 60.0));
    let (hits, callback) = recorder();
    h.registry.on_blast_hit(SpriteKind::TimeTravelPlayer, callback);

    h.registry.detonate(mine, 24.0, 500);
    sleep(Duration::from_millis(501)).await;
    settle().await;

    assert_eq!(*hits.lock(), vec![solid.id()]);
}
