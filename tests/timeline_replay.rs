mod common;

use glam::Vec2;

use timeline_strike::enums::SpriteKind;
use timeline_strike::timeline::{Action, ActionLog, GhostActor, TimelineReplayer};
use timeline_strike::world::{EntityRegistry, World};

use common::ARENA;

fn ghost_for(world: &World, stamps: &[(Action, u64)]) -> GhostActor {
    let mut log = ActionLog::new(0);
    for (action, timestamp) in stamps {
        log.record(*action, *timestamp);
    }
    let entity = world.spawn(SpriteKind::TimeTravelPlayer, Vec2::new(32.0, 60.0));
    GhostActor::new(entity, log.archive(), 50.0, true)
}

#[test]
fn replay_follows_recorded_offsets() {
    let world = World::new(ARENA);
    let mut ghosts = vec![ghost_for(
        &world,
        &[(Action::Right, 100), (Action::Down, 300), (Action::Destroy, 900)],
    )];
    let mut replayer = TimelineReplayer::new();
    replayer.reset(0, 1);

    assert_eq!(replayer.tick(50, &mut ghosts), 0);
    assert_eq!(ghosts[0].entity().velocity(), Vec2::ZERO);

    assert_eq!(replayer.tick(150, &mut ghosts), 1);
    assert_eq!(ghosts[0].entity().velocity(), Vec2::new(50.0, 0.0));
    assert_eq!(replayer.cursor(0), Some(1));

    assert_eq!(replayer.tick(950, &mut ghosts), 2);
    assert_eq!(replayer.cursor(0), Some(3));
    assert!(ghosts[0].is_faded());
    assert_eq!(ghosts[0].entity().velocity(), Vec2::ZERO);
    assert!(ghosts[0].entity().flags().ghost);

    assert_eq!(replayer.tick(2000, &mut ghosts), 0);
    assert_eq!(replayer.cursor(0), Some(3));
}

#[test]
fn cursor_never_moves_backwards() {
    let world = World::new(ARENA);
    let mut ghosts = vec![ghost_for(
        &world,
        &[(Action::Up, 10), (Action::Left, 20), (Action::Down, 30)],
    )];
    let mut replayer = TimelineReplayer::new();
    replayer.reset(1_000, 1);

    let mut last = 0;
    for now in [1_000, 1_015, 1_015, 1_005, 1_025, 1_100, 1_050] {
        replayer.tick(now, &mut ghosts);
        let cursor = replayer.cursor(0).unwrap();
        assert!(cursor >= last);
        last = cursor;
    }
    assert_eq!(last, 3);
}

#[test]
fn destroyed_ghost_is_skipped() {
    let world = World::new(ARENA);
    let mut ghosts = vec![
        ghost_for(&world, &[(Action::Up, 10), (Action::Down, 20)]),
        ghost_for(&world, &[(Action::Left, 10)]),
    ];
    ghosts[0].entity().destroy();

    let mut replayer = TimelineReplayer::new();
    replayer.reset(0, 2);

    assert_eq!(replayer.tick(100, &mut ghosts), 1);
    assert_eq!(replayer.cursor(0), Some(2));
    assert_eq!(ghosts[0].entity().velocity(), Vec2::ZERO);
    assert_eq!(ghosts[1].entity().velocity(), Vec2::new(-50.0, 0.0));
}

#[test]
fn replay_reset_starts_over() {
    let world = World::new(ARENA);
    let mut ghosts = vec![ghost_for(&world, &[(Action::Up, 10)])];
    let mut replayer = TimelineReplayer::new();

    replayer.reset(0, 1);
    assert_eq!(replayer.tick(100, &mut ghosts), 1);

    replayer.reset(500, 1);
    assert_eq!(replayer.cursor(0), Some(0));
    assert_eq!(replayer.tick(505, &mut ghosts), 0);
    assert_eq!(replayer.tick(511, &mut ghosts), 1);
}

#[test]
fn archived_log_dump_and_json() {
    let mut log = ActionLog::new(4);
    log.record(Action::Right, 100);
    log.record(Action::Down, 300);
    log.record(Action::Destroy, 900);
    let archived = log.archive();

    assert_eq!(archived.dump(), "100:right;300:down;900:destroy;");
    let json = archived.to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["session"], 4);
    assert_eq!(value["actions"][2]["action"], "destroy");
    assert_eq!(value["actions"][2]["timestamp"], 900);
}
