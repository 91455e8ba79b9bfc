//! End-to-end scenarios: policies built in code or from config, events
//! dispatched through the registry, side effects observed on the event.

use plotward_event::testing::{MockWorld, RecordingMessenger};
use plotward_event::{Outcome, PolicyRegistry, SpawnReason, WorldEvent};
use plotward_policy::{bypass, PoliciesConfig, ProtectionPolicy, ProtectionSet, ProtectionType};
use plotward_types::{Actor, BlockPos, Location};

fn at(x: i32, z: i32) -> BlockPos {
    BlockPos::new("world", x, 64, z)
}

/// Protects exactly the listed blocks.
fn only(blocks: Vec<BlockPos>, set: ProtectionSet) -> ProtectionPolicy {
    ProtectionPolicy::new(move |b: &BlockPos| blocks.contains(b), set)
}

#[test]
fn break_denied_then_admin_bypass() {
    let location = at(0, 0);
    let mut registry = PolicyRegistry::new();
    let id = registry.register(ProtectionPolicy::new(
        |_: &BlockPos| true,
        ProtectionSet::BREAK_BLOCK,
    ));
    let world = MockWorld::new();
    let messenger = RecordingMessenger::new();

    let mut event = WorldEvent::block_break(location.clone(), Actor::offline("admin"));
    assert_eq!(
        registry.dispatch(&world, &messenger, &mut event),
        vec![(id, Outcome::Cancelled)]
    );
    assert!(event.is_cancelled());
    assert!(messenger.is_empty());

    registry
        .get_mut(id)
        .expect("registered")
        .add_bypass(bypass::by_actor(|actor, _| actor.name == "admin"));

    let mut event = WorldEvent::block_break(location.clone(), Actor::offline("admin"));
    assert_eq!(
        registry.dispatch(&world, &messenger, &mut event),
        vec![(id, Outcome::Allowed)]
    );
    assert!(!event.is_cancelled());

    let mut event = WorldEvent::block_break(location, Actor::offline("guest"));
    registry.dispatch(&world, &messenger, &mut event);
    assert!(event.is_cancelled());
}

#[test]
fn explosion_keeps_only_unprotected_blocks() {
    let (b1, b2, b3) = (at(1, 0), at(2, 0), at(3, 0));
    let mut registry = PolicyRegistry::new();
    registry.register(only(
        vec![b1.clone(), b3.clone()],
        ProtectionSet::ENTITY_EXPLOSION,
    ));
    let world = MockWorld::new();
    let messenger = RecordingMessenger::new();

    let mut event = WorldEvent::entity_explosion(
        Location::new("world", 2.5, 64.0, 0.5),
        vec![b1.clone(), b2.clone(), b3.clone()],
    );
    let outcomes = registry.dispatch(&world, &messenger, &mut event);
    assert_eq!(
        outcomes[0].1,
        Outcome::Filtered {
            removed: vec![b1, b3]
        }
    );
    match &event {
        WorldEvent::EntityExplosion(e) => {
            assert_eq!(e.blocks, vec![b2]);
            assert!(!e.cancelled);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(messenger.is_empty());
}

#[test]
fn piston_cancelled_when_any_moved_block_protected() {
    let (p, q, r) = (at(0, 0), at(1, 0), at(2, 0));
    let mut registry = PolicyRegistry::new();
    registry.register(only(vec![r.clone()], ProtectionSet::PISTONS));
    let world = MockWorld::new();
    let messenger = RecordingMessenger::new();

    let mut event = WorldEvent::piston_extend(p, vec![q, r]);
    let outcomes = registry.dispatch(&world, &messenger, &mut event);
    assert_eq!(outcomes[0].1, Outcome::Cancelled);
    assert!(event.is_cancelled());
}

#[test]
fn custom_spawn_always_allowed() {
    let mut registry = PolicyRegistry::new();
    registry.register(ProtectionPolicy::new(|_: &BlockPos| true, ProtectionSet::ALL));
    registry.register(ProtectionPolicy::new(
        |_: &BlockPos| true,
        ProtectionSet::MOB_SPAWN,
    ));
    let world = MockWorld::new();
    let messenger = RecordingMessenger::new();

    let spot = Location::new("world", 0.5, 64.0, 0.5);
    let mut custom = WorldEvent::creature_spawn(spot.clone(), SpawnReason::Custom);
    for (_, outcome) in registry.dispatch(&world, &messenger, &mut custom) {
        assert_eq!(outcome, Outcome::Ignored);
    }
    assert!(!custom.is_cancelled());

    let mut natural = WorldEvent::creature_spawn(spot, SpawnReason::Natural);
    registry.dispatch(&world, &messenger, &mut natural);
    assert!(natural.is_cancelled());
}

#[test]
fn message_delivered_once_then_silenced() {
    let mut registry = PolicyRegistry::new();
    let id = registry.register(
        ProtectionPolicy::new(|_: &BlockPos| true, ProtectionSet::PLACE_BLOCK)
            .with_deny_message(ProtectionType::PlaceBlock, "You cannot build here."),
    );
    let world = MockWorld::new();
    let messenger = RecordingMessenger::new();

    let mut event = WorldEvent::block_place(at(0, 0), Actor::offline("guest"));
    registry.dispatch(&world, &messenger, &mut event);
    assert_eq!(
        messenger.messages_for("guest"),
        vec!["You cannot build here."]
    );

    registry
        .get_mut(id)
        .expect("registered")
        .clear_deny_messages();
    let mut event = WorldEvent::block_place(at(0, 0), Actor::offline("guest"));
    registry.dispatch(&world, &messenger, &mut event);
    assert!(event.is_cancelled());
    assert_eq!(messenger.len(), 1);
}

#[test]
fn disable_and_reenable_through_registry() {
    let mut registry = PolicyRegistry::new();
    let id = registry.register(ProtectionPolicy::new(
        |_: &BlockPos| true,
        ProtectionSet::FLOW,
    ));
    let world = MockWorld::new();
    let messenger = RecordingMessenger::new();

    registry.set_enabled(id, false);
    let mut event = WorldEvent::liquid_flow(at(0, 0), at(1, 0));
    registry.dispatch(&world, &messenger, &mut event);
    assert!(!event.is_cancelled());

    // enabling twice still yields exactly one outcome per event
    registry.set_enabled(id, true);
    registry.set_enabled(id, true);
    let mut event = WorldEvent::liquid_flow(at(0, 0), at(1, 0));
    let outcomes = registry.dispatch(&world, &messenger, &mut event);
    assert_eq!(outcomes, vec![(id, Outcome::Cancelled)]);
}

#[test]
fn config_driven_spawn_protection() {
    let config = PoliciesConfig::from_toml_str(
        r#"
[[policies]]
id = "spawn"
exclude = ["mob_spawn"]
region = { world = "world", min = [-16, 0, -16], max = [16, 255, 16] }

[policies.messages]
direct_players = "Spawn is protected."

[[policies.bypass]]
actors = ["admin"]
protections = ["direct_players"]
"#,
    )
    .expect("valid config");

    let mut registry = PolicyRegistry::new();
    for (_, policy) in config.build_all() {
        registry.register(policy);
    }
    assert_eq!(registry.len(), 1);

    let chest = at(2, 2);
    let world = MockWorld::new().with_inventory(chest.clone());
    let messenger = RecordingMessenger::new();

    let mut open = WorldEvent::right_click(Actor::offline("guest"), chest.clone());
    registry.dispatch(&world, &messenger, &mut open);
    assert!(open.is_cancelled());
    assert_eq!(messenger.messages_for("guest"), vec!["Spawn is protected."]);

    let mut admin_open = WorldEvent::right_click(Actor::offline("Admin"), chest);
    registry.dispatch(&world, &messenger, &mut admin_open);
    assert!(!admin_open.is_cancelled());

    // mob spawning was excluded
    let mut spawn = WorldEvent::creature_spawn(
        Location::new("world", 0.0, 64.0, 0.0),
        SpawnReason::Natural,
    );
    registry.dispatch(&world, &messenger, &mut spawn);
    assert!(!spawn.is_cancelled());

    // indirect protections are still active and not bypassed by admin
    let mut tnt = WorldEvent::entity_explosion(
        Location::new("world", 0.0, 64.0, 0.0),
        vec![at(0, 0), at(40, 40)],
    );
    registry.dispatch(&world, &messenger, &mut tnt);
    match tnt {
        WorldEvent::EntityExplosion(e) => assert_eq!(e.blocks, vec![at(40, 40)]),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn later_policy_still_sees_cancelled_event() {
    let mut registry = PolicyRegistry::new();
    registry.register(ProtectionPolicy::new(
        |_: &BlockPos| true,
        ProtectionSet::BREAK_BLOCK,
    ));
    registry.register(
        ProtectionPolicy::new(|_: &BlockPos| true, ProtectionSet::BREAK_BLOCK)
            .with_deny_message(ProtectionType::BreakBlock, "second policy"),
    );
    let world = MockWorld::new();
    let messenger = RecordingMessenger::new();

    let mut event = WorldEvent::block_break(at(0, 0), Actor::offline("guest"));
    let outcomes = registry.dispatch(&world, &messenger, &mut event);
    assert!(outcomes.iter().all(|(_, o)| *o == Outcome::Cancelled));
    assert_eq!(messenger.messages_for("guest"), vec!["second policy"]);
}
