//! Loading layered policy files and evaluating the resulting policies.

use plotward_policy::{PoliciesConfig, PolicyDefError, ProtectionSet, ProtectionType};
use plotward_types::{Actor, BlockPos, ErrorCode};

const BASE: &str = r#"
[[policies]]
id = "spawn"
protections = ["direct_players", "indirect_players"]
region = { world = "world", min = [-32, 0, -32], max = [32, 255, 32] }

[policies.messages]
direct_players = "Spawn is protected."
container_access = "Spawn chests are read-only."

[[policies.bypass]]
actors = ["admin"]

[[policies]]
id = "nether-lava"
protections = ["flow"]
region = { world = "world_nether", min = [-1000, 0, -1000], max = [1000, 128, 1000] }
"#;

const OVERLAY: &str = r#"
[[policies]]
id = "nether-lava"
protections = ["flow", "fade"]
enabled = false
region = { world = "world_nether", min = [-1000, 0, -1000], max = [1000, 128, 1000] }

[[policies]]
id = "farm"
protections = ["all"]
exclude = ["growth", "mob_spawn"]
region = { world = "world", min = [100, 60, 100], max = [140, 90, 140] }

[[policies.bypass]]
actors = ["Farmer"]
protections = ["break_block", "place_block"]
"#;

fn layered() -> PoliciesConfig {
    let mut cfg = PoliciesConfig::from_toml_str(BASE).expect("base parses");
    cfg.merge(&PoliciesConfig::from_toml_str(OVERLAY).expect("overlay parses"));
    cfg
}

#[test]
fn layered_config_is_valid() {
    let cfg = layered();
    assert!(cfg.validate_all().is_empty());
    let ids: Vec<_> = cfg.policies.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["spawn", "nether-lava", "farm"]);
}

#[test]
fn overlay_replaces_definition() {
    let built = layered().build_all();
    let (_, lava) = built
        .iter()
        .find(|(id, _)| id == "nether-lava")
        .expect("nether-lava built");
    assert!(!lava.is_enabled());
    assert_eq!(lava.protections(), ProtectionSet::FLOW | ProtectionSet::FADE);
}

#[test]
fn spawn_policy_behaviour() {
    let built = layered().build_all();
    let (_, spawn) = &built[0];
    let block = BlockPos::new("world", 10, 70, -10);
    let guest = Actor::offline("guest");

    assert_eq!(
        spawn
            .evaluate(ProtectionType::PlaceBlock, &block, Some(&guest))
            .message(),
        Some("Spawn is protected.")
    );
    assert_eq!(
        spawn
            .evaluate(ProtectionType::ContainerAccess, &block, Some(&guest))
            .message(),
        Some("Spawn chests are read-only.")
    );
    // indirect protections deny silently
    let piston = spawn.evaluate(ProtectionType::Pistons, &block, None);
    assert!(piston.is_denied());
    assert_eq!(piston.message(), None);
    // natural protections are not configured
    assert!(spawn
        .evaluate(ProtectionType::Flow, &block, None)
        .is_allowed());
    // admin bypasses everything
    assert!(spawn
        .evaluate(
            ProtectionType::BreakBlock,
            &block,
            Some(&Actor::offline("ADMIN"))
        )
        .is_allowed());
    // other worlds are untouched
    assert!(spawn
        .evaluate(
            ProtectionType::BreakBlock,
            &BlockPos::new("world_nether", 10, 70, -10),
            Some(&guest)
        )
        .is_allowed());
}

#[test]
fn farm_policy_behaviour() {
    let built = layered().build_all();
    let (_, farm) = &built[2];
    let field = BlockPos::new("world", 120, 64, 120);
    let farmer = Actor::offline("farmer");

    assert!(farm
        .evaluate(ProtectionType::Growth, &field, None)
        .is_allowed());
    assert!(farm
        .evaluate(ProtectionType::BreakBlock, &field, Some(&farmer))
        .is_allowed());
    assert!(farm
        .evaluate(ProtectionType::Interact, &field, Some(&farmer))
        .is_denied());
    assert!(farm
        .evaluate(ProtectionType::AnvilBreak, &field, None)
        .is_denied());
}

#[test]
fn invalid_definitions_are_reported_and_skipped() {
    let cfg = PoliciesConfig::from_toml_str(
        r#"
[[policies]]
id = "ok"
region = { world = "world", min = [0, 0, 0], max = [1, 1, 1] }

[[policies]]
id = "typo"
protections = ["brake_block"]
region = { world = "world", min = [0, 0, 0], max = [1, 1, 1] }

[[policies]]
id = "floating"
"#,
    )
    .expect("parses");

    let errors = cfg.validate_all();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), "CONFIG_INVALID_PROTECTION");
    assert!(errors[0].to_string().contains("brake_block"));

    // "floating" validates but cannot be built over a region
    let built = cfg.build_all();
    assert_eq!(built.len(), 1);
    assert_eq!(built[0].0, "ok");
    assert!(matches!(
        cfg.policies[2].build_with_region(),
        Err(PolicyDefError::MissingRegion { .. })
    ));
}

#[test]
fn schema_mismatch_is_a_parse_error() {
    let err = PoliciesConfig::from_toml_str("[[policies]]\nid = \"x\"\nenabled = \"yes\"")
        .expect_err("enabled must be a bool");
    assert_eq!(err.code(), "CONFIG_PARSE");
}
