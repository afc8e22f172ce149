//! Persistence integration tests
//!
//! Saves progress to disk through `FileStore`, reloads it, and checks that
//! damaged save files heal themselves without losing the readable parts.

use realms::core::config::{ProgressionConfig, RealmsConfig};
use realms::progression::{Difficulty, GameType, ProgressionEngine, RewardType};
use realms::utils::persistence::{FileStore, MemoryStore, ProgressStore};
use std::fs;
use std::path::{Path, PathBuf};

fn temp_save_dir(name: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "realms-persistence-{}-{}-{}",
        name,
        std::process::id(),
        test_id
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn file_engine(dir: &Path) -> ProgressionEngine<FileStore> {
    let store = FileStore::in_dir(dir).unwrap();
    ProgressionEngine::load(store, ProgressionConfig::default())
}

// ============================================================================
// File round trip
// ============================================================================

#[test]
fn test_fresh_install_writes_save_file() {
    let dir = temp_save_dir("fresh");
    let engine = file_engine(&dir);

    let path = engine.store().path().to_path_buf();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["gameLevels"].as_array().unwrap().len(), 45);
    assert_eq!(json["highestDifficulty"], "Easy");
    assert!(json["savedAt"].is_string());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_progress_reloads_from_disk() {
    let dir = temp_save_dir("reload");
    {
        let mut engine = file_engine(&dir);
        engine.complete_level("shapeEchoFusion_Easy_1", RewardType::RealmEchoes);
        engine.complete_level("shapeEchoFusion_Easy_2", RewardType::RealmEchoes);
        engine.complete_onboarding();
    }

    let engine = file_engine(&dir);
    assert_eq!(engine.rewards().realm_echoes, 2);
    assert_eq!(engine.total_games_played(), 2);
    assert!(engine.has_completed_onboarding());
    assert!(engine.is_playable("shapeEchoFusion_Easy_3"));
    assert_eq!(engine.completed_in_game(GameType::ShapeEchoFusion), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_store_from_config_uses_save_dir() {
    let dir = temp_save_dir("config");
    let config = RealmsConfig::from_toml_str(&format!(
        "save_dir = {:?}\n\n[progression]\nrepeat_completion = \"no_reward\"\n",
        dir.display().to_string()
    ))
    .unwrap();

    let store = FileStore::from_config(&config).unwrap();
    assert_eq!(store.path(), dir.join("progress.json"));

    let mut engine = ProgressionEngine::load(store, config.progression);
    engine.complete_level("pulseGridPath_Easy_1", RewardType::ShardsOfInsight);
    engine.complete_level("pulseGridPath_Easy_1", RewardType::ShardsOfInsight);
    assert_eq!(engine.rewards().shards_of_insight, 1);

    let _ = fs::remove_dir_all(&dir);
}

// ============================================================================
// Self-healing
// ============================================================================

#[test]
fn test_corrupt_levels_rebuilt_and_rewritten() {
    let mut healthy = ProgressionEngine::load(MemoryStore::new(), ProgressionConfig::default());
    healthy.complete_level("tempoShiftRunner_Easy_1", RewardType::FlowRibbons);
    let mut json: serde_json::Value =
        serde_json::from_str(healthy.store().contents().unwrap()).unwrap();
    json["gameLevels"] = serde_json::json!([{ "id": "garbage" }]);

    let engine = ProgressionEngine::load(
        MemoryStore::with_contents(json.to_string()),
        ProgressionConfig::default(),
    );

    // Catalog rebuilt, the rest kept, and the repaired document written back.
    assert_eq!(engine.total_completed_levels(), 0);
    assert_eq!(engine.catalog().unlocked_count(), 3);
    assert_eq!(engine.rewards().flow_ribbons, 1);
    assert_eq!(engine.total_games_played(), 1);
    assert_eq!(engine.store().writes(), 1);

    let rewritten: serde_json::Value =
        serde_json::from_str(engine.store().contents().unwrap()).unwrap();
    assert_eq!(rewritten["gameLevels"].as_array().unwrap().len(), 45);
}

#[test]
fn test_unreadable_file_starts_fresh() {
    let dir = temp_save_dir("garbage");
    let mut store = FileStore::in_dir(&dir).unwrap();
    store.write("this is not json").unwrap();

    let engine = ProgressionEngine::load(store, ProgressionConfig::default());
    assert_eq!(engine.levels().len(), 45);
    assert_eq!(engine.total_unlocked_rewards(), 0);

    let on_disk = fs::read_to_string(engine.store().path()).unwrap();
    assert!(on_disk.contains("gameLevels"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_newer_save_version_starts_fresh() {
    let json = r#"{"version": 99, "gameLevels": [], "rewards": {"shardsOfInsight": 50}}"#;
    let engine = ProgressionEngine::load(
        MemoryStore::with_contents(json),
        ProgressionConfig::default(),
    );

    assert_eq!(engine.total_unlocked_rewards(), 0);
    assert_eq!(engine.highest_difficulty(), Difficulty::Easy);
    assert_eq!(engine.levels().len(), 45);
}

// ============================================================================
// Write failures
// ============================================================================

#[test]
fn test_write_failure_keeps_playing() {
    let mut store = MemoryStore::new();
    store.set_reject_writes(true);
    let mut engine = ProgressionEngine::load(store, ProgressionConfig::default());

    let report = engine
        .complete_level("pulseGridPath_Easy_1", RewardType::ShardsOfInsight)
        .unwrap();

    assert!(!report.persisted);
    assert_eq!(engine.rewards().shards_of_insight, 1);
    assert!(engine.is_playable("pulseGridPath_Easy_2"));
    assert!(engine.store().contents().is_none());
}
