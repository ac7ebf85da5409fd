use quillnote_core::{
    allocate_next, JsonSettingsRepository, Preferences, SettingsRepository, StoreError,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn settings_store() -> (TempDir, JsonSettingsRepository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonSettingsRepository::new(dir.path().join("settings.json"));
    (dir, repo)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn fresh_install_loads_zero_and_empty_preferences() {
    let (_dir, repo) = settings_store();
    let settings = repo.load();
    assert_eq!(settings.current_order, 0);
    assert!(settings.preferences.is_empty());
}

#[test]
fn order_is_monotonic_across_restart() {
    let (dir, repo) = settings_store();

    let settings = repo.load();
    let first = allocate_next(settings.current_order).unwrap();
    repo.save(first, &settings.preferences).unwrap();
    let second = allocate_next(first).unwrap();
    repo.save(second, &settings.preferences).unwrap();
    drop(repo);

    let restarted = JsonSettingsRepository::new(dir.path().join("settings.json"));
    let reloaded = restarted.load();
    assert_eq!(reloaded.current_order, second);

    let next = allocate_next(reloaded.current_order).unwrap();
    assert_eq!(next, second + 1);
    assert!(next > first && next > second);
}

#[test]
fn allocation_without_save_is_not_durable() {
    let (_dir, repo) = settings_store();
    let allocated = allocate_next(repo.load().current_order).unwrap();
    assert_eq!(allocated, 1);
    assert_eq!(repo.load().current_order, 0);
}

#[test]
fn save_treats_missing_document_as_empty_base() {
    let (_dir, repo) = settings_store();
    repo.save(5, &Preferences::new()).unwrap();
    assert_eq!(read_json(repo.path()), json!({"current_order": 5}));
}

#[test]
fn save_preserves_keys_written_by_views() {
    let (_dir, repo) = settings_store();
    fs::write(
        repo.path(),
        r#"{"geometry": "900x400+10+10", "column_widths": {"content": 240}, "extra": [1, 2]}"#,
    )
    .unwrap();

    let loaded = repo.load();
    assert_eq!(loaded.current_order, 0);
    assert_eq!(loaded.preferences.geometry(), Some("900x400+10+10"));
    assert_eq!(loaded.preferences.column_widths()["content"], 240);

    repo.save(1, &Preferences::new()).unwrap();

    let stored = read_json(repo.path());
    assert_eq!(stored["current_order"], 1);
    assert_eq!(stored["geometry"], "900x400+10+10");
    assert_eq!(stored["column_widths"], json!({"content": 240}));
    assert_eq!(stored["extra"], json!([1, 2]));
}

#[test]
fn save_overlays_given_preferences() {
    let (_dir, repo) = settings_store();
    fs::write(repo.path(), r#"{"current_order": 2, "geometry": "800x600"}"#).unwrap();

    let mut prefs = repo.load().preferences;
    prefs.set_geometry("1200x700+5+5");
    prefs.set_column_width("label", 90);
    repo.save(3, &prefs).unwrap();

    let reloaded = repo.load();
    assert_eq!(reloaded.current_order, 3);
    assert_eq!(reloaded.preferences.geometry(), Some("1200x700+5+5"));
    assert_eq!(reloaded.preferences.column_widths()["label"], 90);
}

#[test]
fn corrupt_document_loads_defaults_but_refuses_save() {
    let (_dir, repo) = settings_store();
    fs::write(repo.path(), "{\"current_order\": ").unwrap();

    assert_eq!(repo.load().current_order, 0);

    let err = repo.save(1, &Preferences::new()).unwrap_err();
    assert!(matches!(err, StoreError::UnmergeableSettings { .. }));
    assert_eq!(
        fs::read_to_string(repo.path()).unwrap(),
        "{\"current_order\": "
    );
}

#[test]
fn preference_save_ignores_counter_in_blob() {
    let (_dir, repo) = settings_store();
    repo.save(8, &Preferences::new()).unwrap();

    let mut entries = serde_json::Map::new();
    entries.insert("current_order".to_string(), json!(1));
    entries.insert("geometry".to_string(), json!("640x480"));
    repo.save_preferences(&Preferences::from_map(entries)).unwrap();

    let reloaded = repo.load();
    assert_eq!(reloaded.current_order, 8);
    assert_eq!(reloaded.preferences.geometry(), Some("640x480"));
}
