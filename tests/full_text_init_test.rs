//! Integration tests for the full-text index lifecycle.

use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

use shrike::cache::{Cache, FtConfig};
use shrike::document::Record;
use shrike::error::ShrikeError;

fn named(name: &str) -> Record {
    Record::builder().add_text("name", name).build()
}

#[test]
fn test_ft_init_indexes_existing_records() {
    let cache = Cache::new();
    cache.set("u1", named("Tristan")).unwrap();
    cache.set("u2", named("Tris")).unwrap();

    cache.ft_init(FtConfig::new(["name"])).unwrap();
    assert!(cache.ft_is_initialized());

    let hits = cache.search("tris", 10, false).unwrap();
    let keys: Vec<&str> = hits.iter().map(|hit| hit.key.as_str()).collect();
    assert_eq!(keys, vec!["u1", "u2"]);

    let info = cache.info();
    assert!(info.ft_initialized);
    assert_eq!(info.words, 2);
}

#[test]
fn test_second_init_fails() {
    let cache = Cache::new();
    cache.ft_init(FtConfig::new(["name"])).unwrap();

    let err = cache.ft_init(FtConfig::new(["name"])).unwrap_err();
    assert!(matches!(err, ShrikeError::AlreadyInitialized));

    let err = cache
        .ft_init_with_map(vec![("u1".to_string(), named("x"))], FtConfig::new(["name"]))
        .unwrap_err();
    assert!(matches!(err, ShrikeError::AlreadyInitialized));
}

#[test]
fn test_init_with_map_loads_batch_in_order() {
    let cache = Cache::new();
    cache.set("u1", named("Tris One")).unwrap();

    let batch = vec![
        ("u2".to_string(), named("Tris Two")),
        ("u3".to_string(), named("Tris Three")),
    ];
    cache.ft_init_with_map(batch, FtConfig::new(["name"])).unwrap();

    assert_eq!(cache.len(), 3);
    assert_eq!(cache.keys(), vec!["u1", "u2", "u3"]);

    // Existing records are indexed before the batch.
    let hits = cache.search("tris", 10, false).unwrap();
    let keys: Vec<&str> = hits.iter().map(|hit| hit.key.as_str()).collect();
    assert_eq!(keys, vec!["u1", "u2", "u3"]);
}

#[test]
fn test_init_with_map_key_collision_changes_nothing() {
    let cache = Cache::new();
    cache.set("u1", named("Tristan")).unwrap();

    let batch = vec![
        ("u2".to_string(), named("Tris")),
        ("u1".to_string(), named("Impostor")),
    ];
    let err = cache
        .ft_init_with_map(batch, FtConfig::new(["name"]))
        .unwrap_err();
    assert!(matches!(err, ShrikeError::KeyCollision(_)));

    assert!(!cache.ft_is_initialized());
    assert_eq!(cache.len(), 1);
    assert_eq!(
        cache.get("u1").unwrap().get_field("name").unwrap().as_text(),
        Some("Tristan")
    );
}

#[test]
fn test_init_with_map_duplicate_batch_key_is_rejected() {
    let cache = Cache::new();
    let batch = vec![
        ("u1".to_string(), named("First")),
        ("u1".to_string(), named("Second")),
    ];

    let err = cache
        .ft_init_with_map(batch, FtConfig::new(["name"]))
        .unwrap_err();
    assert!(matches!(err, ShrikeError::KeyCollision(_)));
    assert!(cache.is_empty());
}

#[test]
fn test_failed_init_reverts_to_uninitialised() {
    let cache = Cache::new();
    cache.set("u1", named("one two three")).unwrap();

    let err = cache
        .ft_init(FtConfig::new(["name"]).with_max_words(2))
        .unwrap_err();
    assert!(matches!(err, ShrikeError::CapExceeded(_)));

    assert!(!cache.ft_is_initialized());
    assert_eq!(cache.len(), 1);

    // A config the data fits under still works afterwards.
    cache.ft_init(FtConfig::new(["name"]).with_max_words(3)).unwrap();
    assert!(cache.ft_is_initialized());
}

#[test]
fn test_init_with_snapshot() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(
        br#"{
            "u1": {"name": "Tristan", "age": 17},
            "u2": {"name": "Tris", "age": 20}
        }"#,
    )?;

    let cache = Cache::new();
    cache.ft_init_with_snapshot(file.path(), FtConfig::new(["name"]))?;

    assert_eq!(cache.len(), 2);
    let hits = cache.search("tris", 10, false)?;
    let keys: Vec<&str> = hits.iter().map(|hit| hit.key.as_str()).collect();
    assert_eq!(keys, vec!["u1", "u2"]);
    Ok(())
}

#[test]
fn test_init_with_malformed_snapshot_changes_nothing() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(br#"{"u1": ["not", "an", "object"]}"#)?;

    let cache = Cache::new();
    let err = cache
        .ft_init_with_snapshot(file.path(), FtConfig::new(["name"]))
        .unwrap_err();
    assert!(matches!(err, ShrikeError::InvalidInput(_)));
    assert!(!cache.ft_is_initialized());
    assert!(cache.is_empty());
    Ok(())
}

#[test]
fn test_init_with_missing_snapshot_is_io_error() {
    let cache = Cache::new();
    let err = cache
        .ft_init_with_snapshot("/nonexistent/snapshot.json", FtConfig::new(["name"]))
        .unwrap_err();
    assert!(matches!(err, ShrikeError::Io(_)));
}

#[test]
fn test_min_word_length_applies_at_init() {
    let cache = Cache::new();
    cache.set("u1", named("to be or not to be")).unwrap();

    cache
        .ft_init(FtConfig::new(["name"]).with_min_word_length(3))
        .unwrap();

    assert!(cache.search("be", 10, true).unwrap().is_empty());
    assert_eq!(cache.search("not", 10, true).unwrap().len(), 1);
}

#[test]
fn test_zero_min_word_length_is_rejected() {
    let cache = Cache::new();
    let err = cache
        .ft_init(FtConfig::new(["name"]).with_min_word_length(0))
        .unwrap_err();
    assert!(matches!(err, ShrikeError::InvalidInput(_)));
    assert!(!cache.ft_is_initialized());
}

#[test]
fn test_ft_reset_returns_to_uninitialised() {
    let cache = Cache::new();
    cache.set("u1", named("Tristan")).unwrap();
    cache.ft_init(FtConfig::new(["name"])).unwrap();

    cache.ft_reset().unwrap();
    assert!(!cache.ft_is_initialized());

    // The store survives; searches are rejected until the next init.
    assert_eq!(cache.len(), 1);
    let err = cache.search("tristan", 10, true).unwrap_err();
    assert!(matches!(err, ShrikeError::NotInitialized));

    // Resetting twice fails, re-initialising works.
    let err = cache.ft_reset().unwrap_err();
    assert!(matches!(err, ShrikeError::NotInitialized));
    cache.ft_init(FtConfig::new(["name"])).unwrap();
    assert_eq!(cache.search("tristan", 10, true).unwrap().len(), 1);
}

#[test]
fn test_unindexed_fields_are_stored_but_not_searchable() {
    let cache = Cache::new();
    cache.ft_init(FtConfig::new(["name"])).unwrap();

    let record = Record::builder()
        .add_text("name", "Tristan")
        .add_text("bio", "loves kayaking")
        .build();
    cache.set("u1", record).unwrap();

    assert!(cache.search("kayaking", 10, false).unwrap().is_empty());
    assert_eq!(
        cache.get("u1").unwrap().get_field("bio").unwrap().as_text(),
        Some("loves kayaking")
    );
}
