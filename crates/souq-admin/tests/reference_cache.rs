use std::fs;

use souq_admin::models::{Category, City};
use souq_admin::{FileStore, KeyValueStore, ReferenceCache};

fn cities() -> Vec<City> {
    vec![
        City {
            id: 1,
            name: "Riyadh".to_string(),
            region: Some("Central".to_string()),
        },
        City {
            id: 2,
            name: "Abha".to_string(),
            region: Some("Asir".to_string()),
        },
    ]
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("reference");

    {
        let cache = ReferenceCache::new(FileStore::open(&cache_dir).unwrap());
        cache.put("cities", &cities()).unwrap();
    }

    let cache = ReferenceCache::new(FileStore::open(&cache_dir).unwrap());
    let cached: Vec<City> = cache.get("cities").unwrap();
    assert_eq!(cached, cities());
    assert!(cache_dir.join("cities.json").exists());
}

#[test]
fn test_get_or_fetch_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ReferenceCache::new(FileStore::open(dir.path()).unwrap());

    let fetched: Vec<Category> = cache
        .get_or_fetch("categories", || {
            let body = r#"[{"id": 1, "name": "Cars", "slug": "cars", "features": ["Mileage"]}]"#;
            Ok(serde_json::from_str(body)?)
        })
        .unwrap();
    assert_eq!(fetched[0].features, vec!["Mileage"]);

    let again: Vec<Category> = cache
        .get_or_fetch("categories", || panic!("categories should be cached"))
        .unwrap();
    assert_eq!(again, fetched);
}

#[test]
fn test_invalidate_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set("cities", "{}".to_string());
    assert!(dir.path().join("cities.json").exists());

    let cache = ReferenceCache::new(store);
    cache.invalidate("cities");
    assert!(!dir.path().join("cities.json").exists());
    assert!(cache.get::<Vec<City>>("cities").is_none());
}

#[test]
fn test_keys_cannot_leave_the_store_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("reference");
    let store = FileStore::open(&cache_dir).unwrap();

    store.set("../escaped", "{}".to_string());
    store.set("nested/cities", "{}".to_string());
    store.set(".hidden", "{}".to_string());
    assert!(!dir.path().join("escaped.json").exists());
    assert_eq!(fs::read_dir(&cache_dir).unwrap().count(), 0);

    // A file next to the store directory is not reachable through a key.
    fs::write(dir.path().join("planted.json"), "{}").unwrap();
    assert_eq!(store.get("../planted"), None);
    store.remove("../planted");
    assert!(dir.path().join("planted.json").exists());

    store.set("category-features_v2", "{}".to_string());
    assert_eq!(store.get("category-features_v2").as_deref(), Some("{}"));
}
