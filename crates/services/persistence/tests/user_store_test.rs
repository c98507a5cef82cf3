//! User store integration tests against the in-memory collection backend.

use std::sync::Arc;
use std::time::Duration;

use domain::{User, USERS_COLLECTION};
use persistence::infra::{ensure_natural_key_indexes, USER_NATURAL_KEY};
use persistence::{Deadline, MemoryCollection, StoreError, UserRepository, UserStore};

fn sample_user(username: &str) -> User {
    User::new(username, "hashedpassword", format!("{}@example.com", username))
}

fn setup() -> (Arc<MemoryCollection>, UserStore) {
    let collection = Arc::new(MemoryCollection::new(USERS_COLLECTION).with_unique_index(USER_NATURAL_KEY));
    let store = UserStore::new(collection.clone(), Duration::from_secs(5));
    (collection, store)
}

#[tokio::test]
async fn test_insert_then_find_by_username() {
    let (_, store) = setup();
    let mut user = sample_user("testuser").with_role("admin");

    let id = store.insert(&mut user, Deadline::none()).await.unwrap();
    let found = store.find_by_username("testuser", Deadline::none()).await.unwrap();

    assert_eq!(found.id.as_deref(), Some(id.as_str()));
    assert_eq!(found, user);
    assert_eq!(found.password_hash, "hashedpassword");
    assert_eq!(found.role, "admin");
}

#[tokio::test]
async fn test_unknown_username_is_not_found() {
    let (_, store) = setup();

    let result = store
        .find_by_username("nonexistentuser", Deadline::none())
        .await;

    assert_eq!(result, Err(StoreError::NotFound));
}

#[tokio::test]
async fn test_username_match_is_exact() {
    let (_, store) = setup();
    let mut user = sample_user("testuser");
    store.insert(&mut user, Deadline::none()).await.unwrap();

    let result = store.find_by_username("TestUser", Deadline::none()).await;

    assert_eq!(result, Err(StoreError::NotFound));
}

#[tokio::test]
async fn test_duplicate_username_is_rejected_and_original_kept() {
    let (collection, store) = setup();
    let mut first = sample_user("testuser");
    store.insert(&mut first, Deadline::none()).await.unwrap();

    let mut second = User::new("testuser", "otherhash", "other@example.com");
    let result = store.insert(&mut second, Deadline::none()).await;

    assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
    assert_eq!(collection.len(), 1);

    let kept = store.find_by_username("testuser", Deadline::none()).await.unwrap();
    assert_eq!(kept.email, "testuser@example.com");
    assert_eq!(kept.password_hash, "hashedpassword");
}

#[tokio::test]
async fn test_index_created_at_startup_enforces_uniqueness() {
    let jobs = MemoryCollection::new("jobs");
    let users = Arc::new(MemoryCollection::new(USERS_COLLECTION));
    ensure_natural_key_indexes(&jobs, users.as_ref()).await.unwrap();

    let store = UserStore::new(users.clone(), Duration::from_secs(5));
    store
        .insert(&mut sample_user("dup"), Deadline::none())
        .await
        .unwrap();
    let result = store.insert(&mut sample_user("dup"), Deadline::none()).await;

    assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
}

#[tokio::test]
async fn test_concurrent_inserts_with_distinct_usernames() {
    let (collection, store) = setup();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let mut user = sample_user(&format!("user{}", i));
                store.insert(&mut user, Deadline::none()).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
    assert_eq!(collection.len(), 32);

    for i in 0..32 {
        let found = store
            .find_by_username(&format!("user{}", i), Deadline::none())
            .await
            .unwrap();
        assert_eq!(found.email, format!("user{}@example.com", i));
    }
}

#[tokio::test]
async fn test_password_hash_stays_out_of_json() {
    let (_, store) = setup();
    let mut user = sample_user("testuser");
    store.insert(&mut user, Deadline::none()).await.unwrap();

    let found = store.find_by_username("testuser", Deadline::none()).await.unwrap();
    let json = serde_json::to_value(&found).unwrap();

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["username"], "testuser");
}

#[tokio::test]
async fn test_insert_then_find_matches_with_last_login() {
    let (_, store) = setup();
    let mut user = sample_user("returning");
    user.last_login = Some(chrono::Utc::now());

    store.insert(&mut user, Deadline::none()).await.unwrap();
    let found = store.find_by_username("returning", Deadline::none()).await.unwrap();

    assert_eq!(found, user);
    assert!(found.last_login.is_some());
}
