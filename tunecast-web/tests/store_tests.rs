//! Submission store semantics against a temporary SQLite database

mod helpers;

use helpers::temp_store;
use tunecast_common::models::UserSubmission;
use tunecast_web::db::{SqliteSubmissionStore, SubmissionStore};

fn submission(name: &str, genre: &str) -> UserSubmission {
    UserSubmission::new(name, genre, "25").unwrap()
}

#[tokio::test]
async fn test_insert_returns_distinct_ids() {
    let (_dir, pool) = temp_store().await;
    let store = SqliteSubmissionStore::new(pool);
    let mut session = store.open_session().await.unwrap();

    let first = session.insert(&submission("Ava", "pop")).await.unwrap();
    let second = session.insert(&submission("Ava", "pop")).await.unwrap();
    assert_ne!(first, second);

    let stored = session.find_all().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].guid, first);
    assert_eq!(stored[1].guid, second);
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_find_by_genre_is_exact_and_case_sensitive() {
    let (_dir, pool) = temp_store().await;
    let store = SqliteSubmissionStore::new(pool);
    let mut session = store.open_session().await.unwrap();

    for (name, genre) in [
        ("Ava", "rock"),
        ("Ben", "Rock"),
        ("Cara", "rock and roll"),
        ("Dan", "punk rock"),
        ("Eve", "rock"),
    ] {
        session.insert(&submission(name, genre)).await.unwrap();
    }

    let rock = session.find_by_genre("rock").await.unwrap();
    let names: Vec<&str> = rock.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ava", "Eve"]);
    assert!(rock.iter().all(|s| s.genre == "rock"));

    assert!(session.find_by_genre("roc").await.unwrap().is_empty());
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_round_trip_across_sessions() {
    let (_dir, pool) = temp_store().await;
    let store = SqliteSubmissionStore::new(pool);

    let mut writer = store.open_session().await.unwrap();
    let id = writer.insert(&submission("Ava", "jazz")).await.unwrap();
    writer.close().await.unwrap();

    let mut reader = store.open_session().await.unwrap();
    let jazz = reader.find_by_genre("jazz").await.unwrap();
    reader.close().await.unwrap();

    assert_eq!(jazz.len(), 1);
    assert_eq!(jazz[0].guid, id);
    assert_eq!(jazz[0].name, "Ava");
    assert_eq!(jazz[0].age, "25");
}

#[tokio::test]
async fn test_find_all_keeps_insertion_order() {
    let (_dir, pool) = temp_store().await;
    let store = SqliteSubmissionStore::new(pool);
    let mut session = store.open_session().await.unwrap();

    for (name, genre) in [("Zed", "pop"), ("Amy", "jazz"), ("Max", "rock")] {
        session.insert(&submission(name, genre)).await.unwrap();
    }

    let all = session.find_all().await.unwrap();
    let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Zed", "Amy", "Max"]);
    session.close().await.unwrap();
}

#[tokio::test]
async fn test_closed_sessions_return_connections_to_pool() {
    let (_dir, pool) = temp_store().await;
    let store = SqliteSubmissionStore::new(pool);

    // More sequential sessions than the pool holds connections
    for i in 0..5 {
        let mut session = store.open_session().await.unwrap();
        session
            .insert(&submission(&format!("user{}", i), "pop"))
            .await
            .unwrap();
        session.close().await.unwrap();
    }

    let mut session = store.open_session().await.unwrap();
    assert_eq!(session.find_by_genre("pop").await.unwrap().len(), 5);
    session.close().await.unwrap();
}
