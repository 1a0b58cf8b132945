//! Featured-post cap under concurrency
//!
//! The cap is a table-wide invariant: no interleaving of toggles may
//! leave more than five posts featured.

mod common;

use std::sync::Arc;

use common::test_state;

use clinic_server::db::models::{PostCreate, PostStatus};
use clinic_server::db::repository::{PostRepository, RepoError, post::MAX_FEATURED_POSTS};

async fn seed_posts(repo: &PostRepository, n: usize) -> Vec<String> {
    let mut ids = Vec::new();
    for i in 0..n {
        let post = repo
            .create(
                PostCreate {
                    title: Some(format!("Post {i}")),
                    title_en: None,
                    slug: Some(format!("post-{i}")),
                    content: Some("<p>body</p>".to_string()),
                    content_en: None,
                    excerpt: None,
                    excerpt_en: None,
                    status: Some(PostStatus::Published),
                    featured: None,
                    show_on_homepage: None,
                    pin: None,
                    published_at: None,
                    categories: Vec::new(),
                    feature_image: None,
                },
                None,
            )
            .await
            .expect("seed post");
        ids.push(post.id.as_ref().map(|r| r.to_string()).unwrap());
    }
    ids
}

#[tokio::test]
async fn concurrent_toggles_never_exceed_the_cap() {
    let (state, _tmp) = test_state().await;
    let repo = PostRepository::new(state.db.clone(), state.featured_lock.clone());

    let ids = seed_posts(&repo, 8).await;

    // 8 concurrent enables against a cap of 5
    let mut handles = Vec::new();
    for id in &ids {
        let repo = repo.clone();
        let id = id.clone();
        handles.push(tokio::spawn(
            async move { repo.toggle_featured(&id).await },
        ));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("join") {
            Ok(post) => {
                assert!(post.featured);
                ok += 1;
            }
            Err(RepoError::Conflict(_)) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(ok as u64, MAX_FEATURED_POSTS);
    assert_eq!(conflicts, ids.len() - MAX_FEATURED_POSTS as usize);
    assert_eq!(repo.featured_count().await.unwrap(), MAX_FEATURED_POSTS);
}

#[tokio::test]
async fn disabling_is_always_allowed_and_frees_a_slot() {
    let (state, _tmp) = test_state().await;
    let repo = PostRepository::new(state.db.clone(), state.featured_lock.clone());

    let ids = seed_posts(&repo, 6).await;

    for id in ids.iter().take(MAX_FEATURED_POSTS as usize) {
        repo.toggle_featured(id).await.expect("enable under cap");
    }

    // Sixth enable hits the cap
    let err = repo.toggle_featured(&ids[5]).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    // Disable one, the slot frees up
    let post = repo.toggle_featured(&ids[0]).await.expect("disable");
    assert!(!post.featured);
    let post = repo.toggle_featured(&ids[5]).await.expect("enable again");
    assert!(post.featured);

    assert_eq!(repo.featured_count().await.unwrap(), MAX_FEATURED_POSTS);
}

#[tokio::test]
async fn repeated_toggle_storms_hold_the_invariant() {
    let (state, _tmp) = test_state().await;
    let repo = PostRepository::new(state.db.clone(), state.featured_lock.clone());

    let ids = Arc::new(seed_posts(&repo, 10).await);

    // Two rounds of mixed toggles; after every round the count obeys the cap
    for _ in 0..2 {
        let mut handles = Vec::new();
        for id in ids.iter() {
            let repo = repo.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                let _ = repo.toggle_featured(&id).await;
            }));
        }
        for handle in handles {
            handle.await.expect("join");
        }
        assert!(repo.featured_count().await.unwrap() <= MAX_FEATURED_POSTS);
    }
}
