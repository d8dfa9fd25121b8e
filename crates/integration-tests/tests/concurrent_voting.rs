//! Voting under concurrency on a shared SQLite file: simultaneous upvotes
//! from different users must all land.

mod common;

use common::{services, TempDb};
use featureboard_core::domain::Feature;
use featureboard_core::ErrorKind;
use futures::future::join_all;
use uuid::Uuid;

const VOTERS: usize = 16;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_upvotes_are_not_lost() {
    let db = TempDb::new();
    let pool = db.open(4).await;
    // A write only loses to another voter's committed write, so each voter
    // can lose at most VOTERS - 1 times
    let svc = services(&pool, VOTERS as u32);
    let owner = Uuid::new_v4();
    let feature_id = Uuid::new_v4();
    svc.features
        .add(Feature::new(feature_id, owner, "Offline mode", "Works on planes"))
        .await
        .unwrap();

    let voters: Vec<Uuid> = (0..VOTERS).map(|_| Uuid::new_v4()).collect();
    let handles = voters.iter().map(|&voter| {
        let voting = svc.voting.clone();
        tokio::spawn(async move { voting.upvote(voter, feature_id).await })
    });

    for result in join_all(handles).await {
        result.unwrap().unwrap();
    }

    let feature = svc.features.get(&owner, &feature_id).await.unwrap();
    assert_eq!(feature.vote_count(), VOTERS);
    for voter in &voters {
        assert!(feature.has_voted(voter));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_repeat_vote_counts_once() {
    let db = TempDb::new();
    let pool = db.open(4).await;
    let svc = services(&pool, 10);
    let owner = Uuid::new_v4();
    let voter = Uuid::new_v4();
    let feature_id = Uuid::new_v4();
    svc.features
        .add(Feature::new(feature_id, owner, "Tags", "Label things"))
        .await
        .unwrap();

    let handles = (0..8).map(|_| {
        let voting = svc.voting.clone();
        tokio::spawn(async move { voting.upvote(voter, feature_id).await })
    });

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    for rejected in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(rejected.kind(), ErrorKind::DuplicateVote);
    }

    let feature = svc.features.get(&owner, &feature_id).await.unwrap();
    assert_eq!(feature.votes, vec![voter]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_detail_edit_racing_votes_keeps_both() {
    let db = TempDb::new();
    let pool = db.open(4).await;
    let svc = services(&pool, VOTERS as u32 + 1);
    let owner = Uuid::new_v4();
    let feature_id = Uuid::new_v4();
    svc.features
        .add(Feature::new(feature_id, owner, "Sync", "Across devices"))
        .await
        .unwrap();

    let votes = (0..VOTERS).map(|_| {
        let voting = svc.voting.clone();
        tokio::spawn(async move { voting.upvote(Uuid::new_v4(), feature_id).await.map(|_| ()) })
    });
    let features = svc.features.clone();
    let edit = tokio::spawn(async move {
        features
            .update_details(&owner, &feature_id, "Sync v2".into(), "Every device".into())
            .await
            .map(|_| ())
    });

    for result in join_all(votes).await {
        result.unwrap().unwrap();
    }
    edit.await.unwrap().unwrap();

    let feature = svc.features.get(&owner, &feature_id).await.unwrap();
    assert_eq!(feature.name, "Sync v2");
    assert_eq!(feature.vote_count(), VOTERS);
}
