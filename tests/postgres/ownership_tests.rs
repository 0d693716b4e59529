//! Ownership tests: the foreign key to `users` and its cascade.

use crate::postgres::helpers::{PostgresCluster, custom_field, postgres_cluster, prepare_repo};
use rstest::rstest;
use user_fields::custom_field::{
    domain::UserId,
    ports::{CustomFieldRepository, CustomFieldRepositoryError},
};

#[rstest]
fn insert_for_unknown_user_is_rejected(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let stranger = UserId::new();
    let field = custom_field(stranger, "Orphan", "text", &[]);

    let result = prepared.rt.block_on(prepared.repo.insert(&field));

    assert!(
        matches!(result, Err(CustomFieldRepositoryError::UnknownUser(id)) if id == stranger),
        "expected UnknownUser, got: {result:?}"
    );
}

#[rstest]
fn deleting_user_cascades_to_fields(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let owner = prepared.insert_user().expect("user insert");
    let survivor = prepared.insert_user().expect("user insert");
    for name in ["Alpha", "Beta"] {
        let field = custom_field(owner, name, "text", &[]);
        prepared
            .rt
            .block_on(prepared.repo.insert(&field))
            .expect("insert");
    }
    let kept = custom_field(survivor, "Gamma", "text", &[]);
    prepared
        .rt
        .block_on(prepared.repo.insert(&kept))
        .expect("insert");

    prepared.delete_user(owner).expect("user delete");

    let owned = prepared
        .rt
        .block_on(prepared.repo.list_for_user(owner))
        .expect("list");
    let remaining = prepared
        .rt
        .block_on(prepared.repo.list_for_user(survivor))
        .expect("list");
    assert!(owned.is_empty());
    assert_eq!(remaining.len(), 1);

    let reused = custom_field(survivor, "Alpha", "text", &[]);
    prepared
        .rt
        .block_on(prepared.repo.insert(&reused))
        .expect("cascaded name should be free");
}

#[rstest]
fn delete_for_user_reports_removed_count(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let owner = prepared.insert_user().expect("user insert");
    for name in ["One", "Two", "Three"] {
        let field = custom_field(owner, name, "number", &[]);
        prepared
            .rt
            .block_on(prepared.repo.insert(&field))
            .expect("insert");
    }

    let removed = prepared
        .rt
        .block_on(prepared.repo.delete_for_user(owner))
        .expect("delete for user");

    assert_eq!(removed, 3);
}
