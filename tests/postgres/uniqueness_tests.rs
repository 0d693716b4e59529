//! Uniqueness constraint tests for the `PostgreSQL` custom field repository.

use crate::postgres::helpers::{PostgresCluster, custom_field, postgres_cluster, prepare_repo};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use user_fields::custom_field::{
    domain::{
        CustomFieldDraft, FieldAttribute, FieldName, PersistedCustomFieldData, UserCustomField,
        ViolationKind,
    },
    ports::{CustomFieldRepository, CustomFieldRepositoryError},
    services::{CustomFieldService, CustomFieldServiceError},
};

#[rstest]
fn insert_rejects_name_taken_by_another_user(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let first_owner = prepared.insert_user().expect("user insert");
    let second_owner = prepared.insert_user().expect("user insert");
    let original = custom_field(first_owner, "some existed field", "text", &[]);
    prepared
        .rt
        .block_on(prepared.repo.insert(&original))
        .expect("first insert");

    let clash = custom_field(second_owner, "some existed field", "number", &[]);
    let result = prepared.rt.block_on(prepared.repo.insert(&clash));

    assert!(
        matches!(
            &result,
            Err(CustomFieldRepositoryError::DuplicateName(name))
                if name.as_str() == "some existed field"
        ),
        "expected DuplicateName, got: {result:?}"
    );
}

#[rstest]
fn insert_rejects_duplicate_id(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let user_id = prepared.insert_user().expect("user insert");
    let original = custom_field(user_id, "Original", "text", &[]);
    prepared
        .rt
        .block_on(prepared.repo.insert(&original))
        .expect("first insert");

    let other = custom_field(user_id, "Other", "text", &[]);
    let same_id = UserCustomField::from_persisted(PersistedCustomFieldData {
        id: original.id(),
        user_id,
        name: other.name().clone(),
        internal_name: other.internal_name().clone(),
        field_type: other.field_type(),
        options: other.options().clone(),
        created_at: other.created_at(),
        updated_at: other.updated_at(),
    });
    let result = prepared.rt.block_on(prepared.repo.insert(&same_id));

    assert!(
        matches!(result, Err(CustomFieldRepositoryError::DuplicateField(id)) if id == original.id()),
        "expected DuplicateField, got: {result:?}"
    );
}

#[rstest]
fn names_differing_in_case_coexist(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let user_id = prepared.insert_user().expect("user insert");
    for name in ["Team", "team"] {
        let field = custom_field(user_id, name, "text", &[]);
        prepared
            .rt
            .block_on(prepared.repo.insert(&field))
            .expect("insert");
    }

    let listed = prepared
        .rt
        .block_on(prepared.repo.list_for_user(user_id))
        .expect("list");
    assert_eq!(listed.len(), 2);
}

#[rstest]
fn exists_by_name_excludes_the_given_field(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let user_id = prepared.insert_user().expect("user insert");
    let field = custom_field(user_id, "Colour", "text", &[]);
    prepared
        .rt
        .block_on(prepared.repo.insert(&field))
        .expect("insert");
    let name = FieldName::new("Colour").expect("valid name");

    let taken = prepared
        .rt
        .block_on(prepared.repo.exists_by_name(&name, None))
        .expect("exists");
    let taken_by_other = prepared
        .rt
        .block_on(prepared.repo.exists_by_name(&name, Some(field.id())))
        .expect("exists");

    assert!(taken);
    assert!(!taken_by_other);
}

#[rstest]
fn update_into_taken_name_maps_index_violation(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let user_id = prepared.insert_user().expect("user insert");
    let first = custom_field(user_id, "First", "text", &[]);
    let mut second = custom_field(user_id, "Second", "text", &[]);
    for field in [&first, &second] {
        prepared
            .rt
            .block_on(prepared.repo.insert(field))
            .expect("insert");
    }

    let renamed = CustomFieldDraft::new(user_id, "First", "text")
        .validate()
        .expect("valid draft");
    second.apply(renamed, &DefaultClock);
    let result = prepared.rt.block_on(prepared.repo.update(&second));

    assert!(
        matches!(result, Err(CustomFieldRepositoryError::DuplicateName(_))),
        "expected DuplicateName, got: {result:?}"
    );
}

#[rstest]
fn service_reports_duplicate_name_as_validation_error(postgres_cluster: PostgresCluster) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let prepared = prepare_repo(cluster).expect("repository setup");
    let user_id = prepared.insert_user().expect("user insert");
    let service = CustomFieldService::new(Arc::new(prepared.repo.clone()), Arc::new(DefaultClock));
    let draft = CustomFieldDraft::new(user_id, "some existed field", "text");

    prepared
        .rt
        .block_on(service.create(draft.clone()))
        .expect("first create");
    let result = prepared.rt.block_on(service.create(draft));

    match result {
        Err(CustomFieldServiceError::Validation(errors)) => {
            assert!(errors.contains(FieldAttribute::Name, &ViolationKind::DuplicateName));
            assert_eq!(errors.messages(), vec!["name has already been taken"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
