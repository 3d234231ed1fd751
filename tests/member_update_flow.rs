//! Member update flows end to end: backend JSON in, promote, save payload out

use flock::{FormError, MemberUpdateForm, SearchStores};
use flock_types::{
    build_search_query, HierarchyField, MemberKind, MemberRecord, Paging, Role, RoleSet,
    SearchEntity, SearchFormInput, SearchType,
};
use serde_json::json;

fn record(kind: &str, roles: serde_json::Value) -> MemberRecord {
    serde_json::from_value(json!({
        "id": "6a0f3c52-8f7e-4b8e-9d55-1f2a3b4c5d6e",
        "kind": kind,
        "firstNames": "Rosa",
        "lastNames": "Mamani",
        "gender": "female",
        "birthDate": "1990-11-23",
        "maritalStatus": "married",
        "numberOfChildren": 1,
        "residence": {
            "country": "Peru",
            "department": "Lima",
            "province": "Lima",
            "district": "Comas",
            "urbanSector": "La Pascana",
            "address": "Av. Los Incas 123"
        },
        "roles": roles,
        "theirChurch": "11111111-1111-4111-8111-111111111111",
        "theirPastor": "22222222-2222-4222-8222-222222222222",
        "theirCopastor": "33333333-3333-4333-8333-333333333333",
        "theirSupervisor": "44444444-4444-4444-8444-444444444444",
        "theirZone": "55555555-5555-4555-8555-555555555555",
        "theirPreacher": "66666666-6666-4666-8666-666666666666",
        "theirFamilyGroup": "77777777-7777-4777-8777-777777777777",
        "recordStatus": "active",
        "createdAt": "2023-02-14T09:30:00Z"
    }))
    .expect("valid member json")
}

#[test]
fn disciple_promoted_to_preacher_is_saved_without_family_group() {
    let mut form = MemberUpdateForm::from_record(record("disciple", json!(["disciple"])));
    let outcome = form.promote().unwrap();
    assert!(outcome.promoted);

    let payload = serde_json::to_value(form.to_update_request().unwrap()).unwrap();
    assert_eq!(payload["roles"], json!(["preacher"]));
    assert!(payload["theirFamilyGroup"].is_null());
    assert!(payload["theirPreacher"].is_null());
    assert_eq!(payload["theirChurch"], json!("11111111-1111-4111-8111-111111111111"));
    assert_eq!(payload["residence"]["urbanSector"], json!("La Pascana"));
}

#[test]
fn supervising_treasurer_becomes_copastor() {
    let mut form = MemberUpdateForm::from_record(record(
        "supervisor",
        json!(["supervisor", "treasurer"]),
    ));
    let outcome = form.promote().unwrap();
    assert!(outcome.promoted);
    assert_eq!(form.roles(), Some(&RoleSet::from([Role::Copastor])));
    assert_eq!(form.hierarchy_value(HierarchyField::TheirCopastor), None);
    assert!(form.hierarchy_value(HierarchyField::TheirPastor).is_some());
}

#[test]
fn copastor_with_treasury_is_locked_without_promotion() {
    let mut form = MemberUpdateForm::from_record(record(
        "copastor",
        json!(["copastor", "treasurer"]),
    ));
    let outcome = form.promote().unwrap();
    assert!(!outcome.promoted);
    assert_eq!(form.roles(), Some(&RoleSet::from([Role::Treasurer])));
    assert_eq!(
        form.assign(HierarchyField::TheirPastor, None),
        Err(FormError::Locked)
    );

    // Promote button stays disabled; a second click changes nothing
    assert!(form.is_promote_button_disabled());
    let again = form.promote().unwrap();
    assert_eq!(again.new_roles, Some(RoleSet::from([Role::Treasurer])));
}

#[test]
fn search_results_cached_per_tier() {
    let query = build_search_query(
        SearchEntity::from(MemberKind::Disciple),
        SearchType::LastNames,
        &SearchFormInput {
            last_names_term: Some("Mamani".into()),
            ..Default::default()
        },
        Paging::default(),
    )
    .unwrap();

    let mut stores = SearchStores::default();
    stores
        .members_mut(MemberKind::Disciple)
        .replace(query.clone(), vec![record("disciple", json!(["disciple"]))]);

    let cached = stores.members(MemberKind::Disciple).unwrap();
    assert!(!cached.is_stale_for(&query));
    assert_eq!(cached.results()[0].full_name(), "Rosa Mamani");
    assert!(stores.members(MemberKind::Preacher).is_none());
}
