use thesis_core::db::open_db_in_memory;
use thesis_core::{
    InMemoryRecordRepository, RecordRepository, RejectReason, Role, RoleService,
    SqliteRecordRepository, Verdict, UNSAVED_ID,
};

fn create_researcher_into_empty_store<S: RecordRepository<Role>>(service: RoleService<S>) {
    let candidate = Role::new("Researcher", "");
    assert!(service.validate(UNSAVED_ID, &candidate).unwrap().is_accepted());

    let created = service.create(&candidate).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name.as_deref(), Some("Researcher"));
    assert_eq!(created.description.as_deref(), Some(""));
    assert_eq!(service.list().unwrap(), vec![created]);
}

#[test]
fn create_into_empty_store_lists_exactly_that_record() {
    let conn = open_db_in_memory().unwrap();
    create_researcher_into_empty_store(RoleService::new(
        SqliteRecordRepository::<Role>::try_new(&conn).unwrap(),
    ));
    create_researcher_into_empty_store(RoleService::new(InMemoryRecordRepository::<Role>::new()));
}

#[test]
fn role_name_conflict_ignores_case_and_self() {
    let service = RoleService::new(InMemoryRecordRepository::<Role>::new());
    let adviser = service.create(&Role::new("Adviser", "Guides the thesis")).unwrap();

    assert_eq!(
        service.validate(UNSAVED_ID, &Role::new("ADVISER", "")).unwrap(),
        Verdict::Rejected(RejectReason::KeyConflict("ADVISER".to_string()))
    );
    assert_eq!(
        service.validate(adviser.id, &Role::new("adviser", "lowercased")).unwrap(),
        Verdict::Accepted
    );
}

#[test]
fn absent_description_is_accepted_and_stored_as_null() {
    let conn = open_db_in_memory().unwrap();
    let service = RoleService::new(SqliteRecordRepository::<Role>::try_new(&conn).unwrap());
    let candidate = Role {
        name: Some("Panelist".to_string()),
        ..Role::default()
    };

    assert!(service.validate(UNSAVED_ID, &candidate).unwrap().is_accepted());
    let created = service.create(&candidate).unwrap();
    assert_eq!(service.get(created.id).unwrap().unwrap().description, None);
}

#[test]
fn missing_name_is_rejected_before_lookup() {
    let service = RoleService::new(InMemoryRecordRepository::<Role>::new());

    assert_eq!(
        service.validate(UNSAVED_ID, &Role::default()).unwrap(),
        Verdict::Rejected(RejectReason::KeyRequired)
    );
}

#[test]
fn update_and_delete_on_unknown_id_signal_absence() {
    let service = RoleService::new(InMemoryRecordRepository::<Role>::new());
    service.create(&Role::new("Adviser", "")).unwrap();

    assert_eq!(service.update(404, &Role::new("Critic", "")).unwrap(), None);
    assert_eq!(service.delete(404).unwrap(), None);
    assert_eq!(service.list().unwrap().len(), 1);
}
