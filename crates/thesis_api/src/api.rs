//! Transport-neutral use-case API for degree and role collections.
//!
//! # Responsibility
//! - Run the validate-then-mutate flow for each collection operation.
//! - Map verdicts, absences and storage failures to status codes and
//!   client-facing messages.
//!
//! # Invariants
//! - Handlers never panic; every outcome becomes an [`ApiResponse`].
//! - A rejected candidate is never handed to `create`/`update`.
//! - Status codes: 200 read/update/delete, 201 create, 400 rejected
//!   candidate, 404 unknown id, 500 storage failure.

use log::{error, warn};
use serde::Serialize;
use thesis_core::{
    Record, RecordId, RecordRepository, RecordSchema, RecordService, RejectReason, RepoError,
    Verdict,
};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Error body returned for every non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response payload; serializes as the bare record, array or error object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody<T> {
    Record(T),
    List(Vec<T>),
    Error(ErrorMessage),
}

/// Status code plus body for one handled request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: ResponseBody<T>,
}

impl<T> ApiResponse<T> {
    fn record(status: u16, record: T) -> Self {
        Self {
            status,
            body: ResponseBody::Record(record),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Error(ErrorMessage::new(message)),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the error message for non-success responses.
    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Error(error) => Some(error.message.as_str()),
            _ => None,
        }
    }
}

/// Builds the not-found message for `schema` and `id`.
pub fn not_found_message(schema: &RecordSchema, id: RecordId) -> String {
    format!("{} with id '{}' not found.", schema.kind, id)
}

/// Lists every record of one kind.
pub fn list_records<R, S>(service: &RecordService<R, S>) -> ApiResponse<R>
where
    R: Record,
    S: RecordRepository<R>,
{
    match service.list() {
        Ok(records) => ApiResponse {
            status: STATUS_OK,
            body: ResponseBody::List(records),
        },
        Err(err) => storage_failure::<R>("list", err),
    }
}

/// Validates the candidate against its own id, then creates it.
pub fn create_record<R, S>(service: &RecordService<R, S>, candidate: &R) -> ApiResponse<R>
where
    R: Record,
    S: RecordRepository<R>,
{
    if let Some(rejected) = gate::<R, S>(service, candidate.id(), candidate) {
        return rejected;
    }

    match service.create(candidate) {
        Ok(created) => ApiResponse::record(STATUS_CREATED, created),
        Err(err) => mutation_failure::<R>("create", candidate.id(), err),
    }
}

pub fn get_record<R, S>(service: &RecordService<R, S>, id: RecordId) -> ApiResponse<R>
where
    R: Record,
    S: RecordRepository<R>,
{
    match service.get(id) {
        Ok(Some(record)) => ApiResponse::record(STATUS_OK, record),
        Ok(None) => ApiResponse::error(STATUS_NOT_FOUND, not_found_message(&R::SCHEMA, id)),
        Err(err) => storage_failure::<R>("get", err),
    }
}

/// Validates the candidate against `id`, then updates the stored record.
///
/// Validation runs first, so an invalid candidate for an unknown id reports
/// the rejection rather than not-found.
pub fn update_record<R, S>(
    service: &RecordService<R, S>,
    id: RecordId,
    candidate: &R,
) -> ApiResponse<R>
where
    R: Record,
    S: RecordRepository<R>,
{
    if let Some(rejected) = gate::<R, S>(service, id, candidate) {
        return rejected;
    }

    match service.update(id, candidate) {
        Ok(Some(updated)) => ApiResponse::record(STATUS_OK, updated),
        Ok(None) => ApiResponse::error(STATUS_NOT_FOUND, not_found_message(&R::SCHEMA, id)),
        Err(err) => mutation_failure::<R>("update", id, err),
    }
}

pub fn delete_record<R, S>(service: &RecordService<R, S>, id: RecordId) -> ApiResponse<R>
where
    R: Record,
    S: RecordRepository<R>,
{
    match service.delete(id) {
        Ok(Some(deleted)) => ApiResponse::record(STATUS_OK, deleted),
        Ok(None) => ApiResponse::error(STATUS_NOT_FOUND, not_found_message(&R::SCHEMA, id)),
        Err(err) => storage_failure::<R>("delete", err),
    }
}

/// Decodes a JSON payload and creates the record.
pub fn create_record_json<R, S>(service: &RecordService<R, S>, payload: &str) -> ApiResponse<R>
where
    R: Record,
    S: RecordRepository<R>,
{
    match decode_payload::<R>(payload) {
        Ok(candidate) => create_record(service, &candidate),
        Err(response) => response,
    }
}

/// Decodes a JSON payload and updates the record at `id`.
pub fn update_record_json<R, S>(
    service: &RecordService<R, S>,
    id: RecordId,
    payload: &str,
) -> ApiResponse<R>
where
    R: Record,
    S: RecordRepository<R>,
{
    match decode_payload::<R>(payload) {
        Ok(candidate) => update_record(service, id, &candidate),
        Err(response) => response,
    }
}

fn decode_payload<R: Record>(payload: &str) -> Result<R, ApiResponse<R>> {
    serde_json::from_str(payload).map_err(|err| {
        ApiResponse::error(
            STATUS_BAD_REQUEST,
            format!("Malformed {} payload: {err}", R::SCHEMA.kind),
        )
    })
}

fn gate<R, S>(service: &RecordService<R, S>, id: RecordId, candidate: &R) -> Option<ApiResponse<R>>
where
    R: Record,
    S: RecordRepository<R>,
{
    match service.validate(id, candidate) {
        Ok(Verdict::Accepted) => None,
        Ok(Verdict::Rejected(reason)) => Some(ApiResponse::error(
            STATUS_BAD_REQUEST,
            reason.message(&R::SCHEMA),
        )),
        Err(err) => Some(storage_failure::<R>("validate", err)),
    }
}

fn mutation_failure<R: Record>(operation: &str, id: RecordId, err: RepoError) -> ApiResponse<R> {
    match err {
        // A concurrent writer took the key between validation and commit.
        RepoError::Conflict(key) => {
            warn!(
                "event=record_{} module=api kind={} status=conflict id={}",
                operation,
                R::SCHEMA.kind,
                id
            );
            ApiResponse::error(
                STATUS_BAD_REQUEST,
                RejectReason::KeyConflict(key).message(&R::SCHEMA),
            )
        }
        RepoError::NotFound(missing) => {
            ApiResponse::error(STATUS_NOT_FOUND, not_found_message(&R::SCHEMA, missing))
        }
        other => storage_failure::<R>(operation, other),
    }
}

fn storage_failure<R: Record>(operation: &str, err: RepoError) -> ApiResponse<R> {
    error!(
        "event=record_{} module=api kind={} status=error error={}",
        operation,
        R::SCHEMA.kind,
        err
    );
    ApiResponse::error(
        STATUS_INTERNAL_ERROR,
        format!("{} {operation} failed: {err}", R::SCHEMA.kind),
    )
}

#[cfg(test)]
mod tests {
    use super::{
        create_record, create_record_json, delete_record, get_record, list_records,
        not_found_message, update_record, update_record_json, ResponseBody, STATUS_BAD_REQUEST,
        STATUS_CREATED, STATUS_NOT_FOUND, STATUS_OK,
    };
    use serde_json::json;
    use thesis_core::{
        Degree, DegreeService, InMemoryRecordRepository, Role, RoleService, DEGREE_SCHEMA,
    };

    fn degrees() -> DegreeService<InMemoryRecordRepository<Degree>> {
        DegreeService::new(InMemoryRecordRepository::new())
    }

    fn roles() -> RoleService<InMemoryRecordRepository<Role>> {
        RoleService::new(InMemoryRecordRepository::new())
    }

    #[test]
    fn create_returns_201_with_assigned_id() {
        let service = degrees();

        let response = create_record(&service, &Degree::new("BSCS", "Computer Science"));
        assert_eq!(response.status, STATUS_CREATED);
        let ResponseBody::Record(created) = response.body else {
            panic!("expected record body");
        };
        assert_eq!(created.id, 1);
    }

    #[test]
    fn rejected_candidates_map_to_400_with_messages() {
        let service = degrees();
        create_record(&service, &Degree::new("BSCS", "Computer Science"));

        let conflict = create_record(&service, &Degree::new("bscs", "X"));
        assert_eq!(conflict.status, STATUS_BAD_REQUEST);
        assert_eq!(
            conflict.error_message(),
            Some("Degree with abbreviation 'bscs' already exists.")
        );

        let missing_key = create_record(&service, &Degree::new("", "X"));
        assert_eq!(
            missing_key.error_message(),
            Some("Degree abbreviation is required.")
        );

        let missing_label = update_record(&service, 1, &Degree::new("BSCS", ""));
        assert_eq!(missing_label.status, STATUS_BAD_REQUEST);
        assert_eq!(missing_label.error_message(), Some("Degree name is required."));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn unknown_ids_map_to_404_with_kind_and_id() {
        let service = roles();

        for response in [
            get_record(&service, 7),
            update_record(&service, 7, &Role::new("Critic", "")),
            delete_record(&service, 7),
        ] {
            assert_eq!(response.status, STATUS_NOT_FOUND);
            assert_eq!(response.error_message(), Some("Role with id '7' not found."));
        }
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn update_validates_against_path_id() {
        let service = roles();
        create_record(&service, &Role::new("Adviser", ""));

        let response = update_record(&service, 1, &Role::new("ADVISER", "renamed case"));
        assert_eq!(response.status, STATUS_OK);
        assert!(response.is_success());
        let ResponseBody::Record(updated) = response.body else {
            panic!("expected record body");
        };
        assert_eq!(updated.name.as_deref(), Some("ADVISER"));
    }

    #[test]
    fn create_with_reused_id_and_key_is_caught_by_store() {
        let service = degrees();
        create_record(&service, &Degree::new("BSCS", "Computer Science"));

        let mut replay = Degree::new("BSCS", "Computer Science");
        replay.id = 1;
        let response = create_record(&service, &replay);
        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(
            response.error_message(),
            Some("Degree with abbreviation 'BSCS' already exists.")
        );
    }

    #[test]
    fn list_and_delete_serialize_as_bare_json() {
        let service = roles();
        create_record_json(&service, r#"{"name": "Researcher", "description": ""}"#);

        let listed = serde_json::to_value(list_records(&service).body).unwrap();
        assert_eq!(
            listed,
            json!([{"id": 1, "name": "Researcher", "description": ""}])
        );

        let deleted = delete_record(&service, 1);
        assert_eq!(deleted.status, STATUS_OK);
        assert_eq!(
            serde_json::to_value(&deleted.body).unwrap(),
            json!({"id": 1, "name": "Researcher", "description": ""})
        );
    }

    #[test]
    fn malformed_json_is_a_client_error() {
        let service = degrees();

        let response = update_record_json(&service, 1, "{not json");
        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert!(response
            .error_message()
            .unwrap_or("")
            .starts_with("Malformed Degree payload"));
    }

    #[test]
    fn error_body_serializes_as_message_object() {
        let response = get_record(&degrees(), 3);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({"message": not_found_message(&DEGREE_SCHEMA, 3)})
        );
    }
}
