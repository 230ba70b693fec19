//! Record repository contract and generic SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed storage (list, lookup, insert, save, delete) for any
//!   [`Record`] kind.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Stores never validate candidates; that is the validator's job.
//! - The unique index on the folded key is the last line of defence against
//!   duplicate natural keys and surfaces as [`RepoError::Conflict`].
//! - `save`/`delete_by_id` on a missing id return [`RepoError::NotFound`].

use crate::db::DbError;
use crate::model::record::{fold_key, Record, RecordId, RecordSchema};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(RecordId),
    /// Another record already holds this natural key (ignoring case).
    Conflict(String),
    /// A record without a natural key was handed to a write path.
    MissingKey(&'static str),
    /// The backing table does not exist; migrations were not applied.
    SchemaMissing(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Conflict(key) => write!(f, "natural key already taken: `{key}`"),
            Self::MissingKey(kind) => write!(f, "{kind} record has no natural key"),
            Self::SchemaMissing(table) => {
                write!(f, "table `{table}` is missing; open the database with open_db")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed storage for one record kind.
pub trait RecordRepository<R: Record> {
    /// Returns every record in insertion order.
    fn list_all(&self) -> RepoResult<Vec<R>>;
    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<R>>;
    /// Case-insensitive exact match; the lowest id wins if duplicates exist.
    fn find_by_natural_key(&self, key: &str) -> RepoResult<Option<R>>;
    /// Persists a new record under a fresh id and returns the stored copy.
    ///
    /// The id carried by `record` is ignored.
    fn insert(&self, record: &R) -> RepoResult<R>;
    /// Persists changes to an existing id.
    fn save(&self, record: &R) -> RepoResult<R>;
    fn delete_by_id(&self, id: RecordId) -> RepoResult<()>;
}

impl<R: Record, T: RecordRepository<R> + ?Sized> RecordRepository<R> for &T {
    fn list_all(&self) -> RepoResult<Vec<R>> {
        (**self).list_all()
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<R>> {
        (**self).find_by_id(id)
    }

    fn find_by_natural_key(&self, key: &str) -> RepoResult<Option<R>> {
        (**self).find_by_natural_key(key)
    }

    fn insert(&self, record: &R) -> RepoResult<R> {
        (**self).insert(record)
    }

    fn save(&self, record: &R) -> RepoResult<R> {
        (**self).save(record)
    }

    fn delete_by_id(&self, id: RecordId) -> RepoResult<()> {
        (**self).delete_by_id(id)
    }
}

/// SQLite-backed repository for any record kind, driven by `R::SCHEMA`.
pub struct SqliteRecordRepository<'conn, R: Record> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> R>,
}

impl<'conn, R: Record> SqliteRecordRepository<'conn, R> {
    /// Wraps a connection without checking its schema.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }

    /// Wraps a connection after confirming the backing table exists.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let table = R::SCHEMA.table;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(RepoError::SchemaMissing(table));
        }
        Ok(Self::new(conn))
    }

    fn select_sql() -> String {
        let RecordSchema {
            table,
            key_column,
            label_column,
            ..
        } = R::SCHEMA;
        format!("SELECT id, {key_column} AS natural_key, {label_column} AS label FROM {table}")
    }

    fn write_parts(record: &R) -> RepoResult<(&str, String, Option<&str>)> {
        let key = record
            .natural_key()
            .ok_or(RepoError::MissingKey(R::SCHEMA.kind))?;
        Ok((key, fold_key(key), record.label()))
    }
}

impl<R: Record> RecordRepository<R> for SqliteRecordRepository<'_, R> {
    fn list_all(&self) -> RepoResult<Vec<R>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id ASC;", Self::select_sql()))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<R>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row(row)?));
        }

        Ok(None)
    }

    fn find_by_natural_key(&self, key: &str) -> RepoResult<Option<R>> {
        let folded_column = R::SCHEMA.folded_key_column();
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE {folded_column} = ?1 ORDER BY id ASC LIMIT 1;",
            Self::select_sql()
        ))?;
        let mut rows = stmt.query([fold_key(key)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, record: &R) -> RepoResult<R> {
        let RecordSchema {
            table,
            key_column,
            label_column,
            ..
        } = R::SCHEMA;
        let (key, folded, label) = Self::write_parts(record)?;

        self.conn
            .execute(
                &format!(
                    "INSERT INTO {table} ({key_column}, {key_column}_folded, {label_column})
                     VALUES (?1, ?2, ?3);"
                ),
                params![key, folded, label],
            )
            .map_err(|err| map_write_error(err, key))?;

        Ok(record.with_id(self.conn.last_insert_rowid()))
    }

    fn save(&self, record: &R) -> RepoResult<R> {
        let RecordSchema {
            table,
            key_column,
            label_column,
            ..
        } = R::SCHEMA;
        let (key, folded, label) = Self::write_parts(record)?;

        let changed = self
            .conn
            .execute(
                &format!(
                    "UPDATE {table}
                     SET
                        {key_column} = ?1,
                        {key_column}_folded = ?2,
                        {label_column} = ?3,
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE id = ?4;"
                ),
                params![key, folded, label, record.id()],
            )
            .map_err(|err| map_write_error(err, key))?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.id()));
        }

        Ok(record.clone())
    }

    fn delete_by_id(&self, id: RecordId) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", R::SCHEMA.table),
            [id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Counts stored records of one kind without loading them.
pub fn count_records<R: Record>(conn: &Connection) -> RepoResult<u64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {};", R::SCHEMA.table),
        [],
        |row| row.get(0),
    )?;
    Ok(count.unsigned_abs())
}

fn parse_record_row<R: Record>(row: &Row<'_>) -> RepoResult<R> {
    let id: RecordId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in {}.id",
            R::SCHEMA.table
        )));
    }

    Ok(R::from_parts(id, row.get("natural_key")?, row.get("label")?))
}

fn map_write_error(err: rusqlite::Error, key: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::Conflict(key.to_owned())
        }
        _ => RepoError::from(err),
    }
}
