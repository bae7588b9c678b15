//! SQLite-backed generic repository.
//!
//! # Responsibility
//! - Run CRUD statements for any `Entity` over a borrowed connection.
//! - Classify engine failures into `DatabaseIntegrityError` / `DatabaseError`.
//!
//! # Invariants
//! - Each operation runs inside exactly one transaction.
//! - Success commits before returning; failure rolls back before returning.
//! - Draft parsing happens before any transaction is opened.

use crate::entity::{parse_draft, Entity, EntityId, FieldValues, Fields};
use crate::error::{classify_storage_error, CoreError, CoreResult};
use crate::repo::{Readable, Transactional};
use log::{debug, error};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::time::Instant;

/// Repository bound to one entity type at construction.
pub struct SqliteRepository<'conn, E: Entity> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> E>,
}

impl<'conn, E: Entity> SqliteRepository<'conn, E> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    fn in_transaction<T>(
        &self,
        op: &'static str,
        work: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> CoreResult<T> {
        let started_at = Instant::now();
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|err| self.storage_failure(op, started_at, &err))?;

        let outcome = work(&*tx);
        match outcome {
            // A failed COMMIT drops the transaction, which rolls it back.
            Ok(value) => match tx.commit() {
                Ok(()) => {
                    debug!(
                        "event=repo_op module=repo status=ok op={} table={} duration_ms={}",
                        op,
                        E::TABLE,
                        started_at.elapsed().as_millis()
                    );
                    Ok(value)
                }
                Err(err) => Err(self.storage_failure(op, started_at, &err)),
            },
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    error!(
                        "event=repo_rollback module=repo status=error op={} table={} error={}",
                        op,
                        E::TABLE,
                        rollback_err
                    );
                }
                Err(self.storage_failure(op, started_at, &err))
            }
        }
    }

    fn storage_failure(
        &self,
        op: &'static str,
        started_at: Instant,
        err: &rusqlite::Error,
    ) -> CoreError {
        let classified = classify_storage_error(err);
        error!(
            "event=repo_op module=repo status=error op={} table={} duration_ms={} error_code={} error={}",
            op,
            E::TABLE,
            started_at.elapsed().as_millis(),
            classified.kind().label(),
            err
        );
        classified
    }
}

fn select_sql<E: Entity>() -> String {
    format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
}

fn select_by_id<E: Entity>(conn: &Connection, id: EntityId) -> rusqlite::Result<Option<E>> {
    conn.query_row(
        &format!("{} WHERE id = ?1", select_sql::<E>()),
        params![id],
        |row| E::from_row(row),
    )
    .optional()
}

fn insert_sql(table: &str, fields: &FieldValues) -> String {
    if fields.is_empty() {
        return format!("INSERT INTO {table} DEFAULT VALUES");
    }
    let columns = fields
        .iter()
        .map(|(column, _)| *column)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=fields.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})")
}

fn update_sql(table: &str, fields: &FieldValues) -> String {
    let assignments = fields
        .iter()
        .enumerate()
        .map(|(index, (column, _))| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {table} SET {assignments} WHERE id = ?{}",
        fields.len() + 1
    )
}

impl<E: Entity> Readable for SqliteRepository<'_, E> {
    type Entity = E;

    fn get(&self, id: EntityId) -> CoreResult<Option<E>> {
        self.in_transaction("get", |conn| select_by_id::<E>(conn, id))
    }

    fn get_multi(&self, skip: u32, limit: u32) -> CoreResult<Vec<E>> {
        self.in_transaction("get_multi", |conn| {
            let mut stmt = conn.prepare(&format!(
                "{} ORDER BY id ASC LIMIT ?1 OFFSET ?2",
                select_sql::<E>()
            ))?;
            let rows = stmt.query_map(params![i64::from(limit), i64::from(skip)], |row| {
                E::from_row(row)
            })?;
            rows.collect()
        })
    }
}

impl<E: Entity> Transactional for SqliteRepository<'_, E> {
    fn create(&self, obj_in: &Map<String, Value>) -> CoreResult<E> {
        let draft = parse_draft::<E>(obj_in)?;
        let fields = draft.fields();

        self.in_transaction("create", |conn| {
            conn.execute(
                &insert_sql(E::TABLE, &fields),
                params_from_iter(fields.iter().map(|(_, value)| value)),
            )?;
            let id = conn.last_insert_rowid();
            select_by_id::<E>(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    fn update(&self, db_obj: &mut E, patch: &E::Patch) -> CoreResult<()> {
        let id = db_obj.id();
        let fields = patch.fields();

        let refreshed = self.in_transaction("update", |conn| {
            if !fields.is_empty() {
                let values = fields
                    .iter()
                    .map(|(_, value)| value.clone())
                    .chain(std::iter::once(rusqlite::types::Value::Integer(id)));
                conn.execute(&update_sql(E::TABLE, &fields), params_from_iter(values))?;
            }
            select_by_id::<E>(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })?;

        *db_obj = refreshed;
        Ok(())
    }

    fn delete(&self, db_obj: E) -> CoreResult<()> {
        let id = db_obj.id();
        self.in_transaction("delete", |conn| {
            conn.execute(&format!("DELETE FROM {} WHERE id = ?1", E::TABLE), params![id])?;
            Ok(())
        })
    }
}
