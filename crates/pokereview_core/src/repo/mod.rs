//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - One repository per entity: existence checks, lookups, ordered lists,
//!   relationship queries and mutations.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every mutation runs through one `UnitOfWork` commit.
//! - Write paths validate the entity before any SQL runs.
//! - Outcomes are discriminated: a mutation that matched no row is
//!   `NotFound`, a store rejection is `Constraint`, an insert whose commit
//!   touched no row is `NothingPersisted`.

use crate::db::{DbError, UnitOfWork};
use crate::model::{EntityId, ModelValidationError};
use rusqlite::{Connection, OptionalExtension, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod country_repo;
pub mod owner_repo;
pub mod pokemon_repo;
pub mod review_repo;
pub mod reviewer_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Discriminated repository outcome for every entity.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: EntityId,
    },
    Constraint {
        entity: &'static str,
        message: String,
    },
    NothingPersisted {
        entity: &'static str,
    },
}

impl RepoError {
    /// Classifies a write failure: constraint rejections become
    /// `Constraint`, anything else stays a transport error.
    pub(crate) fn from_write(entity: &'static str, err: DbError) -> Self {
        if err.is_constraint_violation() {
            Self::Constraint {
                entity,
                message: err.to_string(),
            }
        } else {
            Self::Db(err)
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::Constraint { entity, message } => {
                write!(f, "{entity} write rejected by store: {message}")
            }
            Self::NothingPersisted { entity } => write!(f, "{entity} save affected no rows"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::Constraint { .. } | Self::NothingPersisted { .. } => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
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

pub(crate) fn row_exists(conn: &Connection, table: &str, id: EntityId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Fails with `NotFound` unless `table` has a row with `id`.
pub(crate) fn require_row(
    conn: &Connection,
    table: &str,
    entity: &'static str,
    id: EntityId,
) -> RepoResult<()> {
    if row_exists(conn, table, id)? {
        Ok(())
    } else {
        Err(RepoError::NotFound { entity, id })
    }
}

pub(crate) fn query_one<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> RepoResult<Option<T>> {
    Ok(conn.query_row(sql, params, parse).optional()?)
}

pub(crate) fn query_all<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}

/// Commits a unit of work that must touch at least one row.
pub(crate) fn commit_expecting_rows(uow: UnitOfWork<'_>, entity: &'static str) -> RepoResult<usize> {
    let rows = uow
        .commit()
        .map_err(|err| RepoError::from_write(entity, err))?;
    if rows == 0 {
        return Err(RepoError::NothingPersisted { entity });
    }
    Ok(rows)
}

/// Runs one statement addressed at a single row by id and commits it.
///
/// Zero matched rows is reported as `NotFound` and nothing is committed.
pub(crate) fn write_single_row<P: Params>(
    conn: &Connection,
    entity: &'static str,
    id: EntityId,
    sql: &str,
    params: P,
) -> RepoResult<()> {
    let mut uow = UnitOfWork::begin(conn)?;
    let changed = uow
        .execute(sql, params)
        .map_err(|err| RepoError::from_write(entity, err))?;
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    uow.commit()
        .map_err(|err| RepoError::from_write(entity, err))?;
    Ok(())
}
