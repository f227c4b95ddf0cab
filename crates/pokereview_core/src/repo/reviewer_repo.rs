//! Reviewer repository contract and SQLite implementation.
//!
//! # Invariants
//! - `delete_reviewer` does not touch reviews; the store rejects deleting a
//!   reviewer that still has reviews, so callers remove them first.

use crate::db::UnitOfWork;
use crate::model::review::{Review, Reviewer};
use crate::model::EntityId;
use crate::repo::review_repo::{parse_review_row, REVIEW_COLUMNS};
use crate::repo::{
    commit_expecting_rows, query_all, query_one, row_exists, write_single_row, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "Reviewer";

pub trait ReviewerRepository {
    fn reviewer_exists(&self, id: EntityId) -> RepoResult<bool>;
    fn get_reviewer(&self, id: EntityId) -> RepoResult<Option<Reviewer>>;
    /// All reviewers ordered by id.
    fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>>;
    fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> RepoResult<Vec<Review>>;
    fn create_reviewer(&self, reviewer: &Reviewer) -> RepoResult<EntityId>;
    fn update_reviewer(&self, reviewer: &Reviewer) -> RepoResult<()>;
    fn delete_reviewer(&self, id: EntityId) -> RepoResult<()>;
}

pub struct SqliteReviewerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReviewerRepository for SqliteReviewerRepository<'_> {
    fn reviewer_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "reviewers", id)
    }

    fn get_reviewer(&self, id: EntityId) -> RepoResult<Option<Reviewer>> {
        query_one(
            self.conn,
            "SELECT id, first_name, last_name FROM reviewers WHERE id = ?1;",
            [id],
            parse_reviewer_row,
        )
    }

    fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>> {
        query_all(
            self.conn,
            "SELECT id, first_name, last_name FROM reviewers ORDER BY id ASC;",
            [],
            parse_reviewer_row,
        )
    }

    fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> RepoResult<Vec<Review>> {
        query_all(
            self.conn,
            &format!(
                "SELECT {REVIEW_COLUMNS} FROM reviews WHERE reviewer_id = ?1 ORDER BY id ASC;"
            ),
            [reviewer_id],
            parse_review_row,
        )
    }

    fn create_reviewer(&self, reviewer: &Reviewer) -> RepoResult<EntityId> {
        reviewer.validate()?;

        let mut uow = UnitOfWork::begin(self.conn)?;
        let id = uow
            .insert(
                "INSERT INTO reviewers (first_name, last_name) VALUES (?1, ?2);",
                params![reviewer.first_name.as_str(), reviewer.last_name.as_str()],
            )
            .map_err(|err| RepoError::from_write(ENTITY, err))?;
        commit_expecting_rows(uow, ENTITY)?;
        Ok(id)
    }

    fn update_reviewer(&self, reviewer: &Reviewer) -> RepoResult<()> {
        reviewer.validate()?;

        write_single_row(
            self.conn,
            ENTITY,
            reviewer.id,
            "UPDATE reviewers SET first_name = ?1, last_name = ?2 WHERE id = ?3;",
            params![
                reviewer.first_name.as_str(),
                reviewer.last_name.as_str(),
                reviewer.id,
            ],
        )
    }

    fn delete_reviewer(&self, id: EntityId) -> RepoResult<()> {
        write_single_row(
            self.conn,
            ENTITY,
            id,
            "DELETE FROM reviewers WHERE id = ?1;",
            [id],
        )
    }
}

fn parse_reviewer_row(row: &Row<'_>) -> rusqlite::Result<Reviewer> {
    Ok(Reviewer {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}
