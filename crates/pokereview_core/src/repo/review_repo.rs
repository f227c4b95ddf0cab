//! Review repository contract and SQLite implementation.
//!
//! # Invariants
//! - A review is only inserted when both its reviewer and pokemon exist.
//! - `delete_reviews` removes a whole set in one unit of work; an empty set
//!   is a successful no-op.

use crate::db::UnitOfWork;
use crate::model::review::Review;
use crate::model::EntityId;
use crate::repo::{
    commit_expecting_rows, query_all, query_one, require_row, row_exists, write_single_row, RepoError,
    RepoResult,
};
use log::info;
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "Review";
pub(crate) const REVIEW_COLUMNS: &str = "id, title, text, rating, reviewer_id, pokemon_id";

pub trait ReviewRepository {
    fn review_exists(&self, id: EntityId) -> RepoResult<bool>;
    fn get_review(&self, id: EntityId) -> RepoResult<Option<Review>>;
    /// All reviews ordered by id.
    fn list_reviews(&self) -> RepoResult<Vec<Review>>;
    fn reviews_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Review>>;
    /// Inserts the review; its reviewer and pokemon must exist.
    fn create_review(&self, review: &Review) -> RepoResult<EntityId>;
    fn update_review(&self, review: &Review) -> RepoResult<()>;
    fn delete_review(&self, id: EntityId) -> RepoResult<()>;
    /// Deletes all given reviews in one commit and returns rows removed.
    fn delete_reviews(&self, ids: &[EntityId]) -> RepoResult<usize>;
}

pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn review_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "reviews", id)
    }

    fn get_review(&self, id: EntityId) -> RepoResult<Option<Review>> {
        query_one(
            self.conn,
            &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1;"),
            [id],
            parse_review_row,
        )
    }

    fn list_reviews(&self) -> RepoResult<Vec<Review>> {
        query_all(
            self.conn,
            &format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY id ASC;"),
            [],
            parse_review_row,
        )
    }

    fn reviews_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Review>> {
        query_all(
            self.conn,
            &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE pokemon_id = ?1 ORDER BY id ASC;"),
            [pokemon_id],
            parse_review_row,
        )
    }

    fn create_review(&self, review: &Review) -> RepoResult<EntityId> {
        review.validate()?;

        let mut uow = UnitOfWork::begin(self.conn)?;
        require_row(uow.connection(), "reviewers", "Reviewer", review.reviewer_id)?;
        require_row(uow.connection(), "pokemon", "Pokemon", review.pokemon_id)?;
        let id = uow
            .insert(
                "INSERT INTO reviews (title, text, rating, reviewer_id, pokemon_id)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    review.title.as_str(),
                    review.text.as_str(),
                    review.rating,
                    review.reviewer_id,
                    review.pokemon_id,
                ],
            )
            .map_err(|err| RepoError::from_write(ENTITY, err))?;
        commit_expecting_rows(uow, ENTITY)?;
        Ok(id)
    }

    fn update_review(&self, review: &Review) -> RepoResult<()> {
        review.validate()?;

        write_single_row(
            self.conn,
            ENTITY,
            review.id,
            "UPDATE reviews
             SET title = ?1, text = ?2, rating = ?3, reviewer_id = ?4, pokemon_id = ?5
             WHERE id = ?6;",
            params![
                review.title.as_str(),
                review.text.as_str(),
                review.rating,
                review.reviewer_id,
                review.pokemon_id,
                review.id,
            ],
        )
    }

    fn delete_review(&self, id: EntityId) -> RepoResult<()> {
        write_single_row(
            self.conn,
            ENTITY,
            id,
            "DELETE FROM reviews WHERE id = ?1;",
            [id],
        )
    }

    fn delete_reviews(&self, ids: &[EntityId]) -> RepoResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut uow = UnitOfWork::begin(self.conn)?;
        for id in ids {
            uow.execute("DELETE FROM reviews WHERE id = ?1;", [id])
                .map_err(|err| RepoError::from_write(ENTITY, err))?;
        }
        let rows = commit_expecting_rows(uow, ENTITY)?;

        info!(
            "event=reviews_delete module=repo status=ok requested={} rows_affected={}",
            ids.len(),
            rows
        );
        Ok(rows)
    }
}

pub(crate) fn parse_review_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get("id")?,
        title: row.get("title")?,
        text: row.get("text")?,
        rating: row.get("rating")?,
        reviewer_id: row.get("reviewer_id")?,
        pokemon_id: row.get("pokemon_id")?,
    })
}
