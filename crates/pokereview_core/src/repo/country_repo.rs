//! Country repository contract and SQLite implementation.
//!
//! # Invariants
//! - A country still referenced by owners cannot be deleted; the store
//!   rejects it and the outcome is `RepoError::Constraint`.

use crate::db::UnitOfWork;
use crate::model::owner::{Country, Owner};
use crate::model::EntityId;
use crate::repo::owner_repo::parse_owner_row;
use crate::repo::{
    commit_expecting_rows, query_all, query_one, row_exists, write_single_row, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "Country";

pub trait CountryRepository {
    fn country_exists(&self, id: EntityId) -> RepoResult<bool>;
    fn get_country(&self, id: EntityId) -> RepoResult<Option<Country>>;
    /// All countries ordered by id.
    fn list_countries(&self) -> RepoResult<Vec<Country>>;
    /// Country of the given owner, `None` when the owner does not exist.
    fn country_of_owner(&self, owner_id: EntityId) -> RepoResult<Option<Country>>;
    fn owners_by_country(&self, country_id: EntityId) -> RepoResult<Vec<Owner>>;
    fn create_country(&self, country: &Country) -> RepoResult<EntityId>;
    fn update_country(&self, country: &Country) -> RepoResult<()>;
    fn delete_country(&self, id: EntityId) -> RepoResult<()>;
}

pub struct SqliteCountryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCountryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CountryRepository for SqliteCountryRepository<'_> {
    fn country_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "countries", id)
    }

    fn get_country(&self, id: EntityId) -> RepoResult<Option<Country>> {
        query_one(
            self.conn,
            "SELECT id, name FROM countries WHERE id = ?1;",
            [id],
            parse_country_row,
        )
    }

    fn list_countries(&self) -> RepoResult<Vec<Country>> {
        query_all(
            self.conn,
            "SELECT id, name FROM countries ORDER BY id ASC;",
            [],
            parse_country_row,
        )
    }

    fn country_of_owner(&self, owner_id: EntityId) -> RepoResult<Option<Country>> {
        query_one(
            self.conn,
            "SELECT c.id, c.name
             FROM owners o
             INNER JOIN countries c ON c.id = o.country_id
             WHERE o.id = ?1;",
            [owner_id],
            parse_country_row,
        )
    }

    fn owners_by_country(&self, country_id: EntityId) -> RepoResult<Vec<Owner>> {
        query_all(
            self.conn,
            "SELECT id, first_name, last_name, gym, country_id
             FROM owners
             WHERE country_id = ?1
             ORDER BY id ASC;",
            [country_id],
            parse_owner_row,
        )
    }

    fn create_country(&self, country: &Country) -> RepoResult<EntityId> {
        country.validate()?;

        let mut uow = UnitOfWork::begin(self.conn)?;
        let id = uow
            .insert(
                "INSERT INTO countries (name) VALUES (?1);",
                [country.name.as_str()],
            )
            .map_err(|err| RepoError::from_write(ENTITY, err))?;
        commit_expecting_rows(uow, ENTITY)?;
        Ok(id)
    }

    fn update_country(&self, country: &Country) -> RepoResult<()> {
        country.validate()?;

        write_single_row(
            self.conn,
            ENTITY,
            country.id,
            "UPDATE countries SET name = ?1 WHERE id = ?2;",
            params![country.name.as_str(), country.id],
        )
    }

    fn delete_country(&self, id: EntityId) -> RepoResult<()> {
        write_single_row(
            self.conn,
            ENTITY,
            id,
            "DELETE FROM countries WHERE id = ?1;",
            [id],
        )
    }
}

fn parse_country_row(row: &Row<'_>) -> rusqlite::Result<Country> {
    Ok(Country {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
