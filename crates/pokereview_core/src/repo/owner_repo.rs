//! Owner repository contract and SQLite implementation.
//!
//! # Invariants
//! - An owner is only inserted when its country exists.
//! - Deleting an owner removes its `pokemon_owners` links (store cascade);
//!   the pokemon themselves are kept.

use crate::db::UnitOfWork;
use crate::model::owner::Owner;
use crate::model::pokemon::Pokemon;
use crate::model::EntityId;
use crate::repo::pokemon_repo::parse_pokemon_row;
use crate::repo::{
    commit_expecting_rows, query_all, query_one, require_row, row_exists, write_single_row, RepoError,
    RepoResult,
};
use log::info;
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "Owner";

pub trait OwnerRepository {
    fn owner_exists(&self, id: EntityId) -> RepoResult<bool>;
    fn get_owner(&self, id: EntityId) -> RepoResult<Option<Owner>>;
    /// All owners ordered by id.
    fn list_owners(&self) -> RepoResult<Vec<Owner>>;
    /// Pokemon linked to the owner through `pokemon_owners`.
    fn pokemon_by_owner(&self, owner_id: EntityId) -> RepoResult<Vec<Pokemon>>;
    /// Owners linked to the pokemon through `pokemon_owners`.
    fn owners_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Owner>>;
    /// Inserts the owner; `owner.country_id` must reference a country.
    fn create_owner(&self, owner: &Owner) -> RepoResult<EntityId>;
    fn update_owner(&self, owner: &Owner) -> RepoResult<()>;
    fn delete_owner(&self, id: EntityId) -> RepoResult<()>;
}

pub struct SqliteOwnerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOwnerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl OwnerRepository for SqliteOwnerRepository<'_> {
    fn owner_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "owners", id)
    }

    fn get_owner(&self, id: EntityId) -> RepoResult<Option<Owner>> {
        query_one(
            self.conn,
            "SELECT id, first_name, last_name, gym, country_id FROM owners WHERE id = ?1;",
            [id],
            parse_owner_row,
        )
    }

    fn list_owners(&self) -> RepoResult<Vec<Owner>> {
        query_all(
            self.conn,
            "SELECT id, first_name, last_name, gym, country_id FROM owners ORDER BY id ASC;",
            [],
            parse_owner_row,
        )
    }

    fn pokemon_by_owner(&self, owner_id: EntityId) -> RepoResult<Vec<Pokemon>> {
        query_all(
            self.conn,
            "SELECT p.id, p.name, p.birth_date
             FROM pokemon_owners po
             INNER JOIN pokemon p ON p.id = po.pokemon_id
             WHERE po.owner_id = ?1
             ORDER BY p.id ASC;",
            [owner_id],
            parse_pokemon_row,
        )
    }

    fn owners_of_pokemon(&self, pokemon_id: EntityId) -> RepoResult<Vec<Owner>> {
        query_all(
            self.conn,
            "SELECT o.id, o.first_name, o.last_name, o.gym, o.country_id
             FROM pokemon_owners po
             INNER JOIN owners o ON o.id = po.owner_id
             WHERE po.pokemon_id = ?1
             ORDER BY o.id ASC;",
            [pokemon_id],
            parse_owner_row,
        )
    }

    fn create_owner(&self, owner: &Owner) -> RepoResult<EntityId> {
        owner.validate()?;

        let mut uow = UnitOfWork::begin(self.conn)?;
        require_row(uow.connection(), "countries", "Country", owner.country_id)?;
        let id = uow
            .insert(
                "INSERT INTO owners (first_name, last_name, gym, country_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    owner.first_name.as_str(),
                    owner.last_name.as_str(),
                    owner.gym.as_str(),
                    owner.country_id,
                ],
            )
            .map_err(|err| RepoError::from_write(ENTITY, err))?;
        commit_expecting_rows(uow, ENTITY)?;

        info!(
            "event=owner_create module=repo status=ok owner_id={} country_id={}",
            id, owner.country_id
        );
        Ok(id)
    }

    fn update_owner(&self, owner: &Owner) -> RepoResult<()> {
        owner.validate()?;

        write_single_row(
            self.conn,
            ENTITY,
            owner.id,
            "UPDATE owners
             SET first_name = ?1, last_name = ?2, gym = ?3, country_id = ?4
             WHERE id = ?5;",
            params![
                owner.first_name.as_str(),
                owner.last_name.as_str(),
                owner.gym.as_str(),
                owner.country_id,
                owner.id,
            ],
        )
    }

    fn delete_owner(&self, id: EntityId) -> RepoResult<()> {
        write_single_row(
            self.conn,
            ENTITY,
            id,
            "DELETE FROM owners WHERE id = ?1;",
            [id],
        )
    }
}

pub(crate) fn parse_owner_row(row: &Row<'_>) -> rusqlite::Result<Owner> {
    Ok(Owner {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        gym: row.get("gym")?,
        country_id: row.get("country_id")?,
    })
}
