//! Pokemon repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Pokemon CRUD plus the creation cascade that binds a new pokemon to one
//!   owner and one category.
//! - Average rating over the pokemon's reviews.
//!
//! # Invariants
//! - `create_pokemon` inserts the pokemon and both join rows in one unit of
//!   work: all three rows are committed or none.
//! - An unknown owner or category id fails the create with `NotFound`
//!   before anything is inserted.
//! - `delete_pokemon` does not touch reviews; callers remove them first.

use crate::db::UnitOfWork;
use crate::model::pokemon::{Pokemon, PokemonCategory, PokemonOwner};
use crate::model::EntityId;
use crate::repo::{
    commit_expecting_rows, query_all, query_one, require_row, row_exists, write_single_row, RepoError,
    RepoResult,
};
use log::info;
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "Pokemon";

pub trait PokemonRepository {
    fn pokemon_exists(&self, id: EntityId) -> RepoResult<bool>;
    fn get_pokemon(&self, id: EntityId) -> RepoResult<Option<Pokemon>>;
    /// All pokemon ordered by id.
    fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>>;
    /// Mean review rating, `0.0` when the pokemon has no reviews.
    fn pokemon_rating(&self, id: EntityId) -> RepoResult<f64>;
    fn owner_links(&self, pokemon_id: EntityId) -> RepoResult<Vec<PokemonOwner>>;
    fn category_links(&self, pokemon_id: EntityId) -> RepoResult<Vec<PokemonCategory>>;
    /// Inserts the pokemon linked to `owner_id` and `category_id`.
    fn create_pokemon(
        &self,
        owner_id: EntityId,
        category_id: EntityId,
        pokemon: &Pokemon,
    ) -> RepoResult<EntityId>;
    fn update_pokemon(&self, pokemon: &Pokemon) -> RepoResult<()>;
    fn delete_pokemon(&self, id: EntityId) -> RepoResult<()>;
}

pub struct SqlitePokemonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePokemonRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PokemonRepository for SqlitePokemonRepository<'_> {
    fn pokemon_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "pokemon", id)
    }

    fn get_pokemon(&self, id: EntityId) -> RepoResult<Option<Pokemon>> {
        query_one(
            self.conn,
            "SELECT id, name, birth_date FROM pokemon WHERE id = ?1;",
            [id],
            parse_pokemon_row,
        )
    }

    fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>> {
        query_all(
            self.conn,
            "SELECT id, name, birth_date FROM pokemon ORDER BY id ASC;",
            [],
            parse_pokemon_row,
        )
    }

    fn pokemon_rating(&self, id: EntityId) -> RepoResult<f64> {
        let (count, total): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(rating), 0) FROM reviews WHERE pokemon_id = ?1;",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(average_rating(count, total))
    }

    fn owner_links(&self, pokemon_id: EntityId) -> RepoResult<Vec<PokemonOwner>> {
        query_all(
            self.conn,
            "SELECT pokemon_id, owner_id FROM pokemon_owners
             WHERE pokemon_id = ?1
             ORDER BY owner_id ASC;",
            [pokemon_id],
            |row| {
                Ok(PokemonOwner {
                    pokemon_id: row.get("pokemon_id")?,
                    owner_id: row.get("owner_id")?,
                })
            },
        )
    }

    fn category_links(&self, pokemon_id: EntityId) -> RepoResult<Vec<PokemonCategory>> {
        query_all(
            self.conn,
            "SELECT pokemon_id, category_id FROM pokemon_categories
             WHERE pokemon_id = ?1
             ORDER BY category_id ASC;",
            [pokemon_id],
            |row| {
                Ok(PokemonCategory {
                    pokemon_id: row.get("pokemon_id")?,
                    category_id: row.get("category_id")?,
                })
            },
        )
    }

    fn create_pokemon(
        &self,
        owner_id: EntityId,
        category_id: EntityId,
        pokemon: &Pokemon,
    ) -> RepoResult<EntityId> {
        pokemon.validate()?;

        let mut uow = UnitOfWork::begin(self.conn)?;
        require_row(uow.connection(), "owners", "Owner", owner_id)?;
        require_row(uow.connection(), "categories", "Category", category_id)?;

        let pokemon_id = uow
            .insert(
                "INSERT INTO pokemon (name, birth_date) VALUES (?1, ?2);",
                params![pokemon.name.as_str(), pokemon.birth_date],
            )
            .map_err(|err| RepoError::from_write(ENTITY, err))?;
        link_owner(
            &mut uow,
            PokemonOwner {
                pokemon_id,
                owner_id,
            },
        )?;
        link_category(
            &mut uow,
            PokemonCategory {
                pokemon_id,
                category_id,
            },
        )?;
        let rows = commit_expecting_rows(uow, ENTITY)?;

        info!(
            "event=pokemon_create module=repo status=ok pokemon_id={} owner_id={} category_id={} rows_affected={}",
            pokemon_id, owner_id, category_id, rows
        );
        Ok(pokemon_id)
    }

    fn update_pokemon(&self, pokemon: &Pokemon) -> RepoResult<()> {
        pokemon.validate()?;

        write_single_row(
            self.conn,
            ENTITY,
            pokemon.id,
            "UPDATE pokemon SET name = ?1, birth_date = ?2 WHERE id = ?3;",
            params![pokemon.name.as_str(), pokemon.birth_date, pokemon.id],
        )
    }

    fn delete_pokemon(&self, id: EntityId) -> RepoResult<()> {
        write_single_row(
            self.conn,
            ENTITY,
            id,
            "DELETE FROM pokemon WHERE id = ?1;",
            [id],
        )
    }
}

fn link_owner(uow: &mut UnitOfWork<'_>, link: PokemonOwner) -> RepoResult<()> {
    uow.execute(
        "INSERT INTO pokemon_owners (pokemon_id, owner_id) VALUES (?1, ?2);",
        params![link.pokemon_id, link.owner_id],
    )
    .map_err(|err| RepoError::from_write("PokemonOwner", err))?;
    Ok(())
}

fn link_category(uow: &mut UnitOfWork<'_>, link: PokemonCategory) -> RepoResult<()> {
    uow.execute(
        "INSERT INTO pokemon_categories (pokemon_id, category_id) VALUES (?1, ?2);",
        params![link.pokemon_id, link.category_id],
    )
    .map_err(|err| RepoError::from_write("PokemonCategory", err))?;
    Ok(())
}

fn average_rating(count: i64, total: i64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

pub(crate) fn parse_pokemon_row(row: &Row<'_>) -> rusqlite::Result<Pokemon> {
    Ok(Pokemon {
        id: row.get("id")?,
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
    })
}

#[cfg(test)]
mod tests {
    use super::average_rating;

    #[test]
    fn average_rating_is_zero_without_reviews() {
        assert_eq!(average_rating(0, 0), 0.0);
    }

    #[test]
    fn average_rating_keeps_fraction() {
        assert_eq!(average_rating(3, 12), 4.0);
        assert_eq!(average_rating(2, 7), 3.5);
    }
}
