//! Category repository contract and SQLite implementation.

use crate::db::UnitOfWork;
use crate::model::category::Category;
use crate::model::pokemon::Pokemon;
use crate::model::EntityId;
use crate::repo::pokemon_repo::parse_pokemon_row;
use crate::repo::{
    commit_expecting_rows, query_all, query_one, row_exists, write_single_row, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "Category";

pub trait CategoryRepository {
    fn category_exists(&self, id: EntityId) -> RepoResult<bool>;
    fn get_category(&self, id: EntityId) -> RepoResult<Option<Category>>;
    /// All categories ordered by id.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Pokemon linked to the category through `pokemon_categories`.
    fn pokemon_by_category(&self, category_id: EntityId) -> RepoResult<Vec<Pokemon>>;
    fn create_category(&self, category: &Category) -> RepoResult<EntityId>;
    fn update_category(&self, category: &Category) -> RepoResult<()>;
    fn delete_category(&self, id: EntityId) -> RepoResult<()>;
}

pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn category_exists(&self, id: EntityId) -> RepoResult<bool> {
        row_exists(self.conn, "categories", id)
    }

    fn get_category(&self, id: EntityId) -> RepoResult<Option<Category>> {
        query_one(
            self.conn,
            "SELECT id, name FROM categories WHERE id = ?1;",
            [id],
            parse_category_row,
        )
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        query_all(
            self.conn,
            "SELECT id, name FROM categories ORDER BY id ASC;",
            [],
            parse_category_row,
        )
    }

    fn pokemon_by_category(&self, category_id: EntityId) -> RepoResult<Vec<Pokemon>> {
        query_all(
            self.conn,
            "SELECT p.id, p.name, p.birth_date
             FROM pokemon_categories pc
             INNER JOIN pokemon p ON p.id = pc.pokemon_id
             WHERE pc.category_id = ?1
             ORDER BY p.id ASC;",
            [category_id],
            parse_pokemon_row,
        )
    }

    fn create_category(&self, category: &Category) -> RepoResult<EntityId> {
        category.validate()?;

        let mut uow = UnitOfWork::begin(self.conn)?;
        let id = uow
            .insert(
                "INSERT INTO categories (name) VALUES (?1);",
                [category.name.as_str()],
            )
            .map_err(|err| RepoError::from_write(ENTITY, err))?;
        commit_expecting_rows(uow, ENTITY)?;
        Ok(id)
    }

    fn update_category(&self, category: &Category) -> RepoResult<()> {
        category.validate()?;

        write_single_row(
            self.conn,
            ENTITY,
            category.id,
            "UPDATE categories SET name = ?1 WHERE id = ?2;",
            params![category.name.as_str(), category.id],
        )
    }

    fn delete_category(&self, id: EntityId) -> RepoResult<()> {
        write_single_row(
            self.conn,
            ENTITY,
            id,
            "DELETE FROM categories WHERE id = ?1;",
            [id],
        )
    }
}

fn parse_category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
