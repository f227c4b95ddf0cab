use chrono::NaiveDate;
use pokereview_core::db::open_db_in_memory;
use pokereview_core::model::category::Category;
use pokereview_core::model::owner::{Country, Owner};
use pokereview_core::model::pokemon::{Pokemon, PokemonCategory, PokemonOwner};
use pokereview_core::model::review::{Review, Reviewer};
use pokereview_core::{
    CategoryRepository, CountryRepository, OwnerRepository, PokemonRepository, PokemonService,
    RepoError, ReviewRepository, ReviewerRepository, SqliteCategoryRepository,
    SqliteCountryRepository, SqliteOwnerRepository, SqlitePokemonRepository,
    SqliteReviewRepository, SqliteReviewerRepository,
};
use rusqlite::Connection;

struct Seed {
    owner_id: i64,
    category_id: i64,
    reviewer_id: i64,
}

#[test]
fn create_pokemon_writes_one_row_and_both_links() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqlitePokemonRepository::new(&conn);

    let id = repo
        .create_pokemon(seed.owner_id, seed.category_id, &pokemon("Pikachu"))
        .unwrap();

    assert_eq!(count(&conn, "pokemon"), 1);
    assert_eq!(
        repo.owner_links(id).unwrap(),
        vec![PokemonOwner {
            pokemon_id: id,
            owner_id: seed.owner_id
        }]
    );
    assert_eq!(
        repo.category_links(id).unwrap(),
        vec![PokemonCategory {
            pokemon_id: id,
            category_id: seed.category_id
        }]
    );

    let loaded = repo.get_pokemon(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Pikachu");
    assert_eq!(loaded.birth_date, pokemon("Pikachu").birth_date);
}

#[test]
fn create_pokemon_with_unknown_category_inserts_nothing() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqlitePokemonRepository::new(&conn);

    let err = repo
        .create_pokemon(seed.owner_id, 999, &pokemon("Eevee"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "Category", id: 999 }));

    let err = repo
        .create_pokemon(888, seed.category_id, &pokemon("Eevee"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "Owner", id: 888 }));

    assert_eq!(count(&conn, "pokemon"), 0);
    assert_eq!(count(&conn, "pokemon_owners"), 0);
    assert_eq!(count(&conn, "pokemon_categories"), 0);
}

#[test]
fn rating_is_zero_without_reviews_and_mean_otherwise() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqlitePokemonRepository::new(&conn);
    let id = repo
        .create_pokemon(seed.owner_id, seed.category_id, &pokemon("Pikachu"))
        .unwrap();

    assert_eq!(repo.pokemon_rating(id).unwrap(), 0.0);

    let reviews = SqliteReviewRepository::new(&conn);
    for (index, rating) in [5, 3, 4].into_iter().enumerate() {
        reviews
            .create_review(&review(&format!("Take {index}"), rating, seed.reviewer_id, id))
            .unwrap();
    }

    assert_eq!(repo.pokemon_rating(id).unwrap(), 4.0);
}

#[test]
fn deleting_pokemon_removes_its_reviews_and_links() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let pokemon_repo = SqlitePokemonRepository::new(&conn);
    let review_repo = SqliteReviewRepository::new(&conn);

    let pikachu = pokemon_repo
        .create_pokemon(seed.owner_id, seed.category_id, &pokemon("Pikachu"))
        .unwrap();
    let raichu = pokemon_repo
        .create_pokemon(seed.owner_id, seed.category_id, &pokemon("Raichu"))
        .unwrap();
    for title in ["Fast", "Loud", "Cute"] {
        review_repo
            .create_review(&review(title, 4, seed.reviewer_id, pikachu))
            .unwrap();
    }
    review_repo
        .create_review(&review("Big", 5, seed.reviewer_id, raichu))
        .unwrap();

    let service = PokemonService::new(
        SqlitePokemonRepository::new(&conn),
        SqliteReviewRepository::new(&conn),
    );
    service.delete_pokemon(pikachu).unwrap();

    assert!(!pokemon_repo.pokemon_exists(pikachu).unwrap());
    assert!(review_repo.reviews_of_pokemon(pikachu).unwrap().is_empty());
    assert!(pokemon_repo.owner_links(pikachu).unwrap().is_empty());
    assert!(pokemon_repo.category_links(pikachu).unwrap().is_empty());
    assert_eq!(review_repo.reviews_of_pokemon(raichu).unwrap().len(), 1);
}

#[test]
fn deleting_pokemon_without_reviews_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let id = SqlitePokemonRepository::new(&conn)
        .create_pokemon(seed.owner_id, seed.category_id, &pokemon("Mew"))
        .unwrap();

    let service = PokemonService::new(
        SqlitePokemonRepository::new(&conn),
        SqliteReviewRepository::new(&conn),
    );
    service.delete_pokemon(id).unwrap();
    assert_eq!(count(&conn, "pokemon"), 0);
}

#[test]
fn deleting_pokemon_row_directly_is_blocked_by_reviews() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed(&conn);
    let repo = SqlitePokemonRepository::new(&conn);
    let id = repo
        .create_pokemon(seed.owner_id, seed.category_id, &pokemon("Ditto"))
        .unwrap();
    SqliteReviewRepository::new(&conn)
        .create_review(&review("Blob", 2, seed.reviewer_id, id))
        .unwrap();

    let err = repo.delete_pokemon(id).unwrap_err();
    assert!(matches!(err, RepoError::Constraint { entity: "Pokemon", .. }));
    assert!(repo.pokemon_exists(id).unwrap());
}

fn seed(conn: &Connection) -> Seed {
    let country_id = SqliteCountryRepository::new(conn)
        .create_country(&Country::new("Kanto"))
        .unwrap();
    let owner_id = SqliteOwnerRepository::new(conn)
        .create_owner(&Owner {
            id: 0,
            first_name: "Ash".to_string(),
            last_name: "Ketchum".to_string(),
            gym: "Pallet".to_string(),
            country_id,
        })
        .unwrap();
    let category_id = SqliteCategoryRepository::new(conn)
        .create_category(&Category::new("Electric"))
        .unwrap();
    let reviewer_id = SqliteReviewerRepository::new(conn)
        .create_reviewer(&Reviewer::new("Gary", "Oak"))
        .unwrap();
    Seed {
        owner_id,
        category_id,
        reviewer_id,
    }
}

fn pokemon(name: &str) -> Pokemon {
    let born = NaiveDate::from_ymd_opt(1996, 2, 27)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    Pokemon::new(name, born)
}

fn review(title: &str, rating: i32, reviewer_id: i64, pokemon_id: i64) -> Review {
    Review {
        id: 0,
        title: title.to_string(),
        text: "Seen in the wild".to_string(),
        rating,
        reviewer_id,
        pokemon_id,
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}
