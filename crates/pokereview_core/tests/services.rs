use chrono::NaiveDate;
use pokereview_core::db::open_db_in_memory;
use pokereview_core::{
    CategoryDto, CategoryService, CountryDto, CountryService, OwnerDto, OwnerService, PokemonDto,
    PokemonService, ReviewDto, ReviewService, ReviewerDto, ReviewerService, ServiceError,
    SqliteCategoryRepository, SqliteCountryRepository, SqliteOwnerRepository,
    SqlitePokemonRepository, SqliteReviewRepository, SqliteReviewerRepository,
};
use rusqlite::Connection;

#[test]
fn create_then_get_returns_the_input_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::new(&conn));

    let id = service.create_category(category("Electric")).unwrap();
    let loaded = service.get_category(id).unwrap();
    assert_eq!(
        loaded,
        CategoryDto {
            id,
            name: "Electric".to_string()
        }
    );
}

#[test]
fn duplicate_name_is_conflict_and_inserts_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = CountryService::new(SqliteCountryRepository::new(&conn));

    service.create_country(country("Kanto")).unwrap();
    let err = service.create_country(country("  kANTO ")).unwrap_err();

    assert_eq!(err, ServiceError::Conflict("Country Already Exists".to_string()));
    assert_eq!(service.list_countries().unwrap().len(), 1);
}

#[test]
fn update_with_mismatched_id_is_validation_and_mutates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::new(&conn));
    let id = service.create_category(category("Fire")).unwrap();

    let err = service
        .update_category(
            id,
            CategoryDto {
                id: id + 1,
                name: "Lava".to_string(),
            },
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(service.get_category(id).unwrap().name, "Fire");
}

#[test]
fn missing_entities_are_not_found_on_get_update_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewerService::new(
        SqliteReviewerRepository::new(&conn),
        SqliteReviewRepository::new(&conn),
    );

    assert!(matches!(service.get_reviewer(9), Err(ServiceError::NotFound(_))));
    assert!(matches!(
        service.update_reviewer(9, reviewer(9, "Gary", "Oak")),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(service.delete_reviewer(9), Err(ServiceError::NotFound(_))));
    assert!(matches!(
        service.reviews_by_reviewer(9),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn blank_required_field_is_validation() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewerService::new(
        SqliteReviewerRepository::new(&conn),
        SqliteReviewRepository::new(&conn),
    );

    let err = service.create_reviewer(reviewer(0, "Gary", " ")).unwrap_err();
    assert_eq!(
        err.messages(),
        vec!["The lastName field of Reviewer is required.".to_string()]
    );
    assert!(service.list_reviewers().unwrap().is_empty());
}

#[test]
fn owner_update_keeps_country_and_country_delete_with_owners_fails() {
    let conn = open_db_in_memory().unwrap();
    let countries = CountryService::new(SqliteCountryRepository::new(&conn));
    let owners = OwnerService::new(SqliteOwnerRepository::new(&conn));

    let kanto = countries.create_country(country("Kanto")).unwrap();
    let ash = owners.create_owner(kanto, owner(0, "Ketchum")).unwrap();
    owners
        .update_owner(
            ash,
            OwnerDto {
                gym: "Viridian".to_string(),
                ..owner(ash, "Ketchum")
            },
        )
        .unwrap();

    assert_eq!(owners.get_owner(ash).unwrap().gym, "Viridian");
    assert_eq!(countries.country_of_owner(ash).unwrap().id, kanto);

    let err = countries.delete_country(kanto).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Persistence(vec!["Something Went Wrong".to_string()])
    );
}

#[test]
fn owner_with_unknown_country_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let owners = OwnerService::new(SqliteOwnerRepository::new(&conn));

    let err = owners.create_owner(12, owner(0, "Ketchum")).unwrap_err();
    assert_eq!(err, ServiceError::NotFound("Country 12 not found".to_string()));
}

#[test]
fn pokemon_and_review_flow_through_services() {
    let conn = open_db_in_memory().unwrap();
    let (owner_id, category_id) = seed_owner_and_category(&conn);
    let pokemon = pokemon_service(&conn);
    let reviewers = ReviewerService::new(
        SqliteReviewerRepository::new(&conn),
        SqliteReviewRepository::new(&conn),
    );
    let reviews = ReviewService::new(SqliteReviewRepository::new(&conn));

    let pikachu = pokemon
        .create_pokemon(owner_id, category_id, pokemon_dto(0, "Pikachu"))
        .unwrap();
    let duplicate = pokemon
        .create_pokemon(owner_id, category_id, pokemon_dto(0, "pikachu"))
        .unwrap_err();
    assert_eq!(duplicate, ServiceError::Conflict("Pokemon Already Exists".to_string()));

    let gary = reviewers.create_reviewer(reviewer(0, "Gary", "Oak")).unwrap();
    let review_id = reviews
        .create_review(gary, pikachu, review_dto(0, "Zappy", 5))
        .unwrap();
    reviews
        .create_review(gary, pikachu, review_dto(0, "Noisy", 2))
        .unwrap();
    assert_eq!(pokemon.pokemon_rating(pikachu).unwrap(), 3.5);

    reviews
        .update_review(review_id, review_dto(review_id, "Zappy", 3))
        .unwrap();
    assert_eq!(reviews.get_review(review_id).unwrap().rating, 3);
    assert_eq!(reviews.reviews_of_pokemon(pikachu).unwrap().len(), 2);
    assert_eq!(pokemon.pokemon_rating(pikachu).unwrap(), 2.5);

    pokemon.delete_pokemon(pikachu).unwrap();
    assert!(reviews.list_reviews().unwrap().is_empty());
    assert!(matches!(
        pokemon.pokemon_rating(pikachu),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn category_lists_its_pokemon() {
    let conn = open_db_in_memory().unwrap();
    let (owner_id, category_id) = seed_owner_and_category(&conn);
    let pokemon = pokemon_service(&conn);
    let categories = CategoryService::new(SqliteCategoryRepository::new(&conn));

    pokemon
        .create_pokemon(owner_id, category_id, pokemon_dto(0, "Pikachu"))
        .unwrap();
    pokemon
        .create_pokemon(owner_id, category_id, pokemon_dto(0, "Jolteon"))
        .unwrap();

    let names = categories
        .pokemon_by_category(category_id)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Pikachu", "Jolteon"]);
}

#[test]
fn pokemon_by_missing_category_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let categories = CategoryService::new(SqliteCategoryRepository::new(&conn));

    let err = categories.pokemon_by_category(999).unwrap_err();
    assert_eq!(err, ServiceError::NotFound("Category 999 not found".to_string()));
}

fn pokemon_service(
    conn: &Connection,
) -> PokemonService<SqlitePokemonRepository<'_>, SqliteReviewRepository<'_>> {
    PokemonService::new(
        SqlitePokemonRepository::new(conn),
        SqliteReviewRepository::new(conn),
    )
}

fn seed_owner_and_category(conn: &Connection) -> (i64, i64) {
    let kanto = CountryService::new(SqliteCountryRepository::new(conn))
        .create_country(country("Kanto"))
        .unwrap();
    let owner_id = OwnerService::new(SqliteOwnerRepository::new(conn))
        .create_owner(kanto, owner(0, "Ketchum"))
        .unwrap();
    let category_id = CategoryService::new(SqliteCategoryRepository::new(conn))
        .create_category(category("Electric"))
        .unwrap();
    (owner_id, category_id)
}

fn category(name: &str) -> CategoryDto {
    CategoryDto {
        id: 0,
        name: name.to_string(),
    }
}

fn country(name: &str) -> CountryDto {
    CountryDto {
        id: 0,
        name: name.to_string(),
    }
}

fn owner(id: i64, last_name: &str) -> OwnerDto {
    OwnerDto {
        id,
        first_name: "Ash".to_string(),
        last_name: last_name.to_string(),
        gym: "Pallet".to_string(),
    }
}

fn reviewer(id: i64, first_name: &str, last_name: &str) -> ReviewerDto {
    ReviewerDto {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

fn pokemon_dto(id: i64, name: &str) -> PokemonDto {
    PokemonDto {
        id,
        name: name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1996, 2, 27)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

fn review_dto(id: i64, title: &str, rating: i32) -> ReviewDto {
    ReviewDto {
        id,
        title: title.to_string(),
        text: "Seen in the wild".to_string(),
        rating,
    }
}
