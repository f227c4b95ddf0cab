use pokereview_core::db::open_db_in_memory;
use pokereview_core::model::category::Category;
use pokereview_core::model::owner::{Country, Owner};
use pokereview_core::model::ModelValidationError;
use pokereview_core::{
    CategoryRepository, CountryRepository, OwnerRepository, RepoError, SqliteCategoryRepository,
    SqliteCountryRepository, SqliteOwnerRepository,
};

#[test]
fn category_create_get_update_delete_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::new(&conn);

    let id = repo.create_category(&Category::new("Electric")).unwrap();
    let loaded = repo.get_category(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Electric");

    let renamed = Category {
        id,
        name: "Thunder".to_string(),
    };
    repo.update_category(&renamed).unwrap();
    assert_eq!(repo.get_category(id).unwrap().unwrap(), renamed);

    repo.delete_category(id).unwrap();
    assert!(!repo.category_exists(id).unwrap());
    assert!(repo.get_category(id).unwrap().is_none());
}

#[test]
fn categories_are_listed_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::new(&conn);

    for name in ["Water", "Fire", "Grass"] {
        repo.create_category(&Category::new(name)).unwrap();
    }

    let names = repo
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|category| category.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Water", "Fire", "Grass"]);
}

#[test]
fn blank_category_name_is_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::new(&conn);

    let err = repo.create_category(&Category::new("   ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::BlankField {
            entity: "Category",
            field: "name"
        })
    ));
    assert!(repo.list_categories().unwrap().is_empty());
}

#[test]
fn updating_or_deleting_missing_category_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::new(&conn);

    let ghost = Category {
        id: 77,
        name: "Ghost".to_string(),
    };
    assert!(matches!(
        repo.update_category(&ghost).unwrap_err(),
        RepoError::NotFound { entity: "Category", id: 77 }
    ));
    assert!(matches!(
        repo.delete_category(77).unwrap_err(),
        RepoError::NotFound { entity: "Category", id: 77 }
    ));
}

#[test]
fn country_roundtrip_and_owner_lookups() {
    let conn = open_db_in_memory().unwrap();
    let countries = SqliteCountryRepository::new(&conn);
    let owners = SqliteOwnerRepository::new(&conn);

    let kanto = countries.create_country(&Country::new("Kanto")).unwrap();
    let johto = countries.create_country(&Country::new("Johto")).unwrap();
    let ash = owners.create_owner(&owner("Ash", "Ketchum", kanto)).unwrap();
    owners.create_owner(&owner("Misty", "Waterflower", kanto)).unwrap();

    assert_eq!(countries.country_of_owner(ash).unwrap().unwrap().name, "Kanto");
    assert!(countries.country_of_owner(999).unwrap().is_none());

    let in_kanto = countries.owners_by_country(kanto).unwrap();
    assert_eq!(in_kanto.len(), 2);
    assert!(in_kanto.iter().all(|item| item.country_id == kanto));
    assert!(countries.owners_by_country(johto).unwrap().is_empty());
}

#[test]
fn deleting_country_with_owners_is_rejected_by_store() {
    let conn = open_db_in_memory().unwrap();
    let countries = SqliteCountryRepository::new(&conn);
    let owners = SqliteOwnerRepository::new(&conn);

    let kanto = countries.create_country(&Country::new("Kanto")).unwrap();
    owners.create_owner(&owner("Ash", "Ketchum", kanto)).unwrap();

    let err = countries.delete_country(kanto).unwrap_err();
    assert!(matches!(err, RepoError::Constraint { entity: "Country", .. }));
    assert!(countries.country_exists(kanto).unwrap());
}

fn owner(first_name: &str, last_name: &str, country_id: i64) -> Owner {
    Owner {
        id: 0,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gym: "Pallet".to_string(),
        country_id,
    }
}
