//! Applies every resource migration to a live Postgres and round-trips one
//! record per table. Runs only when `TEST_DATABASE_URL` is set.

use bookrec_app::build_registry;
use bookrec_app::modules::{
    authors::models::Author, books::models::Book, genres::models::Genre,
    libraries::models::Library, recommendations::models::Recommendation,
    user_interactions::models::UserInteraction,
};
use bookrec_db::{Database, Entity};
use bookrec_kernel::settings::Settings;
use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use sqlx::postgres::PgPoolOptions;

async fn setup() -> Option<Database> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    Some(Database::Postgres(pool))
}

async fn round_trip<E: Entity + std::fmt::Debug + PartialEq>(db: &Database, record: E) {
    let repo = db.repository::<E>();
    repo.delete(record.id()).await.unwrap();

    repo.create(&record).await.unwrap();
    assert_eq!(repo.get(record.id()).await.unwrap(), record, "{}", E::TABLE);

    if let Some(user_id) = record.owner_id() {
        let owned = repo.list_by_user(user_id).await.unwrap();
        assert!(owned.contains(&record), "{}", E::TABLE);
    }

    assert_eq!(repo.delete(record.id()).await.unwrap(), 1);
}

fn at(micros: i64) -> DateTime<Utc> {
    Utc.timestamp_micros(micros).unwrap().trunc_subsecs(6)
}

#[tokio::test]
async fn resource_tables_store_every_field() {
    let Some(db) = setup().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let registry = build_registry(&db, &Settings::default());

    db.migrate(&registry.collect_migrations()).await.unwrap();
    assert_eq!(db.migrate(&registry.collect_migrations()).await.unwrap(), 0);

    round_trip(
        &db,
        Book {
            id: "test-b1".into(),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            isbn: "9780441013593".into(),
            description: "Desert planet".into(),
            cover_image_url: "http://x/y.jpg".into(),
            genre: "Sci-Fi".into(),
            publication_year: 1965,
        },
    )
    .await;
    round_trip(
        &db,
        Author {
            id: "test-a1".into(),
            name: "Frank Herbert".into(),
            biography: "Tacoma".into(),
        },
    )
    .await;
    round_trip(
        &db,
        Genre {
            id: "test-g1".into(),
            name: "Sci-Fi".into(),
        },
    )
    .await;
    round_trip(
        &db,
        Library {
            id: "test-l1".into(),
            name: "Central".into(),
            address: "1 Main St".into(),
            latitude: 40.712_8,
            longitude: -74.006,
        },
    )
    .await;
    round_trip(
        &db,
        UserInteraction {
            id: "test-i1".into(),
            user_id: "test-u1".into(),
            book_id: "test-b1".into(),
            interaction_type: "view".into(),
            timestamp: at(1_709_632_800_123_456),
        },
    )
    .await;
    round_trip(
        &db,
        Recommendation {
            id: "test-r1".into(),
            user_id: "test-u1".into(),
            book_id: "test-b1".into(),
            score: 0.87,
            generated_at: at(1_704_067_200_654_321),
        },
    )
    .await;
}

#[tokio::test]
async fn omitted_columns_take_their_defaults() {
    let Some(db) = setup().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let registry = build_registry(&db, &Settings::default());
    db.migrate(&registry.collect_migrations()).await.unwrap();

    let Database::Postgres(pool) = &db else {
        unreachable!()
    };
    sqlx::query("DELETE FROM user_interactions WHERE id = 'test-i2'")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO user_interactions (id) VALUES ('test-i2')")
        .execute(pool)
        .await
        .unwrap();

    let repo = db.repository::<UserInteraction>();
    let stored = repo.get("test-i2").await.unwrap();
    assert_eq!(stored.timestamp, DateTime::<Utc>::default());
    assert_eq!(stored.interaction_type, "");
    repo.delete("test-i2").await.unwrap();
}
