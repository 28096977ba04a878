use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use tinta_core::domain::{Post, User};
use tinta_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn user_model(username: &str, email: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id: Uuid::new_v4(),
        last_name: "Doe".to_owned(),
        first_name: "Jane".to_owned(),
        username: username.to_owned(),
        email: email.to_owned(),
        phone: "555-0100".to_owned(),
        city: "Springfield".to_owned(),
        date_of_birth: None,
        password_hash: "$argon2id$stub".to_owned(),
        avatar: None,
        about: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_model_into_domain() {
    let post_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            title: "Test Post".to_owned(),
            description: "Body".to_owned(),
            cover: "abc123.png".to_owned(),
            published_at: now.into(),
            user_id,
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let found = result.unwrap();
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.cover, "abc123.png");
    assert_eq!(found.id, post_id);
    assert_eq!(found.user_id, user_id);
}

#[tokio::test]
async fn find_post_by_id_absent_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn find_user_by_username_exact_match() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model("jane", "jane@example.com")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user: Option<User> = repo.find_by_username("jane").await.unwrap();
    assert_eq!(user.unwrap().email, "jane@example.com");
}

#[tokio::test]
async fn insert_user_round_trips_through_returning() {
    let model = user_model("jane", "jane@example.com");
    let domain: User = model.clone().into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let saved = repo.insert(domain).await.unwrap();
    assert_eq!(saved.username, "jane");
}

#[tokio::test]
async fn feed_preserves_descending_publication_order() {
    let user_id = Uuid::new_v4();
    let base = Utc::now();
    let mk = |title: &str, offset_hours: i64| post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        description: String::new(),
        cover: "c.png".to_owned(),
        published_at: (base - Duration::hours(offset_hours)).into(),
        user_id,
    };

    // The database applies ORDER BY published_at DESC; the repository must
    // hand the rows through untouched.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![mk("t3", 0), mk("t2", 1), mk("t1", 2)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_recent().await.unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["t3", "t2", "t1"]);
}

#[tokio::test]
async fn user_posts_listing_filters_and_orders() {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: Uuid::new_v4(),
            title: "Mine".to_owned(),
            description: "d".to_owned(),
            cover: "c.jpg".to_owned(),
            published_at: now.into(),
            user_id,
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_by_user_recent(user_id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].user_id, user_id);
}
