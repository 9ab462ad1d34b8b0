//! Database seeder for Shelfmark development and testing.
//!
//! Seeds a staff account, a reader account, and a starter catalog for
//! local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use shelfmark_core::auth::hash_password;
use shelfmark_db::entities::{books, sea_orm_active_enums::CoverType, users};
use std::str::FromStr;
use uuid::Uuid;

/// Staff user ID (consistent for all seeds)
const STAFF_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Reader user ID (consistent for all seeds)
const READER_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

/// Starter catalog: (id, title, author, cover, inventory, daily fee)
const BOOKS: [(&str, &str, &str, CoverType, i32, &str); 5] = [
    (
        "00000000-0000-0000-0000-000000000101",
        "The Pragmatic Programmer",
        "Andrew Hunt",
        CoverType::Hard,
        4,
        "1.50",
    ),
    (
        "00000000-0000-0000-0000-000000000102",
        "Clean Code",
        "Robert C. Martin",
        CoverType::Soft,
        6,
        "0.75",
    ),
    (
        "00000000-0000-0000-0000-000000000103",
        "The Rust Programming Language",
        "Steve Klabnik",
        CoverType::Soft,
        3,
        "1.25",
    ),
    (
        "00000000-0000-0000-0000-000000000104",
        "Designing Data-Intensive Applications",
        "Martin Kleppmann",
        CoverType::Hard,
        2,
        "2.00",
    ),
    (
        "00000000-0000-0000-0000-000000000105",
        "A Short History of Nearly Everything",
        "Bill Bryson",
        CoverType::Soft,
        5,
        "0.50",
    ),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = shelfmark_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding staff user...");
    seed_user(
        &db,
        STAFF_USER_ID,
        "admin@shelfmark.dev",
        "admin123",
        "Alex",
        "Admin",
        true,
    )
    .await;

    println!("Seeding reader user...");
    seed_user(
        &db,
        READER_USER_ID,
        "reader@shelfmark.dev",
        "reader123",
        "Robin",
        "Reader",
        false,
    )
    .await;

    println!("Seeding catalog...");
    seed_books(&db).await;

    println!("Seeding complete!");
}

/// Seeds one user if it does not already exist.
async fn seed_user(
    db: &DatabaseConnection,
    id: &str,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    is_staff: bool,
) {
    let user_id = Uuid::parse_str(id).unwrap();

    if users::Entity::find_by_id(user_id)
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  User {email} already exists, skipping...");
        return;
    }

    let password_hash = hash_password(password).expect("Failed to hash password");

    let user = users::ActiveModel {
        id: Set(user_id),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        is_staff: Set(is_staff),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert user {email}: {e}");
    } else {
        println!("  Created user: {email} (password: {password})");
    }
}

/// Seeds the starter catalog, skipping books that already exist.
async fn seed_books(db: &DatabaseConnection) {
    let mut inserted = 0;

    for (id, title, author, cover, inventory, daily_fee) in BOOKS {
        let book_id = Uuid::parse_str(id).unwrap();

        if books::Entity::find_by_id(book_id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Book '{title}' already exists, skipping...");
            continue;
        }

        let book = books::ActiveModel {
            id: Set(book_id),
            title: Set(title.to_string()),
            author: Set(author.to_string()),
            cover: Set(cover),
            inventory: Set(inventory),
            daily_fee: Set(Decimal::from_str(daily_fee).unwrap()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = book.insert(db).await {
            eprintln!("Failed to insert book '{title}': {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} books");
}
