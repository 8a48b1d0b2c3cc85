//! Tests for the single structural deletion policy: every child table
//! cascades to its owning parent, so deleting a listing or a user never
//! leaves orphan rows and never needs per-endpoint cleanup code.

use sqlx::PgPool;

use kitab_db::models::condition::NewConditionScore;
use kitab_db::models::listing::NewListing;
use kitab_db::models::user::NewUser;
use kitab_db::repositories::{ConditionRepo, FavoriteRepo, ListingRepo, UserRepo};

async fn seed_user(pool: &PgPool, tag: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &NewUser {
            email: format!("{tag}@example.test"),
            username: tag.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            first_name: None,
            last_name: None,
            university: None,
            phone_number: None,
        },
    )
    .await
    .unwrap();
    user.id
}

async fn seed_listing(pool: &PgPool, seller_id: i64) -> i64 {
    let listing = ListingRepo::create(
        pool,
        &NewListing {
            seller_id,
            title: "Linear Algebra Done Right".to_string(),
            author: Some("Axler".to_string()),
            isbn: None,
            description: None,
            price: 1500.0,
            declared_condition: "good".to_string(),
        },
    )
    .await
    .unwrap();
    listing.id
}

fn blank_score(listing_id: i64) -> NewConditionScore {
    NewConditionScore {
        listing_id,
        page_no_missing: true,
        page_no_torn: true,
        page_clean: true,
        page_score: 100.0,
        binding_no_loose: false,
        binding_no_falling: false,
        binding_stable: false,
        binding_score: 0.0,
        cover_no_detachment: false,
        cover_clean: false,
        cover_no_scratches: false,
        cover_score: 0.0,
        damage_no_burns: false,
        damage_no_smell: false,
        damage_no_insects: false,
        damage_score: 0.0,
        accessories_complete: false,
        accessories_content: false,
        accessories_extras: false,
        accessories_score: 0.0,
        overall_score: 25.0,
        condition_label: "Worn".to_string(),
        market_price: None,
        suggested_price: None,
        has_photos: false,
        photo_urls: None,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn deleting_a_listing_removes_its_condition_score_and_favorites(pool: PgPool) {
    let seller = seed_user(&pool, "seller1").await;
    let buyer = seed_user(&pool, "buyer1").await;
    let listing = seed_listing(&pool, seller).await;

    ConditionRepo::upsert(&pool, &blank_score(listing)).await.unwrap();
    assert!(FavoriteRepo::add(&pool, buyer, listing).await.unwrap());

    assert!(ListingRepo::delete(&pool, listing).await.unwrap());

    assert!(ConditionRepo::find_by_listing(&pool, listing)
        .await
        .unwrap()
        .is_none());
    assert!(FavoriteRepo::list_for_user(&pool, buyer)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn deleting_a_user_removes_their_listings(pool: PgPool) {
    let seller = seed_user(&pool, "seller2").await;
    let listing = seed_listing(&pool, seller).await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(seller)
        .execute(&pool)
        .await
        .unwrap();

    assert!(ListingRepo::find_by_id(&pool, listing)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn condition_upsert_replaces_the_row_for_a_listing(pool: PgPool) {
    let seller = seed_user(&pool, "seller3").await;
    let listing = seed_listing(&pool, seller).await;

    let first = ConditionRepo::upsert(&pool, &blank_score(listing)).await.unwrap();

    let mut second = blank_score(listing);
    second.damage_no_burns = true;
    second.damage_no_smell = true;
    second.damage_no_insects = true;
    second.damage_score = 100.0;
    second.overall_score = 50.0;
    second.condition_label = "Acceptable condition".to_string();
    let replaced = ConditionRepo::upsert(&pool, &second).await.unwrap();

    // Same row, fully replaced values.
    assert_eq!(replaced.id, first.id);
    assert_eq!(replaced.damage_score, 100.0);
    assert_eq!(replaced.overall_score, 50.0);
    assert_eq!(replaced.condition_label, "Acceptable condition");

    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM condition_scores WHERE listing_id = $1")
            .bind(listing)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count.0, 1);
}
