//! Repository for the `listings` table.

use sqlx::{PgPool, QueryBuilder};

use kitab_core::types::DbId;

use crate::models::listing::{Listing, ListingFilter, NewListing, UpdateListing};

/// Column list for `listings` queries.
const COLUMNS: &str = "id, seller_id, title, author, isbn, description, price, \
     declared_condition, status, created_at, updated_at";

/// Provides CRUD operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing with status `active`, returning the full row.
    pub async fn create(pool: &PgPool, new: &NewListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings (seller_id, title, author, isbn, description, price, \
             declared_condition) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(new.seller_id)
            .bind(&new.title)
            .bind(&new.author)
            .bind(&new.isbn)
            .bind(&new.description)
            .bind(new.price)
            .bind(&new.declared_condition)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List listings matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ListingFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM listings WHERE TRUE"));

        if let Some(status) = &filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(seller_id) = filter.seller_id {
            qb.push(" AND seller_id = ").push_bind(seller_id);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR author ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(min_price) = filter.min_price {
            qb.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            qb.push(" AND price <= ").push_bind(max_price);
        }

        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        qb.build_query_as::<Listing>().fetch_all(pool).await
    }

    /// Update listing fields; `None` fields are left unchanged.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET \
             title = COALESCE($2, title), \
             author = COALESCE($3, author), \
             isbn = COALESCE($4, isbn), \
             description = COALESCE($5, description), \
             price = COALESCE($6, price), \
             declared_condition = COALESCE($7, declared_condition), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&update.title)
            .bind(&update.author)
            .bind(&update.isbn)
            .bind(&update.description)
            .bind(update.price)
            .bind(&update.declared_condition)
            .fetch_optional(pool)
            .await
    }

    /// Set the lifecycle status, returning the updated row.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing. Condition score, favorites, and ratings go with it
    /// via `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
