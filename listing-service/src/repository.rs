//! Repository for listing data

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use common::db::{self, DbPool};
use common::error::{Error, Result};
use common::model::listing::{Agent, Listing, NewListing, MAX_LISTING_ID};
use dashmap::DashMap;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::Row;
use tracing::{debug, info};

/// Listing repository trait defining the interface for the listing store
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Store a new listing; the store assigns its id
    async fn create_listing(&self, listing: NewListing) -> Result<Listing>;

    /// Get a listing by ID
    async fn get_listing(&self, id: i64) -> Result<Option<Listing>>;

    /// Get all listings, ordered by id
    async fn list_listings(&self) -> Result<Vec<Listing>>;

    /// Get listings flagged as featured, ordered by id
    async fn list_featured(&self) -> Result<Vec<Listing>>;

    /// Replace the editable fields of an existing listing
    async fn update_listing(&self, id: i64, listing: NewListing) -> Result<Listing>;

    /// Remove a listing
    async fn delete_listing(&self, id: i64) -> Result<()>;

    /// Insert or overwrite listings keyed by their id
    async fn upsert_listings(&self, listings: Vec<Listing>) -> Result<usize>;
}

/// In-memory repository for listing data
pub struct InMemoryListingRepository {
    /// Listings by ID
    pub listings: DashMap<i64, Listing>,
    /// Next id to hand out
    next_id: AtomicI64,
}

impl InMemoryListingRepository {
    /// Create a new in-memory listing repository
    pub fn new() -> Self {
        Self {
            listings: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn sorted(&self, keep: impl Fn(&Listing) -> bool) -> Vec<Listing> {
        let mut listings: Vec<Listing> = self.listings
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        listings.sort_by_key(|l| l.id);
        listings
    }
}

impl Default for InMemoryListingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn create_listing(&self, listing: NewListing) -> Result<Listing> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let listing = Listing::from_new(id, listing);
        self.listings.insert(id, listing.clone());
        Ok(listing)
    }

    async fn get_listing(&self, id: i64) -> Result<Option<Listing>> {
        Ok(self.listings.get(&id).map(|l| l.clone()))
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        Ok(self.sorted(|_| true))
    }

    async fn list_featured(&self) -> Result<Vec<Listing>> {
        Ok(self.sorted(|l| l.featured))
    }

    async fn update_listing(&self, id: i64, listing: NewListing) -> Result<Listing> {
        let mut entry = self.listings
            .get_mut(&id)
            .ok_or_else(|| Error::ListingNotFound(id.to_string()))?;
        entry.apply(listing);
        Ok(entry.clone())
    }

    async fn delete_listing(&self, id: i64) -> Result<()> {
        self.listings
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::ListingNotFound(id.to_string()))
    }

    async fn upsert_listings(&self, listings: Vec<Listing>) -> Result<usize> {
        check_explicit_ids(&listings)?;
        let count = listings.len();
        for listing in listings {
            // Keep the sequence ahead of explicitly numbered rows
            self.next_id.fetch_max(listing.id + 1, Ordering::SeqCst);
            self.listings.insert(listing.id, listing);
        }
        Ok(count)
    }
}

const LISTING_COLUMNS: &str = "id, title, description, price, images, location, address, beds, baths, \
     sqft, lot_size, year_built, property_type, status, features, agent, featured, created_at";

/// PostgreSQL repository for listing data
pub struct PostgresListingRepository {
    /// Database connection pool
    pool: DbPool,
}

impl PostgresListingRepository {
    /// Create a new PostgreSQL listing repository over an existing pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connect using the service configuration, migrating if asked to
    pub async fn with_config(config: &crate::config::ListingServiceConfig) -> Result<Self> {
        info!("Connecting to PostgreSQL database with pool size: {}", config.db_pool_size);

        let pool = db::init_db_pool(config.database_url.as_deref(), config.db_pool_size).await?;
        if config.run_migrations {
            db::run_migrations(&pool).await?;
            info!("Database migrations applied");
        }

        info!("Connected to PostgreSQL database");
        Ok(Self::new(pool))
    }
}

/// Explicit ids must lie in `1..=MAX_LISTING_ID` so the id sequence can
/// always move past them
fn check_explicit_ids(listings: &[Listing]) -> Result<()> {
    match listings.iter().find(|l| !(1..=MAX_LISTING_ID).contains(&l.id)) {
        Some(listing) => Err(Error::ValidationError(format!(
            "Listing id out of range: {}",
            listing.id
        ))),
        None => Ok(()),
    }
}

fn to_db_int(value: u32, field: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::ValidationError(format!("{} is out of range: {}", field, value)))
}

fn from_db_int(row: &PgRow, field: &str) -> Result<u32> {
    let value: i32 = row.try_get(field)?;
    u32::try_from(value)
        .map_err(|_| Error::Internal(format!("Invalid {} stored in database: {}", field, value)))
}

fn row_to_listing(row: &PgRow) -> Result<Listing> {
    let property_type: String = row.try_get("property_type")?;
    let status: String = row.try_get("status")?;
    let agent: Option<Json<Agent>> = row.try_get("agent")?;

    Ok(Listing {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        images: row.try_get("images")?,
        location: row.try_get("location")?,
        address: row.try_get("address")?,
        beds: from_db_int(row, "beds")?,
        baths: row.try_get("baths")?,
        sqft: from_db_int(row, "sqft")?,
        lot_size: row.try_get("lot_size")?,
        year_built: row.try_get("year_built")?,
        property_type: property_type.parse()?,
        status: status.parse()?,
        features: row.try_get("features")?,
        agent: agent.map(|json| json.0),
        featured: row.try_get("featured")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ListingRepository for PostgresListingRepository {
    async fn create_listing(&self, listing: NewListing) -> Result<Listing> {
        debug!("Creating listing in database: {}", listing.title);

        let row = sqlx::query(&format!(
            "INSERT INTO listings (title, description, price, images, location, address, beds, baths, \
             sqft, lot_size, year_built, property_type, status, features, agent, featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(&listing.price)
        .bind(&listing.images)
        .bind(&listing.location)
        .bind(&listing.address)
        .bind(to_db_int(listing.beds, "beds")?)
        .bind(listing.baths)
        .bind(to_db_int(listing.sqft, "sqft")?)
        .bind(&listing.lot_size)
        .bind(listing.year_built)
        .bind(listing.property_type.as_str())
        .bind(listing.status.as_str())
        .bind(&listing.features)
        .bind(listing.agent.as_ref().map(Json))
        .bind(listing.featured)
        .fetch_one(&self.pool)
        .await?;

        row_to_listing(&row)
    }

    async fn get_listing(&self, id: i64) -> Result<Option<Listing>> {
        debug!("Getting listing from database: {}", id);

        let row = sqlx::query(&format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_listing).transpose()
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        let rows = sqlx::query(&format!("SELECT {} FROM listings ORDER BY id", LISTING_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_listing).collect()
    }

    async fn list_featured(&self) -> Result<Vec<Listing>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM listings WHERE featured ORDER BY id",
            LISTING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_listing).collect()
    }

    async fn update_listing(&self, id: i64, listing: NewListing) -> Result<Listing> {
        debug!("Updating listing in database: {}", id);

        let row = sqlx::query(&format!(
            "UPDATE listings SET title = $2, description = $3, price = $4, images = $5, \
             location = $6, address = $7, beds = $8, baths = $9, sqft = $10, lot_size = $11, \
             year_built = $12, property_type = $13, status = $14, features = $15, agent = $16, \
             featured = $17 WHERE id = $1 RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(&listing.price)
        .bind(&listing.images)
        .bind(&listing.location)
        .bind(&listing.address)
        .bind(to_db_int(listing.beds, "beds")?)
        .bind(listing.baths)
        .bind(to_db_int(listing.sqft, "sqft")?)
        .bind(&listing.lot_size)
        .bind(listing.year_built)
        .bind(listing.property_type.as_str())
        .bind(listing.status.as_str())
        .bind(&listing.features)
        .bind(listing.agent.as_ref().map(Json))
        .bind(listing.featured)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_listing(&row),
            None => Err(Error::ListingNotFound(id.to_string())),
        }
    }

    async fn delete_listing(&self, id: i64) -> Result<()> {
        debug!("Deleting listing from database: {}", id);

        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::ListingNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn upsert_listings(&self, listings: Vec<Listing>) -> Result<usize> {
        check_explicit_ids(&listings)?;
        let mut tx = self.pool.begin().await?;
        let count = listings.len();

        for listing in &listings {
            sqlx::query(
                "INSERT INTO listings (id, title, description, price, images, location, address, beds, \
                 baths, sqft, lot_size, year_built, property_type, status, features, agent, featured, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
                 ON CONFLICT (id) DO UPDATE SET \
                    title = EXCLUDED.title, description = EXCLUDED.description, price = EXCLUDED.price, \
                    images = EXCLUDED.images, location = EXCLUDED.location, address = EXCLUDED.address, \
                    beds = EXCLUDED.beds, baths = EXCLUDED.baths, sqft = EXCLUDED.sqft, \
                    lot_size = EXCLUDED.lot_size, year_built = EXCLUDED.year_built, \
                    property_type = EXCLUDED.property_type, status = EXCLUDED.status, \
                    features = EXCLUDED.features, agent = EXCLUDED.agent, featured = EXCLUDED.featured"
            )
            .bind(listing.id)
            .bind(&listing.title)
            .bind(&listing.description)
            .bind(&listing.price)
            .bind(&listing.images)
            .bind(&listing.location)
            .bind(&listing.address)
            .bind(to_db_int(listing.beds, "beds")?)
            .bind(listing.baths)
            .bind(to_db_int(listing.sqft, "sqft")?)
            .bind(&listing.lot_size)
            .bind(listing.year_built)
            .bind(listing.property_type.as_str())
            .bind(listing.status.as_str())
            .bind(&listing.features)
            .bind(listing.agent.as_ref().map(Json))
            .bind(listing.featured)
            .bind(listing.created_at)
            .execute(&mut *tx)
            .await?;
        }

        // Explicit ids bypass the sequence; move it past them
        sqlx::query("SELECT setval('listings_id_seq', GREATEST((SELECT MAX(id) FROM listings), 1))")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Upserted {} listings", count);
        Ok(count)
    }
}
