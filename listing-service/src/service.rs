//! Listing service implementation

use std::io::Read;
use std::sync::Arc;

use common::error::{Error, ErrorExt, Result};
use common::model::listing::{Listing, NewListing};
use installment::{FinancingPolicy, InstallmentCalculator, Quote};
use tracing::{debug, info};

use crate::import::{parse_listings_csv, ImportReport};
use crate::repository::{InMemoryListingRepository, ListingRepository, PostgresListingRepository};
use crate::search::{ListingQuery, SearchResult};

/// Listing service for the public catalogue and the admin screens
pub struct ListingService {
    /// Repository for listing data
    repo: Arc<dyn ListingRepository>,
    /// Terms used for installment quotes
    policy: FinancingPolicy,
}

/// Repository Type
pub enum RepositoryType {
    /// In-memory repository
    InMemory,
    /// PostgreSQL repository
    Postgres(crate::config::ListingServiceConfig),
}

impl ListingService {
    /// Create a new listing service backed by memory
    pub fn new() -> Self {
        Self::with_repo(Arc::new(InMemoryListingRepository::new()))
    }

    /// Create a service over any repository implementation
    pub fn with_repo(repo: Arc<dyn ListingRepository>) -> Self {
        Self {
            repo,
            policy: FinancingPolicy::STANDARD,
        }
    }

    /// Create a new listing service with a specific repository type
    pub async fn with_repository(repo_type: RepositoryType) -> Result<Self> {
        let repo: Arc<dyn ListingRepository> = match repo_type {
            RepositoryType::InMemory => Arc::new(InMemoryListingRepository::new()),
            RepositoryType::Postgres(config) => {
                Arc::new(PostgresListingRepository::with_config(&config).await?)
            }
        };

        Ok(Self::with_repo(repo))
    }

    /// Create a new listing service with a configuration; without a
    /// database URL listings stay in memory
    pub async fn with_config(config: &crate::config::ListingServiceConfig) -> Result<Self> {
        if config.database_url.is_some() {
            Self::with_repository(RepositoryType::Postgres(config.clone())).await
        } else {
            info!("No DATABASE_URL configured, keeping listings in memory");
            Self::with_repository(RepositoryType::InMemory).await
        }
    }

    /// Use different financing terms for quotes
    pub fn with_policy(mut self, policy: FinancingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FinancingPolicy {
        &self.policy
    }

    /// Create a listing after validating it
    pub async fn create_listing(&self, listing: NewListing) -> Result<Listing> {
        let listing = listing.validate()?;
        info!("Creating listing: {}", listing.title);
        self.repo.create_listing(listing).await
    }

    /// Get a listing by ID
    pub async fn get_listing(&self, id: i64) -> Result<Option<Listing>> {
        self.repo.get_listing(id).await
    }

    /// Get a listing by ID, failing when it does not exist
    pub async fn require_listing(&self, id: i64) -> Result<Listing> {
        self.repo.get_listing(id).await?
            .ok_or_else(|| Error::ListingNotFound(id.to_string()))
    }

    /// Get every listing in store order
    pub async fn all_listings(&self) -> Result<Vec<Listing>> {
        self.repo.list_listings().await
    }

    /// Replace a listing's editable fields
    pub async fn update_listing(&self, id: i64, listing: NewListing) -> Result<Listing> {
        let listing = listing.validate()?;
        info!("Updating listing {}: {}", id, listing.title);
        self.repo.update_listing(id, listing).await
    }

    /// Remove a listing
    pub async fn delete_listing(&self, id: i64) -> Result<()> {
        info!("Deleting listing {}", id);
        self.repo.delete_listing(id).await
    }

    /// Listings shown in the home page carousel
    pub async fn featured_listings(&self) -> Result<Vec<Listing>> {
        self.repo.list_featured().await
    }

    /// Filter, order and paginate the catalogue
    pub async fn search(&self, query: &ListingQuery) -> Result<SearchResult> {
        let listings = self.repo.list_listings().await?;
        let result = query.apply(listings);
        debug!("Search matched {} listings, returning page {}", result.total, result.page);
        Ok(result)
    }

    /// Installment quote seeded from a listing's display price.
    ///
    /// `term_months` defaults to the policy's default term and is clamped
    /// to the offered range.
    pub async fn quote_for_listing(&self, id: i64, term_months: Option<i64>) -> Result<Quote> {
        let listing = self.require_listing(id).await?;
        let mut calculator = InstallmentCalculator::from_listing_price(&listing.price, self.policy);
        if let Some(term) = term_months {
            calculator.set_term(term);
        }
        Ok(*calculator.quote())
    }

    /// Store a batch of listings, e.g. demo data
    pub async fn seed(&self, listings: Vec<NewListing>) -> Result<Vec<Listing>> {
        let mut created = Vec::with_capacity(listings.len());
        for listing in listings {
            created.push(self.create_listing(listing).await?);
        }
        info!("Seeded {} listings", created.len());
        Ok(created)
    }

    /// Import listings from a CSV document.
    ///
    /// Rows carrying a numeric id overwrite that listing; the rest are
    /// created with fresh ids.
    pub async fn import_csv<R: Read>(&self, reader: R) -> Result<ImportReport> {
        let parsed = parse_listings_csv(reader)?;
        let mut errors = parsed.errors;
        let mut numbered = Vec::new();
        let mut imported = 0;

        for row in parsed.rows {
            let listing = match row.listing.validate() {
                Ok(listing) => listing,
                Err(e) => {
                    errors.push(crate::import::RowError { line: row.line, reason: e.to_string() });
                    continue;
                }
            };

            match row.id {
                Some(id) => numbered.push(Listing::from_new(id, listing)),
                None => {
                    self.repo.create_listing(listing).await
                        .with_context(|| format!("Failed to import CSV line {}", row.line))?;
                    imported += 1;
                }
            }
        }

        if !numbered.is_empty() {
            imported += self.repo.upsert_listings(numbered).await
                .with_context(|| "Failed to store imported listings")?;
        }

        let report = ImportReport {
            imported,
            skipped: parsed.incomplete + errors.len(),
            errors,
        };
        info!(
            "CSV import finished: {} imported, {} skipped",
            report.imported, report.skipped
        );
        Ok(report)
    }
}

impl Default for ListingService {
    fn default() -> Self {
        Self::new()
    }
}
