//! Listing search, filtering and ordering

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use common::decimal::{Decimal, Money};
use common::model::listing::{Listing, ListingStatus, PropertyType};
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Default page size of the listings grid
pub const DEFAULT_PER_PAGE: usize = 12;

/// Largest page a client may ask for
pub const MAX_PER_PAGE: usize = 100;

/// Ordering options offered by the listings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Featured listings first, otherwise store order
    #[default]
    Featured,
    /// Most expensive first
    PriceHigh,
    /// Cheapest first
    PriceLow,
    /// Most recently added first
    Newest,
}

/// Search filters; every unset field matches everything
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct ListingQuery {
    /// Case-insensitive text matched against title, location and address
    pub location: Option<String>,
    /// Display label or slug; `any` matches everything
    #[serde(default, deserialize_with = "any_as_none")]
    pub property_type: Option<PropertyType>,
    /// Display label or slug; `any` matches everything
    #[serde(default, deserialize_with = "any_as_none")]
    pub status: Option<ListingStatus>,
    pub min_beds: Option<u32>,
    pub min_baths: Option<Decimal>,
    pub min_sqft: Option<u32>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub featured: Option<bool>,
    #[serde(default)]
    pub sort: SortOrder,
    /// 1-based page number
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Select-box value where a blank or `any` choice means no filter
fn any_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("any") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<Listing>,
    /// Matches across all pages
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

impl ListingQuery {
    /// Whether a listing passes every filter
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(text) = self.location.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            let haystacks = [
                Some(listing.title.as_str()),
                Some(listing.location.as_str()),
                listing.address.as_deref(),
            ];
            if !haystacks.iter().flatten().any(|h| h.to_lowercase().contains(&needle)) {
                return false;
            }
        }

        if self.property_type.is_some_and(|t| t != listing.property_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != listing.status) {
            return false;
        }
        if self.featured.is_some_and(|f| f != listing.featured) {
            return false;
        }
        if self.min_beds.is_some_and(|n| listing.beds < n)
            || self.min_baths.is_some_and(|n| listing.baths < n)
            || self.min_sqft.is_some_and(|n| listing.sqft < n)
        {
            return false;
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let price = listing.price_value();
            if self.min_price.is_some_and(|min| price < min)
                || self.max_price.is_some_and(|max| price > max)
            {
                return false;
            }
        }

        true
    }

    /// Effective page number, never below 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, between 1 and [`MAX_PER_PAGE`]
    pub fn per_page(&self) -> usize {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Filter, order and paginate `listings`
    pub fn apply(&self, listings: Vec<Listing>) -> SearchResult {
        let mut matched: Vec<Listing> = listings.into_iter().filter(|l| self.matches(l)).collect();
        sort_listings(&mut matched, self.sort);

        let total = matched.len();
        let page = self.page();
        let per_page = self.per_page();
        let items = matched
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        SearchResult { items, total, page, per_page }
    }
}

/// Stable in-place sort by the requested order
pub fn sort_listings(listings: &mut [Listing], order: SortOrder) {
    match order {
        SortOrder::Featured => listings.sort_by_key(|l| !l.featured),
        SortOrder::PriceHigh => listings.sort_by(|a, b| compare_price(b, a)),
        SortOrder::PriceLow => listings.sort_by(compare_price),
        SortOrder::Newest => listings.sort_by(|a, b| b.id.cmp(&a.id)),
    }
}

fn compare_price(a: &Listing, b: &Listing) -> Ordering {
    a.price_value().cmp(&b.price_value())
}
