//! Listing models and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{dec, parse_price, Decimal, Money};
use crate::error::{Error, Result};
use super::normalize_label;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Largest id a listing may carry. Ids come from spreadsheets and browser
/// forms that treat them as JavaScript numbers, so anything above the
/// largest exactly representable integer is refused.
pub const MAX_LISTING_ID: i64 = 9_007_199_254_740_991;

/// Most bathrooms a listing may declare
pub const MAX_BATHS: Decimal = dec!(999.5);

/// Kind of property being listed.
///
/// Serialized as its display label. Parsing accepts the label or the
/// search slug in any case, so `"Luxury"`, `"house"` and `"TOWNHOUSE"`
/// all resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(try_from = "String", into = "String")]
pub enum PropertyType {
    Residential,
    Luxury,
    Commercial,
    Rental,
    House,
    Apartment,
    Condo,
    Townhouse,
    Land,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "Residential",
            PropertyType::Luxury => "Luxury",
            PropertyType::Commercial => "Commercial",
            PropertyType::Rental => "Rental",
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Land => "Land",
        }
    }
}

impl Default for PropertyType {
    fn default() -> Self {
        PropertyType::Residential
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "residential" => Ok(PropertyType::Residential),
            "luxury" => Ok(PropertyType::Luxury),
            "commercial" => Ok(PropertyType::Commercial),
            "rental" => Ok(PropertyType::Rental),
            "house" => Ok(PropertyType::House),
            "apartment" => Ok(PropertyType::Apartment),
            "condo" => Ok(PropertyType::Condo),
            "townhouse" => Ok(PropertyType::Townhouse),
            "land" => Ok(PropertyType::Land),
            _ => Err(Error::ValidationError(format!("Unknown property type: {}", s))),
        }
    }
}

impl TryFrom<String> for PropertyType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.as_str().to_string()
    }
}

/// Market status of a listing, serialized and parsed like [`PropertyType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(try_from = "String", into = "String")]
pub enum ListingStatus {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Rent")]
    ForRent,
    #[serde(rename = "New Construction")]
    NewConstruction,
    Pending,
    Sold,
    Leased,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "For Sale",
            ListingStatus::ForRent => "For Rent",
            ListingStatus::NewConstruction => "New Construction",
            ListingStatus::Pending => "Pending",
            ListingStatus::Sold => "Sold",
            ListingStatus::Leased => "Leased",
        }
    }

    /// Whether the listing is currently on the market
    pub fn is_active(&self) -> bool {
        matches!(self, ListingStatus::ForSale | ListingStatus::ForRent)
    }
}

impl Default for ListingStatus {
    fn default() -> Self {
        ListingStatus::ForSale
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "for sale" => Ok(ListingStatus::ForSale),
            "for rent" => Ok(ListingStatus::ForRent),
            "new construction" => Ok(ListingStatus::NewConstruction),
            "pending" => Ok(ListingStatus::Pending),
            "sold" => Ok(ListingStatus::Sold),
            "leased" => Ok(ListingStatus::Leased),
            _ => Err(Error::ValidationError(format!("Unknown listing status: {}", s))),
        }
    }
}

impl TryFrom<String> for ListingStatus {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ListingStatus> for String {
    fn from(value: ListingStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Listing agent contact card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Agent {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Portrait URL
    pub image: String,
}

/// Property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique numeric listing ID, assigned by the store
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Display price, e.g. "₦45,000,000" or "$3,500/mo"
    pub price: String,
    /// Image URLs, first one is the cover
    pub images: Vec<String>,
    /// City or neighbourhood
    pub location: String,
    pub address: Option<String>,
    pub beds: u32,
    /// Bathrooms in half steps, e.g. 2.5
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub baths: Decimal,
    pub sqft: u32,
    pub lot_size: Option<String>,
    pub year_built: Option<i32>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub features: Vec<String>,
    pub agent: Option<Agent>,
    pub featured: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Build a stored listing from a payload and a store-assigned id
    pub fn from_new(id: i64, new: NewListing) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            price: new.price,
            images: new.images,
            location: new.location,
            address: new.address,
            beds: new.beds,
            baths: new.baths,
            sqft: new.sqft,
            lot_size: new.lot_size,
            year_built: new.year_built,
            property_type: new.property_type,
            status: new.status,
            features: new.features,
            agent: new.agent,
            featured: new.featured,
            created_at: Utc::now(),
        }
    }

    /// Replace every editable field, keeping id and creation time
    pub fn apply(&mut self, new: NewListing) {
        self.title = new.title;
        self.description = new.description;
        self.price = new.price;
        self.images = new.images;
        self.location = new.location;
        self.address = new.address;
        self.beds = new.beds;
        self.baths = new.baths;
        self.sqft = new.sqft;
        self.lot_size = new.lot_size;
        self.year_built = new.year_built;
        self.property_type = new.property_type;
        self.status = new.status;
        self.features = new.features;
        self.agent = new.agent;
        self.featured = new.featured;
    }

    /// Numeric value of the display price (zero when unparseable)
    pub fn price_value(&self) -> Money {
        parse_price(&self.price)
    }

    /// Cover image, if any
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Create/update payload for a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub beds: u32,
    #[serde(default, with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub baths: Decimal,
    #[serde(default)]
    pub sqft: u32,
    #[serde(default)]
    pub lot_size: Option<String>,
    #[serde(default)]
    pub year_built: Option<i32>,
    #[serde(rename = "type", default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub agent: Option<Agent>,
    #[serde(default)]
    pub featured: bool,
}

impl NewListing {
    /// Check required fields and tidy free-form lists.
    ///
    /// Title and price must be non-blank and bathrooms must be a
    /// non-negative count in half steps. Features and images are trimmed,
    /// blanks dropped and duplicate images removed.
    pub fn validate(mut self) -> Result<Self> {
        self.title = self.title.trim().to_string();
        self.price = self.price.trim().to_string();

        if self.title.is_empty() {
            return Err(Error::ValidationError("Listing title is required".to_string()));
        }
        if self.price.is_empty() {
            return Err(Error::ValidationError("Listing price is required".to_string()));
        }
        if self.baths < Decimal::ZERO || self.baths > MAX_BATHS || !(self.baths * dec!(2)).fract().is_zero() {
            return Err(Error::ValidationError(format!(
                "Bathrooms must be a multiple of 0.5 between 0 and {}: {}",
                MAX_BATHS, self.baths
            )));
        }

        self.features = self.features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        let mut images: Vec<String> = Vec::with_capacity(self.images.len());
        for image in self.images.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
            if !images.iter().any(|existing| existing == image) {
                images.push(image.to_string());
            }
        }
        self.images = images;

        Ok(self)
    }

    /// Split a comma-separated feature string the way the admin form sends it
    pub fn features_from_csv(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}
