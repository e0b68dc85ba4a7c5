//! Demo catalogue used by `--seed`

use common::decimal::Decimal;
use common::model::listing::{Agent, ListingStatus, NewListing, PropertyType};

fn agent() -> Agent {
    Agent {
        name: "Adaeze Okafor".to_string(),
        phone: "+234 803 555 0142".to_string(),
        email: "adaeze@example.com".to_string(),
        image: "/images/agents/adaeze.jpg".to_string(),
    }
}

/// A handful of listings covering each status the site shows
pub fn sample_listings() -> Vec<NewListing> {
    vec![
        NewListing {
            title: "Modern Luxury Villa".to_string(),
            description: "Five-bedroom villa with pool and smart-home fittings.".to_string(),
            price: "₦450,000,000".to_string(),
            images: vec!["/images/listings/villa-1.jpg".to_string()],
            location: "Lekki Phase 1, Lagos".to_string(),
            address: Some("12 Admiralty Way".to_string()),
            beds: 5,
            baths: Decimal::from(6),
            sqft: 6200,
            lot_size: Some("0.4 acres".to_string()),
            year_built: Some(2021),
            property_type: PropertyType::Luxury,
            status: ListingStatus::ForSale,
            features: vec!["Pool".to_string(), "Smart home".to_string(), "BQ".to_string()],
            agent: Some(agent()),
            featured: true,
        },
        NewListing {
            title: "Downtown Penthouse".to_string(),
            description: "Top-floor apartment with lagoon views.".to_string(),
            price: "₦3,500,000/mo".to_string(),
            images: vec!["/images/listings/penthouse-1.jpg".to_string()],
            location: "Victoria Island, Lagos".to_string(),
            address: Some("4 Ozumba Mbadiwe Avenue".to_string()),
            beds: 3,
            baths: Decimal::new(35, 1),
            sqft: 2800,
            lot_size: None,
            year_built: Some(2019),
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForRent,
            features: vec!["Gym".to_string(), "24h power".to_string()],
            agent: Some(agent()),
            featured: true,
        },
        NewListing {
            title: "Waterfront Estate".to_string(),
            description: "Gated waterfront home with private jetty.".to_string(),
            price: "₦780,000,000".to_string(),
            images: vec!["/images/listings/waterfront-1.jpg".to_string()],
            location: "Banana Island, Lagos".to_string(),
            address: None,
            beds: 6,
            baths: Decimal::from(7),
            sqft: 9100,
            lot_size: Some("1.1 acres".to_string()),
            year_built: Some(2017),
            property_type: PropertyType::Luxury,
            status: ListingStatus::ForSale,
            features: vec!["Jetty".to_string(), "Cinema".to_string()],
            agent: Some(agent()),
            featured: false,
        },
        NewListing {
            title: "Contemporary Townhouse".to_string(),
            description: "Four-bedroom terrace in a new development.".to_string(),
            price: "₦120,000,000".to_string(),
            images: vec!["/images/listings/townhouse-1.jpg".to_string()],
            location: "Maitama, Abuja".to_string(),
            address: None,
            beds: 4,
            baths: Decimal::from(4),
            sqft: 3400,
            lot_size: None,
            year_built: Some(2024),
            property_type: PropertyType::Townhouse,
            status: ListingStatus::NewConstruction,
            features: vec![],
            agent: None,
            featured: false,
        },
    ]
}
