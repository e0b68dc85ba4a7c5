use common::decimal::dec;
use common::error::Error;
use common::model::listing::{ListingStatus, PropertyType, MAX_LISTING_ID};
use listing_service::import::parse_listings_csv;
use listing_service::ListingService;

const CSV: &str = "\
id,title,description,price,location,images,image,beds,baths,sqft,yearBuilt,type,status,features,featured,agentName,agentPhone
,Garden Duplex,Quiet street,\"₦85,000,000\",Ikeja,\"a.jpg,b.jpg\",cover.jpg,4,3 baths,2100,2015,townhouse,for-sale,\"Garden, BQ\",true,Tunde,0803
,No Price,,,Yaba,,,2,1,800,,,,,,,
,Studio,,\"₦600,000/mo\",Yaba,,,one,1,,n/a,Apartment,For Rent,,false,,
,Mystery,,\"₦1\",Nowhere,,,1,1,1,,Castle,,,,,
";

#[test]
fn test_parse_rows() {
    let parsed = parse_listings_csv(CSV.as_bytes()).unwrap();

    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.incomplete, 1);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].line, 5);

    let duplex = &parsed.rows[0];
    assert_eq!(duplex.line, 2);
    assert_eq!(duplex.id, None);
    assert_eq!(duplex.listing.title, "Garden Duplex");
    assert_eq!(duplex.listing.price, "₦85,000,000");
    assert_eq!(duplex.listing.images, vec!["cover.jpg", "a.jpg", "b.jpg"]);
    assert_eq!(duplex.listing.beds, 4);
    assert_eq!(duplex.listing.baths, dec!(3));
    assert_eq!(duplex.listing.sqft, 2100);
    assert_eq!(duplex.listing.year_built, Some(2015));
    assert_eq!(duplex.listing.property_type, PropertyType::Townhouse);
    assert_eq!(duplex.listing.status, ListingStatus::ForSale);
    assert_eq!(duplex.listing.features, vec!["Garden", "BQ"]);
    assert!(duplex.listing.featured);
    let agent = duplex.listing.agent.as_ref().unwrap();
    assert_eq!(agent.name, "Tunde");
    assert_eq!(agent.phone, "0803");
    assert_eq!(agent.email, "");

    let studio = &parsed.rows[1];
    assert_eq!(studio.listing.beds, 0);
    assert_eq!(studio.listing.sqft, 0);
    assert_eq!(studio.listing.year_built, None);
    assert_eq!(studio.listing.property_type, PropertyType::Apartment);
    assert_eq!(studio.listing.status, ListingStatus::ForRent);
    assert!(!studio.listing.featured);
    assert!(studio.listing.agent.is_none());
}

#[test]
fn test_missing_optional_columns_use_defaults() {
    let parsed = parse_listings_csv("title,price\nShell,\"₦5\"\n".as_bytes()).unwrap();

    assert_eq!(parsed.rows.len(), 1);
    let row = &parsed.rows[0].listing;
    assert_eq!(row.property_type, PropertyType::House);
    assert_eq!(row.status, ListingStatus::ForSale);
    assert!(row.images.is_empty());
    assert!(row.features.is_empty());
}

#[tokio::test]
async fn test_import_creates_and_overwrites() {
    let service = ListingService::new();
    service.seed(listing_service::sample::sample_listings()).await.unwrap();

    let csv = "id,title,price\n2,Renamed Penthouse,\"₦4,000,000/mo\"\n,Brand New,\"₦9\"\n,,\n";
    let report = service.import_csv(csv.as_bytes()).await.unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 1);
    assert!(report.errors.is_empty());

    let renamed = service.get_listing(2).await.unwrap().unwrap();
    assert_eq!(renamed.title, "Renamed Penthouse");

    let all = service.all_listings().await.unwrap();
    assert_eq!(all.len(), 5);
    assert!(all.iter().any(|l| l.title == "Brand New" && l.id == 5));
}

#[tokio::test]
async fn test_import_reports_rejected_rows() {
    let service = ListingService::new();
    let csv = "title,price,status\nGood,\"₦1\",Sold\nBad,\"₦2\",Auction\n";

    let report = service.import_csv(csv.as_bytes()).await.unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].line, 3);
    assert!(report.errors[0].reason.contains("Auction"));
}

#[tokio::test]
async fn test_import_requires_title_and_price_columns() {
    let service = ListingService::new();

    let result = service.import_csv("name,cost\nVilla,\"₦1\"\n".as_bytes()).await;
    assert!(matches!(result, Err(Error::Import(_))));
    assert!(service.all_listings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_import_brokerage_types_and_statuses() {
    let service = ListingService::new();
    let csv = "\
title,price,type,status,baths
Hilltop Mansion,\"₦900,000,000\",Luxury,For Sale,5.5
Shop Front,\"₦3,000,000/mo\",Rental,leased,1
Family Home,\"₦75,000,000\",residential,Pending,2.5 baths
";

    let report = service.import_csv(csv.as_bytes()).await.unwrap();
    assert_eq!(report.imported, 3);
    assert!(report.errors.is_empty());

    let all = service.all_listings().await.unwrap();
    let mansion = all.iter().find(|l| l.title == "Hilltop Mansion").unwrap();
    assert_eq!(mansion.property_type, PropertyType::Luxury);
    assert_eq!(mansion.baths, dec!(5.5));

    let shop = all.iter().find(|l| l.title == "Shop Front").unwrap();
    assert_eq!(shop.property_type, PropertyType::Rental);
    assert_eq!(shop.status, ListingStatus::Leased);
    assert!(!shop.status.is_active());

    let home = all.iter().find(|l| l.title == "Family Home").unwrap();
    assert_eq!(home.property_type, PropertyType::Residential);
    assert_eq!(home.status, ListingStatus::Pending);
    assert_eq!(home.baths, dec!(2.5));
}

#[tokio::test]
async fn test_import_rejects_ids_past_the_safe_range() {
    let service = ListingService::new();
    let csv = format!(
        "id,title,price\n{},Edge,\"₦1\"\n{},Too Far,\"₦2\"\n99999999999999999999,Overflow,\"₦3\"\n",
        MAX_LISTING_ID,
        i64::MAX,
    );

    let report = service.import_csv(csv.as_bytes()).await.unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.errors.iter().map(|e| e.line).collect::<Vec<_>>(), vec![3, 4]);
    assert!(report.errors.iter().all(|e| e.reason.contains("out of range")));

    let edge = service.get_listing(MAX_LISTING_ID).await.unwrap().unwrap();
    assert_eq!(edge.title, "Edge");
}

#[tokio::test]
async fn test_import_rejects_uneven_baths() {
    let service = ListingService::new();
    let csv = "title,price,baths\nOdd,\"₦1\",2.25\nEven,\"₦1\",2.5\n";

    let report = service.import_csv(csv.as_bytes()).await.unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].line, 2);
    assert!(report.errors[0].reason.contains("multiple of 0.5"));
}
