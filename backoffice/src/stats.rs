//! Dashboard summary figures

use common::model::inquiry::Inquiry;
use common::model::listing::Listing;
use serde::{Deserialize, Serialize};
#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Headline numbers on the admin overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_listings: usize,
    /// Listings for sale or for rent
    pub active_listings: usize,
    pub featured_listings: usize,
    pub total_inquiries: usize,
    /// Inquiries not yet resolved
    pub open_inquiries: usize,
}

impl DashboardStats {
    pub fn compute(listings: &[Listing], inquiries: &[Inquiry]) -> Self {
        Self {
            total_listings: listings.len(),
            active_listings: listings.iter().filter(|l| l.status.is_active()).count(),
            featured_listings: listings.iter().filter(|l| l.featured).count(),
            total_inquiries: inquiries.len(),
            open_inquiries: inquiries.iter().filter(|i| i.status.is_open()).count(),
        }
    }
}
