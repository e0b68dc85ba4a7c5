//! Domain models for the brokerage

pub mod listing;
pub mod inquiry;
pub mod appointment;

pub use listing::{Agent, Listing, ListingStatus, NewListing, PropertyType};
pub use inquiry::{Inquiry, InquiryStatus, NewInquiry};
pub use appointment::{Appointment, AppointmentRequest};

/// Lowercase and fold `-`/`_` separators into spaces so that
/// `"For-Sale"`, `"for_sale"` and `"For Sale"` compare equal.
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
        .collect()
}
