//! Client inquiry inbox

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, Utc};
use common::error::{Error, Result};
use common::model::inquiry::{Inquiry, InquiryStatus, NewInquiry};
use dashmap::DashMap;
use tracing::{debug, info};

/// Inquiry inbox held in memory
pub struct InquiryService {
    /// Inquiries by ID
    inquiries: DashMap<i64, Inquiry>,
    next_id: AtomicI64,
}

impl InquiryService {
    /// Create an empty inbox
    pub fn new() -> Self {
        Self {
            inquiries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create an inbox holding the demo inquiries
    pub fn with_samples() -> Self {
        let service = Self::new();
        for inquiry in sample_inquiries() {
            service.next_id.fetch_max(inquiry.id + 1, Ordering::SeqCst);
            service.inquiries.insert(inquiry.id, inquiry);
        }
        service
    }

    /// All inquiries, ordered by id
    pub async fn list(&self) -> Result<Vec<Inquiry>> {
        let mut inquiries: Vec<Inquiry> = self.inquiries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        inquiries.sort_by_key(|i| i.id);
        debug!("Listing {} inquiries", inquiries.len());
        Ok(inquiries)
    }

    /// Get an inquiry by ID
    pub async fn get(&self, id: i64) -> Result<Inquiry> {
        self.inquiries
            .get(&id)
            .map(|i| i.clone())
            .ok_or_else(|| not_found(id))
    }

    /// Close an inquiry
    pub async fn mark_resolved(&self, id: i64) -> Result<Inquiry> {
        let mut entry = self.inquiries.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.status = InquiryStatus::Resolved;
        info!("Inquiry {} marked as resolved", id);
        Ok(entry.clone())
    }

    /// Record that an agent replied; a new inquiry becomes contacted
    pub async fn record_reply(&self, id: i64, message: &str) -> Result<Inquiry> {
        let mut entry = self.inquiries.get_mut(&id).ok_or_else(|| not_found(id))?;
        if entry.status == InquiryStatus::New {
            entry.status = InquiryStatus::Contacted;
        }
        info!("Reply sent to inquiry {} ({}): {} chars", id, entry.email, message.len());
        Ok(entry.clone())
    }

    /// Store a contact form submission dated today
    pub async fn create(&self, inquiry: NewInquiry) -> Result<Inquiry> {
        self.create_on(inquiry, Utc::now().date_naive()).await
    }

    /// Store a contact form submission with an explicit date
    pub async fn create_on(&self, inquiry: NewInquiry, date: NaiveDate) -> Result<Inquiry> {
        inquiry.validate()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let inquiry = Inquiry {
            id,
            name: inquiry.name.trim().to_string(),
            email: inquiry.email.trim().to_string(),
            phone: inquiry.phone.trim().to_string(),
            property: inquiry.property.trim().to_string(),
            date,
            status: InquiryStatus::New,
        };
        info!("New inquiry {} from {}", id, inquiry.name);
        self.inquiries.insert(id, inquiry.clone());
        Ok(inquiry)
    }
}

impl Default for InquiryService {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: i64) -> Error {
    Error::InquiryNotFound(id.to_string())
}

fn sample(id: i64, name: &str, email: &str, phone: &str, property: &str, date: (i32, u32, u32), status: InquiryStatus) -> Option<Inquiry> {
    Some(Inquiry {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        property: property.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
        status,
    })
}

/// Demo inquiries shown on a fresh dashboard
pub fn sample_inquiries() -> Vec<Inquiry> {
    [
        sample(1, "John Doe", "john.doe@example.com", "(555) 123-4567", "Modern Luxury Villa", (2023, 6, 15), InquiryStatus::New),
        sample(2, "Jane Smith", "jane.smith@example.com", "(555) 987-6543", "Downtown Penthouse", (2023, 6, 14), InquiryStatus::Contacted),
        sample(3, "Michael Johnson", "michael.j@example.com", "(555) 456-7890", "Waterfront Estate", (2023, 6, 13), InquiryStatus::Scheduled),
        sample(4, "Emily Williams", "emily.w@example.com", "(555) 789-0123", "Contemporary Townhouse", (2023, 6, 12), InquiryStatus::Contacted),
    ]
    .into_iter()
    .flatten()
    .collect()
}
