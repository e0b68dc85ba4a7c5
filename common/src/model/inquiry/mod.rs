//! Client inquiry models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Where an inquiry is in the follow-up process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum InquiryStatus {
    /// Not yet answered
    New,
    /// An agent has been in touch
    Contacted,
    /// A viewing has been booked
    Scheduled,
    /// Closed out
    Resolved,
}

impl InquiryStatus {
    /// Whether the inquiry still needs attention
    pub fn is_open(&self) -> bool {
        !matches!(self, InquiryStatus::Resolved)
    }
}

/// Client inquiry about a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Title of the property asked about
    pub property: String,
    pub date: NaiveDate,
    pub status: InquiryStatus,
}

/// Contact form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(default)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub message: String,
}

impl NewInquiry {
    /// Name and a plausible email are required
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::ValidationError("Name is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(Error::ValidationError(format!("Invalid email address: {}", self.email)));
        }
        Ok(())
    }
}
