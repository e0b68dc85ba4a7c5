//! Appointment models

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Scheduled meeting with a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Appointment {
    pub id: i64,
    /// What kind of meeting, e.g. "Property Viewing"
    pub title: String,
    pub client: String,
    pub property: String,
    pub date: NaiveDate,
    /// Time slot as shown to the client, e.g. "10:00 AM"
    pub time: String,
}

/// Viewing slots offered on the public form
pub const TIME_SLOTS: [&str; 8] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "1:00 PM",
    "2:00 PM", "3:00 PM", "4:00 PM", "5:00 PM",
];

/// Public "schedule a viewing" form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub property_interest: String,
    #[serde(default)]
    pub message: String,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time_slot: String,
}

impl AppointmentRequest {
    /// Check the form as of `today`.
    ///
    /// All contact fields, a date and a time slot are required. The date
    /// must be a weekday no earlier than `today` and the slot one of
    /// [`TIME_SLOTS`]. Returns the date and the slot as offered.
    pub fn validate(&self, today: NaiveDate) -> Result<(NaiveDate, &'static str)> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time_slot.trim().is_empty() {
            missing.push("timeSlot");
        }
        let date = match self.date {
            Some(date) if missing.is_empty() => date,
            _ => {
                return Err(Error::ValidationError(format!(
                    "Missing required fields: {}",
                    missing.join(", ")
                )))
            }
        };
        if !self.email.contains('@') {
            return Err(Error::ValidationError(format!("Invalid email address: {}", self.email)));
        }

        if date < today {
            return Err(Error::ValidationError(format!("Viewing date is in the past: {}", date)));
        }
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Err(Error::ValidationError(format!("No viewings on weekends: {}", date)));
        }

        let requested = self.time_slot.trim();
        let slot = TIME_SLOTS
            .iter()
            .copied()
            .find(|slot| slot.eq_ignore_ascii_case(requested))
            .ok_or_else(|| Error::ValidationError(format!("Unavailable time slot: {}", requested)))?;

        Ok((date, slot))
    }
}
