//! Relay of viewing requests to an external intake hook

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use common::error::{Error, Result};
use common::model::appointment::AppointmentRequest;
use serde::Serialize;
use tracing::debug;

/// Payload posted for each accepted viewing request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewingSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub property_interest: String,
    pub message: String,
    pub time_slot: String,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub submitted_at: DateTime<Utc>,
}

impl ViewingSubmission {
    /// Build the payload from a validated request
    pub fn new(request: &AppointmentRequest, date: NaiveDate, time_slot: &str) -> Self {
        Self {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            property_interest: request.property_interest.trim().to_string(),
            message: request.message.trim().to_string(),
            time_slot: time_slot.to_string(),
            date,
            submitted_at: Utc::now(),
        }
    }
}

/// Destination for viewing requests outside this service
#[async_trait]
pub trait AppointmentNotifier: Send + Sync {
    /// Deliver one submission; an error means the request must not be booked
    async fn notify(&self, submission: &ViewingSubmission) -> Result<()>;
}

/// Posts submissions as JSON to a webhook URL
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AppointmentNotifier for WebhookNotifier {
    async fn notify(&self, submission: &ViewingSubmission) -> Result<()> {
        let response = self.client
            .post(&self.url)
            .json(submission)
            .send()
            .await
            .map_err(|e| Error::Notification(format!("Appointment webhook unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Notification(format!("Appointment webhook answered {}", status)));
        }

        debug!("Viewing request from {} relayed ({})", submission.email, status);
        Ok(())
    }
}
