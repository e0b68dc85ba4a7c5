//! Appointment calendar

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use common::error::{Error, Result};
use common::model::appointment::{Appointment, AppointmentRequest};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::notify::{AppointmentNotifier, ViewingSubmission};

/// Title given to appointments booked from the public form
pub const VIEWING_TITLE: &str = "Property Viewing";

/// Appointment calendar held in memory
pub struct AppointmentService {
    appointments: DashMap<i64, Appointment>,
    next_id: AtomicI64,
    /// Receives each viewing request before it is booked
    notifier: Option<Arc<dyn AppointmentNotifier>>,
}

impl AppointmentService {
    pub fn new() -> Self {
        Self {
            appointments: DashMap::new(),
            next_id: AtomicI64::new(1),
            notifier: None,
        }
    }

    /// Relay every viewing request through `notifier` before booking it
    pub fn with_notifier(mut self, notifier: Arc<dyn AppointmentNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Create a calendar holding the demo appointments
    pub fn with_samples() -> Self {
        let service = Self::new();
        for appointment in sample_appointments() {
            service.next_id.fetch_max(appointment.id + 1, Ordering::SeqCst);
            service.appointments.insert(appointment.id, appointment);
        }
        service
    }

    /// All appointments, earliest first; same-day bookings keep booking order
    pub async fn list(&self) -> Result<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self.appointments
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        appointments.sort_by_key(|a| (a.date, a.id));
        debug!("Listing {} appointments", appointments.len());
        Ok(appointments)
    }

    /// Get an appointment by ID
    pub async fn get(&self, id: i64) -> Result<Appointment> {
        self.appointments
            .get(&id)
            .map(|a| a.clone())
            .ok_or_else(|| Error::AppointmentNotFound(id.to_string()))
    }

    /// Book a viewing from the public form, judged against today's date
    pub async fn request(&self, request: AppointmentRequest) -> Result<Appointment> {
        self.request_on(request, Utc::now().date_naive()).await
    }

    /// Book a viewing as of `today`.
    ///
    /// With a notifier configured the request is relayed first; a failed
    /// relay books nothing.
    pub async fn request_on(&self, request: AppointmentRequest, today: NaiveDate) -> Result<Appointment> {
        let (date, slot) = request.validate(today)?;

        if let Some(notifier) = &self.notifier {
            let submission = ViewingSubmission::new(&request, date, slot);
            if let Err(e) = notifier.notify(&submission).await {
                warn!("Viewing request from {} not booked: {}", submission.email, e);
                return Err(e);
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let property = match request.property_interest.trim() {
            "" => "Any property".to_string(),
            interest => interest.to_string(),
        };
        let appointment = Appointment {
            id,
            title: VIEWING_TITLE.to_string(),
            client: request.name.trim().to_string(),
            property,
            date,
            time: slot.to_string(),
        };

        info!(
            "Viewing {} booked for {} on {} at {}",
            id, appointment.client, appointment.date, appointment.time
        );
        self.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }
}

impl Default for AppointmentService {
    fn default() -> Self {
        Self::new()
    }
}

fn sample(id: i64, title: &str, client: &str, property: &str, date: (i32, u32, u32), time: &str) -> Option<Appointment> {
    Some(Appointment {
        id,
        title: title.to_string(),
        client: client.to_string(),
        property: property.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
        time: time.to_string(),
    })
}

/// Demo appointments shown on a fresh dashboard
pub fn sample_appointments() -> Vec<Appointment> {
    [
        sample(1, VIEWING_TITLE, "John Doe", "Modern Luxury Villa", (2023, 6, 18), "10:00 AM"),
        sample(2, "Contract Signing", "Jane Smith", "Downtown Penthouse", (2023, 6, 19), "2:30 PM"),
        sample(3, "Property Inspection", "Michael Johnson", "Waterfront Estate", (2023, 6, 20), "11:00 AM"),
    ]
    .into_iter()
    .flatten()
    .collect()
}
