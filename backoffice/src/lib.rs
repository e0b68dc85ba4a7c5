//! Back office for the brokerage: client inquiries, appointments, the
//! dashboard summary and the admin sign-in gate

pub mod inquiries;
pub mod appointments;
pub mod notify;
pub mod stats;
pub mod auth;

pub use inquiries::InquiryService;
pub use appointments::AppointmentService;
pub use notify::{AppointmentNotifier, ViewingSubmission, WebhookNotifier};
pub use stats::DashboardStats;
pub use auth::{AuthConfig, InMemorySessionProvider, Session, SessionProvider};
