// This is a metapackage for tests
// Re-export crates as modules

pub use common;
pub use installment;
pub use listing_service;
pub use backoffice;
