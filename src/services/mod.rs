//! Business logic layer
//!
//! - `shortener_service`: creation, resolution, click recording, listing
//! - `session`: service calls bound to application state
//! - `validation`: field-level request checks for the presentation layer

mod session;
mod shortener_service;
pub mod validation;

pub use session::{REDIRECT_LOCATION, REDIRECT_SOURCE, Session};
pub use shortener_service::{
    API_SOURCE, BulkCreateResult, BulkFailedItem, CreateUrlRequest, ShortUrlResult,
    ShortenerService, ShortenerSettings, compute_expiry,
};
pub use validation::{RequestField, RequestValidation, validate_bulk, validate_request};
