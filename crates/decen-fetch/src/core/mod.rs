//! Pure transformations: URL conventions and status classification.

mod url;
mod validation;

pub use url::{asset_url, document_url, join_origin};
pub use validation::{is_error_status, is_redirect};
