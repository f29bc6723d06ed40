//! Endpoint paths of the prediction backend, relative to the API base origin.

pub const PREDICT_PATH: &str = "api/predict";
pub const CONTACT_PATH: &str = "api/contact";
pub const HISTORY_PATH: &str = "api/history";
/// Parent path of the per-record document export; the record id is appended
/// as a single path segment.
pub const EXPORT_PATH_PREFIX: &str = "api/generate_pdf";
