pub mod client;
pub mod document;
pub mod message;
pub mod project;

/// Next id for a collection: max over the remaining records, plus one.
/// The high-water mark is not persisted, so deleting the max-id record
/// lets the next insert take that id again.
pub(crate) fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

/// Document timestamps use the same second-resolution format everywhere.
pub(crate) fn timestamp_now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn date_today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
