/// Cat identifiers are opaque strings assigned by the record store.
pub type CatId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
