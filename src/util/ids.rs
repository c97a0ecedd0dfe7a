use uuid::Uuid;

/// A fresh random entity id (hyphenated UUID v4).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
