use serde_json::{Map, Value};

/// Loosely-typed view over one parsed syndication item.
///
/// Feed producers disagree wildly about which fields exist and what shape
/// they take, so the normalizer works against this generic mapping instead
/// of a concrete struct. Accessors return `None` whenever a field is absent
/// or has an unexpected type; they never panic.
#[derive(Debug, Clone, Default)]
pub struct RawEntry(Map<String, Value>);

impl RawEntry {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Build from any JSON value; non-objects yield an empty entry
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    /// String field, if present and actually a string
    pub fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }

    /// List field, if present and actually a list
    pub fn list(&self, key: &str) -> Option<&Vec<Value>> {
        self.0.get(key)?.as_array()
    }

    /// Nested object field, if present and actually an object
    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key)?.as_object()
    }

    /// Structured time field: a list of at least six integer components
    /// (year, month, day, hour, minute, second)
    pub fn time_parts(&self, key: &str) -> Option<[i64; 6]> {
        let list = self.list(key)?;
        if list.len() < 6 {
            return None;
        }

        let mut parts = [0i64; 6];
        for (slot, value) in parts.iter_mut().zip(list) {
            *slot = value.as_i64()?;
        }
        Some(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_tolerate_missing_fields() {
        let entry = RawEntry::new();
        assert_eq!(entry.string("title"), None);
        assert_eq!(entry.list("links"), None);
        assert_eq!(entry.object("source"), None);
        assert_eq!(entry.time_parts("published_parsed"), None);
    }

    #[test]
    fn accessors_reject_mismatched_types() {
        let entry = RawEntry::from_value(json!({
            "title": 42,
            "links": "not-a-list",
            "source": ["not", "an", "object"],
            "published_parsed": [2024, 7, 4],
        }));

        assert_eq!(entry.string("title"), None);
        assert_eq!(entry.list("links"), None);
        assert_eq!(entry.object("source"), None);
        // Too few components
        assert_eq!(entry.time_parts("published_parsed"), None);
    }

    #[test]
    fn time_parts_reads_six_components() {
        let entry = RawEntry::from_value(json!({
            "published_parsed": [2024, 7, 4, 10, 30, 0, 3, 186, -1],
        }));
        assert_eq!(
            entry.time_parts("published_parsed"),
            Some([2024, 7, 4, 10, 30, 0])
        );
    }

    #[test]
    fn non_object_value_becomes_empty_entry() {
        let entry = RawEntry::from_value(json!("just a string"));
        assert_eq!(entry.string("title"), None);
    }
}
