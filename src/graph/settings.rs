//! Control values for charts and tables.

use std::collections::HashMap;

use crate::models::{StatId, ALL};

/// Current value of every control, keyed by control name (`v`, `r`, `l`, `sx`, `sy`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Control value parsed as an id, `None` when unset or not a number.
    pub fn id(&self, name: &str) -> Option<StatId> {
        self.get(name).and_then(|v| v.trim().parse().ok())
    }

    /// Id of a dimension control, treating unset as [`ALL`].
    pub fn id_or_all(&self, name: &str) -> StatId {
        self.id(name).unwrap_or(ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings() {
        let settings = Settings::new().with("v", "2").with("r", "-2").with("sx", "sl");

        assert_eq!(settings.id("v"), Some(2));
        assert_eq!(settings.id_or_all("r"), ALL);
        assert_eq!(settings.id_or_all("l"), ALL);
        assert_eq!(settings.get("sx"), Some("sl"));
        assert_eq!(settings.id("sx"), None);
    }
}
