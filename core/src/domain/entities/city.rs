//! City entity grouping hotels by location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A city; (name, country) is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl City {
    pub fn new(name: String, country: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            country,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive identity check used for the uniqueness rule
    pub fn same_place(&self, name: &str, country: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.country.eq_ignore_ascii_case(country)
    }

    pub fn rename(&mut self, name: String, country: String) {
        self.name = name;
        self.country = country;
        self.updated_at = Utc::now();
    }
}
