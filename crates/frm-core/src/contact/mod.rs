//! Contact records and the tracking metadata layered on them

pub mod card;
pub mod metadata;
pub mod vcard;

pub use card::{Card, Field};
pub use metadata::TrackingFields;

use card::{
    FIELD_EMAIL, FIELD_FORMATTED_NAME, FIELD_NAME, FIELD_ORGANIZATION, FIELD_TELEPHONE,
    FIELD_URL, FIELD_VERSION,
};

/// A contact record as held by one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    /// Store-relative path; stable across renames
    pub path: String,
    /// Content version at read time, checked on write
    pub etag: Option<String>,
    pub card: Card,
}

impl ContactRecord {
    pub fn new(path: impl Into<String>, card: Card) -> Self {
        Self {
            path: path.into(),
            etag: None,
            card,
        }
    }

    pub fn display_name(&self) -> &str {
        self.card.display_name()
    }

    pub fn tracking(&self) -> TrackingFields {
        TrackingFields::read(&self.card)
    }

    /// Case-insensitive exact display-name match
    pub fn name_matches(&self, name: &str) -> bool {
        let own = self.display_name();
        !own.is_empty() && own.to_lowercase() == name.to_lowercase()
    }
}

/// Optional details for a newly created contact
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub org: Option<String>,
    pub url: Option<String>,
}

impl NewContact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a vCard 3.0 card; `N` is split on the first space into
    /// given and family name.
    pub fn into_card(self) -> Card {
        let mut card = Card::new();
        card.set(FIELD_VERSION, "3.0");
        card.set(FIELD_FORMATTED_NAME, self.name.as_str());

        let (given, family) = self
            .name
            .split_once(' ')
            .unwrap_or((self.name.as_str(), ""));
        card.set(FIELD_NAME, format!("{family};{given};;;"));

        let optional = [
            (FIELD_EMAIL, self.email),
            (FIELD_TELEPHONE, self.phone),
            (FIELD_ORGANIZATION, self.org),
            (FIELD_URL, self.url),
        ];
        for (name, value) in optional {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                card.set(name, value);
            }
        }
        card
    }
}
