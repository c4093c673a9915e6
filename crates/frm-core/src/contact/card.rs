//! In-memory contact card: an ordered list of properties
//!
//! Properties keep their source order, spelling, and group prefix so a card
//! read from disk is written back with only the touched properties changed.

/// Formatted (display) name property
pub const FIELD_FORMATTED_NAME: &str = "FN";
/// Structured name property
pub const FIELD_NAME: &str = "N";
pub const FIELD_EMAIL: &str = "EMAIL";
pub const FIELD_TELEPHONE: &str = "TEL";
pub const FIELD_ORGANIZATION: &str = "ORG";
pub const FIELD_URL: &str = "URL";
pub const FIELD_VERSION: &str = "VERSION";

/// A single property value with its parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Field {
    pub value: String,
    /// Parameters in source order, as spelled
    pub params: Vec<(String, String)>,
    /// Property group prefix (`item1` in `item1.EMAIL`)
    pub group: Option<String>,
}

impl Field {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            params: Vec::new(),
            group: None,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// vCard 4 `PREF=n` rank, lower is more preferred
    fn pref_rank(&self) -> Option<u32> {
        self.params
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("PREF"))
            .and_then(|(_, value)| value.trim().parse().ok())
    }

    /// vCard 3 `TYPE=pref` marker
    fn has_type_pref(&self) -> bool {
        self.params.iter().any(|(name, value)| {
            name.eq_ignore_ascii_case("TYPE")
                && value
                    .split(',')
                    .any(|t| t.trim().eq_ignore_ascii_case("pref"))
        })
    }
}

/// A contact card. Property names match case-insensitively but keep the
/// spelling they were read or set with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Card {
    properties: Vec<(String, Field)>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    fn matching<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a Field> + 'n
    where
        'a: 'n,
    {
        self.properties
            .iter()
            .filter(move |(own, _)| own.eq_ignore_ascii_case(name))
            .map(|(_, field)| field)
    }

    /// All fields for a property, in source order
    pub fn fields(&self, name: &str) -> Vec<&Field> {
        self.matching(name).collect()
    }

    /// The preferred value of a property, or `None` when absent.
    ///
    /// A field with the lowest `PREF` rank wins, then one tagged `TYPE=pref`,
    /// then the first field.
    pub fn preferred_value(&self, name: &str) -> Option<&str> {
        let ranked = self
            .matching(name)
            .filter_map(|f| f.pref_rank().map(|rank| (rank, f)))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, f)| f);
        ranked
            .or_else(|| self.matching(name).find(|f| f.has_type_pref()))
            .or_else(|| self.matching(name).next())
            .map(|f| f.value.as_str())
    }

    /// Replace all fields of a property with a single value.
    ///
    /// The first existing field is updated in place, keeping its position,
    /// group, and parameters. Without one the property is appended.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let mut kept = false;
        self.properties.retain_mut(|(own, field)| {
            if !own.eq_ignore_ascii_case(name) {
                return true;
            }
            if kept {
                return false;
            }
            kept = true;
            field.value.clone_from(&value);
            true
        });
        if !kept {
            self.properties.push((name.to_string(), Field::new(value)));
        }
    }

    /// Append a field to a property
    pub fn add(&mut self, name: &str, field: Field) {
        self.properties.push((name.to_string(), field));
    }

    /// Remove a property entirely; returns whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.properties.len();
        self.properties
            .retain(|(own, _)| !own.eq_ignore_ascii_case(name));
        self.properties.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matching(name).next().is_some()
    }

    /// Iterate `(name, field)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.properties
            .iter()
            .map(|(name, field)| (name.as_str(), field))
    }

    /// Non-empty values of a property, in source order
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.matching(name)
            .map(|f| f.value.as_str())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Display name (`FN`), empty when missing
    pub fn display_name(&self) -> &str {
        self.preferred_value(FIELD_FORMATTED_NAME).unwrap_or("")
    }
}
