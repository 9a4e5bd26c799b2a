//! Advertisement record and its create/update payloads
//!
//! Payloads are built from untrusted `serde_json::Value` bodies. Fields are
//! checked in declaration order (title, description, owner) and the first
//! violation wins.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;

use super::ValidationError;

/// Minimum length for advertisement titles, in characters
pub const MIN_TITLE_LEN: usize = 5;

/// Stored advertisement, also its JSON representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Advertisement {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub owner: String,
    pub creation_date: NaiveDateTime,
}

/// Validated advertisement title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdTitle(String);

impl AdTitle {
    /// Create a new title.
    ///
    /// # Example
    /// ```
    /// use adboard_server::models::AdTitle;
    ///
    /// assert!(AdTitle::new("Sell bike").is_ok());
    /// assert!(AdTitle::new("bike").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.chars().count() < MIN_TITLE_LEN {
            return Err(ValidationError::TooShort {
                field: "title",
                min: MIN_TITLE_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated payload for creating an advertisement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAdvertisement {
    pub title: AdTitle,
    pub description: String,
    pub owner: String,
}

impl CreateAdvertisement {
    /// Validate a create body: all three fields required, all strings.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(body)?;

        let title = required_string(obj, "title")?;
        let title = AdTitle::new(&title)?;
        let description = required_string(obj, "description")?;
        let owner = required_string(obj, "owner")?;

        Ok(Self {
            title,
            description,
            owner,
        })
    }
}

/// One supplied field of a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvertisementField {
    Title(AdTitle),
    Description(String),
    Owner(String),
}

/// Validated partial update: only the fields present in the request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertisementPatch {
    fields: Vec<AdvertisementField>,
}

impl AdvertisementPatch {
    /// Validate an update body. Absent fields are skipped, present ones
    /// must be strings and a present title must meet the minimum length.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(body)?;
        let mut fields = Vec::new();

        if let Some(title) = optional_string(obj, "title")? {
            fields.push(AdvertisementField::Title(AdTitle::new(&title)?));
        }
        if let Some(description) = optional_string(obj, "description")? {
            fields.push(AdvertisementField::Description(description));
        }
        if let Some(owner) = optional_string(obj, "owner")? {
            fields.push(AdvertisementField::Owner(owner));
        }

        Ok(Self { fields })
    }

    /// Apply the supplied fields to a fetched record. `id` and
    /// `creation_date` are never touched.
    pub fn apply(self, ad: &mut Advertisement) {
        for field in self.fields {
            match field {
                AdvertisementField::Title(title) => ad.title = title.into_string(),
                AdvertisementField::Description(description) => ad.description = description,
                AdvertisementField::Owner(owner) => ad.owner = owner,
            }
        }
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or(ValidationError::NotAnObject)
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::NotAString { field }),
    }
}

fn required_string(obj: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    optional_string(obj, field)?.ok_or(ValidationError::Missing { field })
}
