//! Frontend Models
//!
//! Canonical shapes every panel works with, independent of the wire format
//! a given endpoint speaks.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable server identifier of a resource (numeric pk or slug)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ItemId::from(n),
            RawId::Text(s) => ItemId(s),
        })
    }
}

/// Resource types served by the panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Review,
    Booking,
    Court,
    Venue,
}

impl ResourceKind {
    /// Short name used in log prefixes and DOM ids
    pub fn slug(&self) -> &'static str {
        match self {
            ResourceKind::Review => "reviews",
            ResourceKind::Booking => "bookings",
            ResourceKind::Court => "courts",
            ResourceKind::Venue => "venues",
        }
    }

    /// Singular noun for buttons and toasts
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Review => "review",
            ResourceKind::Booking => "booking",
            ResourceKind::Court => "court",
            ResourceKind::Venue => "venue",
        }
    }
}

/// Date and time range of a booking
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Schedule {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// One server-owned record, as cached for rendering
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceItem {
    pub id: ItemId,
    pub kind: ResourceKind,
    pub title: String,
    /// Author for reviews, location for bookings and venues
    pub subtitle: Option<String>,
    pub category: Option<String>,
    pub rating: Option<u8>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
    pub schedule: Option<Schedule>,
    pub price: Option<u64>,
    pub capacity: Option<u32>,
    pub can_modify: bool,
    /// Server-rendered card markup, rendered verbatim when present
    pub card_html: Option<String>,
}

impl ResourceItem {
    pub fn new(kind: ResourceKind, id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            subtitle: None,
            category: None,
            rating: None,
            body: None,
            image_url: None,
            created_at: None,
            schedule: None,
            price: None,
            capacity: None,
            can_modify: false,
            card_html: None,
        }
    }

    /// Wrap server card markup. The id comes from `id` when known, else
    /// from the markup's `data-id` attribute.
    pub fn from_card_html(kind: ResourceKind, html: &str, id: Option<ItemId>) -> Option<Self> {
        let id = id.or_else(|| card_id(html))?;
        let mut item = Self::new(kind, id, String::new());
        item.card_html = Some(html.to_string());
        Some(item)
    }
}

/// Extract the first `data-id` attribute value from card markup
pub fn card_id(html: &str) -> Option<ItemId> {
    let start = html.find("data-id=")? + "data-id=".len();
    let rest = &html[start..];
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(ItemId::new(value))
    }
}
