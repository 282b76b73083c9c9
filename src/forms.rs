//! Create/Edit Forms
//!
//! Static field schemas per resource kind, the values a form holds while
//! open, and their conversion to the JSON body the server expects.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::gateway::FieldErrors;
use crate::models::{ItemId, ResourceItem, ResourceKind};

pub const SPORT_TYPES: &[(&str, &str)] = &[
    ("soccer", "Soccer"),
    ("tennis", "Tennis"),
    ("badminton", "Badminton"),
    ("futsal", "Futsal"),
    ("basket", "Basket"),
];

/// Name of the field carried by the rating widget
pub const RATING_FIELD: &str = "rating";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    Time,
    Url,
    Select(&'static [(&'static str, &'static str)]),
    Rating,
}

impl FieldKind {
    /// `type` attribute for `<input>` based kinds
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Url => "url",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required,
        placeholder,
    }
}

const REVIEW_FIELDS: &[FieldSpec] = &[
    field("venue_name", "Venue", FieldKind::Text, true, "e.g. Cilandak Sport Center"),
    field("sport_type", "Sport", FieldKind::Select(SPORT_TYPES), true, ""),
    field(RATING_FIELD, "Rating", FieldKind::Rating, true, ""),
    field("comment", "Comment", FieldKind::TextArea, true, "Tell others about your experience..."),
    field("image_url", "Image URL", FieldKind::Url, false, "https://example.com/photo.png (optional)"),
];

const BOOKING_FIELDS: &[FieldSpec] = &[
    field("booking_date", "Date", FieldKind::Date, true, ""),
    field("start_time", "Start", FieldKind::Time, true, ""),
    field("end_time", "End", FieldKind::Time, true, ""),
];

const VENUE_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true, "e.g. LapaNG Futsal Center"),
    field("category", "Category", FieldKind::Select(SPORT_TYPES), true, ""),
    field("address", "Address", FieldKind::Text, false, "e.g. Jl. Margonda Raya No. 100, Depok"),
    field("price", "Price per hour", FieldKind::Number, false, "50000"),
    field("capacity", "Capacity", FieldKind::Number, false, "10"),
    field("thumbnail", "Thumbnail", FieldKind::Text, false, "my_venue.jpg or https://..."),
];

pub fn schema(kind: ResourceKind) -> &'static [FieldSpec] {
    match kind {
        ResourceKind::Review => REVIEW_FIELDS,
        ResourceKind::Booking => BOOKING_FIELDS,
        ResourceKind::Court | ResourceKind::Venue => VENUE_FIELDS,
    }
}

pub fn has_rating(kind: ResourceKind) -> bool {
    schema(kind).iter().any(|f| f.kind == FieldKind::Rating)
}

// ========================
// Values
// ========================

/// Text values keyed by field name, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// Empty values, with selects on their first option
    pub fn blank(kind: ResourceKind) -> Self {
        let mut values = Self::default();
        for spec in schema(kind) {
            if let FieldKind::Select(options) = spec.kind {
                if let Some((value, _)) = options.first() {
                    values.set(spec.name, *value);
                }
            }
        }
        values
    }

    /// Values for editing an existing item
    pub fn prefill(item: &ResourceItem) -> Self {
        let mut values = Self::blank(item.kind);
        let mut put = |name: &str, value: Option<&str>| {
            if let Some(v) = value {
                values.set(name, v);
            }
        };
        match item.kind {
            ResourceKind::Review => {
                put("venue_name", Some(&item.title));
                put("sport_type", item.category.as_deref());
                put("comment", item.body.as_deref());
                put("image_url", item.image_url.as_deref());
            }
            ResourceKind::Booking => {
                let schedule = item.schedule.clone().unwrap_or_default();
                put("booking_date", schedule.date.as_deref());
                put("start_time", schedule.start.as_deref());
                put("end_time", schedule.end.as_deref());
            }
            ResourceKind::Court | ResourceKind::Venue => {
                put("name", Some(&item.title));
                put("category", item.category.as_deref());
                put("address", item.subtitle.as_deref());
                put("price", item.price.map(|p| p.to_string()).as_deref());
                put("capacity", item.capacity.map(|c| c.to_string()).as_deref());
                put("thumbnail", item.image_url.as_deref());
            }
        }
        values
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// JSON body for submission. Numbers that parse are sent as numbers;
    /// anything else goes as typed so the server can report it.
    pub fn to_json(&self, kind: ResourceKind, rating: Option<u8>) -> Value {
        let mut body = Map::new();
        for spec in schema(kind) {
            let value = match spec.kind {
                FieldKind::Rating => match rating {
                    Some(r) => Value::from(r),
                    None => continue,
                },
                FieldKind::Number => {
                    let raw = self.get(spec.name).trim();
                    if raw.is_empty() {
                        Value::Null
                    } else {
                        raw.parse::<u64>().map(Value::from).unwrap_or_else(|_| Value::from(raw))
                    }
                }
                _ => Value::from(self.get(spec.name).trim()),
            };
            body.insert(spec.name.to_string(), value);
        }
        Value::Object(body)
    }
}

// ========================
// Form State
// ========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ItemId),
}

/// One panel's open form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub mode: Option<FormMode>,
    pub values: FormValues,
    pub errors: FieldErrors,
    /// Edit form waiting for its detail fetch
    pub loading: bool,
}

impl FormState {
    pub fn create(kind: ResourceKind) -> Self {
        Self {
            mode: Some(FormMode::Create),
            values: FormValues::blank(kind),
            errors: FieldErrors::default(),
            loading: false,
        }
    }

    pub fn edit(kind: ResourceKind, id: ItemId) -> Self {
        Self {
            mode: Some(FormMode::Edit(id)),
            values: FormValues::blank(kind),
            errors: FieldErrors::default(),
            loading: true,
        }
    }

    pub fn field_errors(&self, name: &str) -> Vec<String> {
        self.errors.for_field(name).to_vec()
    }
}
