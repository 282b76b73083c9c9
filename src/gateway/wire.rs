//! Wire Formats
//!
//! Each resource kind has exactly one wire shape; it is converted into the
//! canonical [`ResourceItem`] here, before anything else sees it.

use serde::Deserialize;
use serde_json::Value;

use super::error::RequestError;
use crate::models::{ItemId, ResourceItem, ResourceKind, Schedule};

// ========================
// Item Shapes
// ========================

#[derive(Deserialize)]
struct ReviewWire {
    pk: ItemId,
    venue_name: String,
    rating: u8,
    #[serde(default)]
    user_username: Option<String>,
    #[serde(default)]
    sport_type: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    can_modify: bool,
}

#[derive(Deserialize)]
struct BookingWire {
    id: ItemId,
    venue_name: String,
    #[serde(default)]
    venue_image: Option<String>,
    #[serde(default)]
    booking_date: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    total_price: Option<f64>,
    #[serde(default)]
    can_modify: bool,
}

#[derive(Deserialize)]
struct VenueWire {
    id: ItemId,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    price: Option<u64>,
    #[serde(default)]
    capacity: Option<u32>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    time_display: Option<String>,
    #[serde(default)]
    can_modify: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<ReviewWire> for ResourceItem {
    fn from(w: ReviewWire) -> Self {
        let mut item = ResourceItem::new(ResourceKind::Review, w.pk, w.venue_name);
        item.subtitle = non_empty(w.user_username);
        item.category = non_empty(w.sport_type);
        item.rating = Some(w.rating.clamp(1, 5));
        item.body = non_empty(w.comment);
        item.image_url = non_empty(w.image_url);
        item.created_at = non_empty(w.created_at);
        item.can_modify = w.can_modify;
        item
    }
}

impl From<BookingWire> for ResourceItem {
    fn from(w: BookingWire) -> Self {
        let mut item = ResourceItem::new(ResourceKind::Booking, w.id, w.venue_name);
        item.image_url = non_empty(w.venue_image);
        item.schedule = Some(Schedule {
            date: non_empty(w.booking_date),
            start: non_empty(w.start_time),
            end: non_empty(w.end_time),
        });
        item.price = w.total_price.filter(|p| p.is_finite() && *p >= 0.0).map(|p| p.round() as u64);
        item.can_modify = w.can_modify;
        item
    }
}

fn venue_item(kind: ResourceKind, w: VenueWire) -> ResourceItem {
    let mut item = ResourceItem::new(kind, w.id, w.name);
    item.subtitle = non_empty(w.address);
    item.category = non_empty(w.category);
    item.price = w.price;
    item.capacity = w.capacity;
    item.image_url = non_empty(w.thumbnail);
    item.body = non_empty(w.time_display);
    item.can_modify = w.can_modify;
    item
}

/// Convert one wire record into the canonical item
fn normalize(kind: ResourceKind, value: &Value) -> Result<ResourceItem, RequestError> {
    let parsed = match kind {
        ResourceKind::Review => serde_json::from_value::<ReviewWire>(value.clone()).map(ResourceItem::from),
        ResourceKind::Booking => serde_json::from_value::<BookingWire>(value.clone()).map(ResourceItem::from),
        ResourceKind::Court | ResourceKind::Venue => {
            serde_json::from_value::<VenueWire>(value.clone()).map(|w| venue_item(kind, w))
        }
    };
    parsed.map_err(|e| contract(format!("malformed {}: {}", kind.noun(), e)))
}

fn contract(message: String) -> RequestError {
    RequestError::Server { status: 200, message }
}

// ========================
// Envelopes
// ========================

/// One page of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<ResourceItem>,
    /// Records the server sent, including any that failed to normalize
    pub returned: usize,
    pub has_more: bool,
}

/// Parse a list response: `{ items, has_more }`, or a plain array that is
/// the whole collection.
///
/// A paginated response without `has_more` is a contract violation and is
/// rejected rather than guessed.
pub fn parse_page(kind: ResourceKind, value: &Value) -> Result<Page, RequestError> {
    let (records, has_more) = match value {
        Value::Array(records) => (records, false),
        Value::Object(obj) => {
            let records = obj
                .get("items")
                .and_then(Value::as_array)
                .ok_or_else(|| contract("list response has no items array".to_string()))?;
            let Some(has_more) = obj.get("has_more").and_then(Value::as_bool) else {
                log::warn!("[GATEWAY] {} list response is missing has_more", kind.slug());
                return Err(contract("list response is missing has_more".to_string()));
            };
            (records, has_more)
        }
        _ => return Err(contract("list response is neither an array nor an object".to_string())),
    };

    let mut items = Vec::with_capacity(records.len());
    for record in records {
        match normalize(kind, record) {
            Ok(item) => items.push(item),
            Err(e) => log::warn!("[GATEWAY] skipping record: {}", e),
        }
    }

    Ok(Page {
        items,
        returned: records.len(),
        has_more,
    })
}

/// Parse `{ status: "success", data: {...} }`
pub fn parse_detail(kind: ResourceKind, value: &Value) -> Result<ResourceItem, RequestError> {
    let data = value
        .get("data")
        .ok_or_else(|| contract("detail response has no data".to_string()))?;
    normalize(kind, data)
}

/// What a create/edit/delete answered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationResult {
    pub message: Option<String>,
    pub item: Option<ResourceItem>,
    pub card_html: Option<String>,
    pub deleted_id: Option<ItemId>,
}

/// Parse `{ status: "ok"|"success", message, item | new_card_html |
/// updated_card_html, deleted_id }`. An empty body is a bare success.
pub fn parse_mutation(kind: ResourceKind, value: &Value) -> Result<MutationResult, RequestError> {
    if value.is_null() {
        return Ok(MutationResult::default());
    }

    match value.get("status").and_then(Value::as_str) {
        Some("ok") | Some("success") | None => {}
        Some(other) => return Err(contract(format!("unexpected mutation status {other:?}"))),
    }

    let item = match value.get("item") {
        Some(record) if !record.is_null() => Some(normalize(kind, record)?),
        _ => None,
    };
    let card_html = ["new_card_html", "updated_card_html"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string);
    let deleted_id = value
        .get("deleted_id")
        .filter(|id| !id.is_null())
        .and_then(|id| serde_json::from_value(id.clone()).ok());

    Ok(MutationResult {
        message: value.get("message").and_then(Value::as_str).map(str::to_string),
        item,
        card_html,
        deleted_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review(pk: u64) -> Value {
        json!({
            "pk": pk,
            "user_username": "budi",
            "venue_name": "GOR Senayan",
            "sport_type": "badminton",
            "rating": 4,
            "comment": "Lapangan bersih",
            "image_url": "",
            "created_at": "03 March 2025",
            "can_modify": true
        })
    }

    #[test]
    fn review_normalizes_to_canonical_item() {
        let item = normalize(ResourceKind::Review, &review(9)).unwrap();
        assert_eq!(item.id.as_str(), "9");
        assert_eq!(item.title, "GOR Senayan");
        assert_eq!(item.subtitle.as_deref(), Some("budi"));
        assert_eq!(item.rating, Some(4));
        assert_eq!(item.image_url, None);
        assert!(item.can_modify);
    }

    #[test]
    fn booking_price_and_schedule() {
        let item = normalize(
            ResourceKind::Booking,
            &json!({
                "id": 3,
                "venue_name": "Futsal Arena",
                "booking_date": "2025-03-03",
                "start_time": "08:00",
                "end_time": "10:00",
                "total_price": 150000.0
            }),
        )
        .unwrap();
        assert_eq!(item.price, Some(150000));
        let schedule = item.schedule.unwrap();
        assert_eq!(schedule.start.as_deref(), Some("08:00"));
        assert!(!item.can_modify);
    }

    #[test]
    fn venue_shape_serves_courts_too() {
        let item = normalize(ResourceKind::Court, &json!({"id": "lapangan-a", "name": "Lapangan A", "price": 90000})).unwrap();
        assert_eq!(item.kind, ResourceKind::Court);
        assert_eq!(item.id.as_str(), "lapangan-a");
        assert_eq!(item.price, Some(90000));
    }

    #[test]
    fn paginated_page_keeps_server_order() {
        let page = parse_page(
            ResourceKind::Review,
            &json!({"success": true, "items": [review(2), review(1)], "has_more": true}),
        )
        .unwrap();
        let ids: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert!(page.has_more);
        assert_eq!(page.returned, 2);
    }

    #[test]
    fn plain_array_is_a_complete_collection() {
        let page = parse_page(ResourceKind::Review, &json!([review(1)])).unwrap();
        assert!(!page.has_more);
    }

    #[test]
    fn missing_has_more_is_rejected() {
        let err = parse_page(ResourceKind::Review, &json!({"success": true, "items": [review(1)]})).unwrap_err();
        assert!(matches!(err, RequestError::Server { ref message, .. } if message.contains("has_more")));
    }

    #[test]
    fn malformed_records_are_skipped_but_counted() {
        let page = parse_page(
            ResourceKind::Review,
            &json!({"items": [review(1), {"pk": 2}], "has_more": false}),
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.returned, 2);
    }

    #[test]
    fn detail_unwraps_data() {
        let item = parse_detail(ResourceKind::Review, &json!({"status": "success", "data": review(5)})).unwrap();
        assert_eq!(item.body.as_deref(), Some("Lapangan bersih"));
        assert!(parse_detail(ResourceKind::Review, &json!({"status": "success"})).is_err());
    }

    #[test]
    fn mutation_with_card_html() {
        let result = parse_mutation(
            ResourceKind::Venue,
            &json!({"status": "ok", "message": "Venue created!", "new_card_html": "<div data-id=\"7\"></div>"}),
        )
        .unwrap();
        assert_eq!(result.message.as_deref(), Some("Venue created!"));
        assert!(result.card_html.unwrap().contains("data-id"));
        assert!(result.item.is_none());
    }

    #[test]
    fn mutation_with_item_and_deleted_id() {
        let result = parse_mutation(
            ResourceKind::Review,
            &json!({"status": "success", "item": review(4), "deleted_id": 11}),
        )
        .unwrap();
        assert_eq!(result.item.unwrap().id.as_str(), "4");
        assert_eq!(result.deleted_id, Some(ItemId::new("11")));
    }

    #[test]
    fn bare_success_and_empty_body() {
        assert_eq!(
            parse_mutation(ResourceKind::Review, &json!({"status": "success"})).unwrap(),
            MutationResult::default()
        );
        assert_eq!(parse_mutation(ResourceKind::Review, &Value::Null).unwrap(), MutationResult::default());
    }
}
