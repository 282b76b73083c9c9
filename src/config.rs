//! Page configuration
//!
//! Read once at startup from `window.LAPA_CONFIG`, else from a
//! `<script id="lapa-config" type="application/json">` element, else the
//! built-in defaults. Every field has a default so partial objects work.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::models::{ItemId, ResourceKind};

const GLOBAL_NAME: &str = "LAPA_CONFIG";
const SCRIPT_ID: &str = "lapa-config";

/// Escapes everything but RFC 3986 unreserved characters
pub const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub modal_settle_ms: u32,
    pub toast_duration_ms: u32,
    pub toast_fade_ms: u32,
    pub scroll_threshold_px: i32,
    pub csrf_cookie: String,
    pub csrf_field: String,
    pub csrf_header: String,
    pub panels: Vec<PanelSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            modal_settle_ms: 300,
            toast_duration_ms: 3000,
            toast_fade_ms: 300,
            scroll_threshold_px: 200,
            csrf_cookie: "csrftoken".to_string(),
            csrf_field: "csrfmiddlewaretoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            panels: default_panels(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Resolve the configuration for this page
    pub fn load() -> Self {
        match from_global().or_else(from_script) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                // console_log is not up yet; the error goes straight to the console
                web_sys::console::warn_1(&JsValue::from_str(&format!("invalid page config, using defaults: {e}")));
                Self::default()
            }
            None => Self::default(),
        }
    }
}

fn from_global() -> Option<Result<AppConfig, String>> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(GLOBAL_NAME)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string()))
}

fn from_script() -> Option<Result<AppConfig, String>> {
    let document = web_sys::window()?.document()?;
    let text = document.get_element_by_id(SCRIPT_ID)?.text_content()?;
    Some(AppConfig::from_json(&text).map_err(|e| e.to_string()))
}

// ========================
// Panels
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterSpec {
    pub key: String,
    pub label: String,
    pub empty_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Pagination {
    /// Infinite scroll over `offset`/`limit`
    Offset { limit: u32 },
    /// Numbered pages over `page`/`per_page`
    Pages { per_page: u32 },
    /// Endpoint returns the whole collection as a plain array
    None,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanelSpec {
    pub kind: ResourceKind,
    pub title: String,
    pub list_url: String,
    #[serde(default = "default_filter_param")]
    pub filter_param: String,
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    #[serde(default = "default_pagination")]
    pub pagination: Pagination,
    #[serde(default)]
    pub detail_url: Option<String>,
    #[serde(default)]
    pub create_url: Option<String>,
    #[serde(default)]
    pub edit_url: Option<String>,
    #[serde(default)]
    pub delete_url: Option<String>,
}

fn default_filter_param() -> String {
    "filter".to_string()
}

fn default_pagination() -> Pagination {
    Pagination::Offset { limit: 10 }
}

impl PanelSpec {
    /// Filter selected when the panel first loads
    pub fn initial_filter(&self) -> String {
        self.filters.first().map(|f| f.key.clone()).unwrap_or_default()
    }

    pub fn filter(&self, key: &str) -> Option<&FilterSpec> {
        self.filters.iter().find(|f| f.key == key)
    }

    pub fn empty_message(&self, filter: &str) -> String {
        match self.filter(filter) {
            Some(f) => f.empty_message.clone(),
            None => format!("No {} yet.", self.kind.slug()),
        }
    }

    pub fn detail_url(&self, id: &ItemId) -> Option<String> {
        self.detail_url.as_deref().map(|t| expand(t, id))
    }

    pub fn edit_url(&self, id: &ItemId) -> Option<String> {
        self.edit_url.as_deref().map(|t| expand(t, id))
    }

    pub fn delete_url(&self, id: &ItemId) -> Option<String> {
        self.delete_url.as_deref().map(|t| expand(t, id))
    }

    pub fn can_create(&self) -> bool {
        self.create_url.is_some()
    }
}

fn expand(template: &str, id: &ItemId) -> String {
    template.replace("{id}", &utf8_percent_encode(id.as_str(), URL_COMPONENT).to_string())
}

fn filter(key: &str, label: &str, empty_message: &str) -> FilterSpec {
    FilterSpec {
        key: key.to_string(),
        label: label.to_string(),
        empty_message: empty_message.to_string(),
    }
}

fn default_panels() -> Vec<PanelSpec> {
    vec![
        PanelSpec {
            kind: ResourceKind::Review,
            title: "Reviews".to_string(),
            list_url: "/reviews/get-reviews/".to_string(),
            filter_param: default_filter_param(),
            filters: vec![
                filter("all", "All reviews", "No reviews yet. Be the first to write one!"),
                filter("my_reviews", "My reviews", "You have not written any reviews yet."),
            ],
            pagination: Pagination::Offset { limit: 10 },
            detail_url: Some("/reviews/get-review-detail/{id}/".to_string()),
            create_url: Some("/reviews/add-review/".to_string()),
            edit_url: Some("/reviews/edit-review/{id}/".to_string()),
            delete_url: Some("/reviews/delete-review/{id}/".to_string()),
        },
        PanelSpec {
            kind: ResourceKind::Booking,
            title: "My bookings".to_string(),
            list_url: "/dashboard/".to_string(),
            filter_param: "type".to_string(),
            filters: vec![filter("bookings", "Bookings", "You have no bookings yet.")],
            pagination: Pagination::Offset { limit: 12 },
            detail_url: Some("/booking/edit/{id}/".to_string()),
            create_url: None,
            edit_url: Some("/booking/edit/{id}/".to_string()),
            delete_url: Some("/booking/remove_from_cart/{id}/".to_string()),
        },
        PanelSpec {
            kind: ResourceKind::Court,
            title: "My courts".to_string(),
            list_url: "/dashboard/".to_string(),
            filter_param: "type".to_string(),
            filters: vec![filter("my_courts", "My courts", "You have not listed any courts yet.")],
            pagination: Pagination::Offset { limit: 12 },
            detail_url: Some("/venue/{id}/".to_string()),
            create_url: Some("/venue/add/".to_string()),
            edit_url: Some("/venue/{id}/edit/".to_string()),
            delete_url: Some("/venue/{id}/delete/".to_string()),
        },
        PanelSpec {
            kind: ResourceKind::Venue,
            title: "Venues".to_string(),
            list_url: "/filter-venues/".to_string(),
            filter_param: "category".to_string(),
            filters: vec![
                filter("", "All", "No venues found."),
                filter("soccer", "Soccer", "No soccer venues found."),
                filter("tennis", "Tennis", "No tennis venues found."),
                filter("badminton", "Badminton", "No badminton venues found."),
                filter("futsal", "Futsal", "No futsal venues found."),
                filter("basket", "Basket", "No basketball venues found."),
            ],
            pagination: Pagination::Pages { per_page: 9 },
            detail_url: Some("/venue/{id}/".to_string()),
            create_url: None,
            edit_url: None,
            delete_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_four_panels() {
        let config = AppConfig::default();
        let kinds: Vec<_> = config.panels.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            [ResourceKind::Review, ResourceKind::Booking, ResourceKind::Court, ResourceKind::Venue]
        );
        assert_eq!(config.modal_settle_ms, 300);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"log_level": "debug", "toast_duration_ms": 5000}"#).unwrap();
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.toast_duration_ms, 5000);
        assert_eq!(config.csrf_header, "X-CSRFToken");
        assert_eq!(config.panels.len(), 4);
    }

    #[test]
    fn panel_json_with_pagination_modes() {
        let config = AppConfig::from_json(
            r#"{"panels": [
                {"kind": "review", "title": "R", "list_url": "/r/",
                 "pagination": {"mode": "none"}},
                {"kind": "venue", "title": "V", "list_url": "/v/",
                 "pagination": {"mode": "pages", "per_page": 6}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(config.panels[0].pagination, Pagination::None);
        assert_eq!(config.panels[0].filter_param, "filter");
        assert_eq!(config.panels[1].pagination, Pagination::Pages { per_page: 6 });
    }

    #[test]
    fn url_templates_expand_ids() {
        let spec = &AppConfig::default().panels[0];
        assert_eq!(
            spec.delete_url(&ItemId::new("42")).as_deref(),
            Some("/reviews/delete-review/42/")
        );
        assert_eq!(spec.initial_filter(), "all");
        assert_eq!(spec.empty_message("my_reviews"), "You have not written any reviews yet.");
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
