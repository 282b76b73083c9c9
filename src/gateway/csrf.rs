//! Anti-forgery token lookup.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

use super::TokenSource;

/// Reads the token from a cookie, falling back to a hidden form field
pub struct DocumentTokenSource {
    cookie: String,
    field: String,
}

impl DocumentTokenSource {
    pub fn new(cookie: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            field: field.into(),
        }
    }

    fn from_cookie(&self) -> Option<String> {
        let doc = web_sys::window()?.document()?;
        let cookies = doc.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()?;
        cookie_value(&cookies, &self.cookie)
    }

    fn from_field(&self) -> Option<String> {
        let doc = web_sys::window()?.document()?;
        let selector = format!("input[name=\"{}\"]", self.field);
        let input = doc.query_selector(&selector).ok()??;
        let value = input.dyn_into::<web_sys::HtmlInputElement>().ok()?.value();
        (!value.is_empty()).then_some(value)
    }
}

impl TokenSource for DocumentTokenSource {
    fn token(&self) -> Option<String> {
        self.from_cookie().or_else(|| self.from_field())
    }
}

/// Find `name` in a `document.cookie` string and percent-decode its value
fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .and_then(|raw| percent_decode_str(raw).decode_utf8().ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}
