//! Parsing of hosted-payment-page registration responses.
//!
//! The bank answers `register.do` with JSON on success but has been seen to
//! return XML or plain text, so the redirect URL is looked up in JSON fields
//! first and then through a fixed list of text patterns.

use std::sync::LazyLock;

use regex::Regex;

/// Text patterns tried in order when the body is not usable JSON.
const REDIRECT_PATTERNS: &[&str] = &[
    r#"(?i)formUrl["\s:=]+([^"'\s<>]+)"#,
    r"(?i)<formUrl>([^<]+)</formUrl>",
    r"(?i)formUrl=([^&\s]+)",
    r#"(?i)url["\s:=]+([^"'\s<>]+)"#,
];

static REDIRECT_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    REDIRECT_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
});

/// Fields of interest from a registration response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub form_url: Option<String>,
    pub order_id: Option<String>,
    pub error_message: Option<String>,
}

/// Parse a raw registration response body.
pub fn parse_registration(body: &str) -> Registration {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        let field = |k: &str| {
            map.get(k).and_then(|v| match v {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
        };
        return Registration {
            form_url: field("formUrl").or_else(|| field("url")),
            order_id: field("orderId"),
            error_message: field("errorMessage"),
        };
    }

    Registration {
        form_url: extract_redirect_from_text(body),
        ..Default::default()
    }
}

/// Convenience wrapper returning only the redirect URL.
pub fn extract_redirect_url(body: &str) -> Option<String> {
    parse_registration(body).form_url
}

fn extract_redirect_from_text(body: &str) -> Option<String> {
    REDIRECT_RES
        .iter()
        .find_map(|re| re.captures(body).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_string())
}

/// Convert a major-unit amount to the gateway's minor units.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
