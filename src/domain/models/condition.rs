use serde_derive::Deserialize;

use crate::domain::{Response, Selector};

/// A declarative stop condition for config-driven targets.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Condition {
    /// The response status equals `code`.
    Status { code: u16 },
    /// The body is JSON and the value at `pointer` (RFC 6901) equals `equals`.
    Json {
        pointer: String,
        equals: serde_json::Value,
    },
    /// The body contains `text`.
    Contains { text: String },
    /// The body is HTML with an element matching `selector`, and if `contains`
    /// is set, one of the matched elements' text contains it.
    Html {
        selector: Selector,
        contains: Option<String>,
    },
}

impl Condition {
    pub fn is_met(&self, response: &Response) -> bool {
        match self {
            Condition::Status { code } => response.status == *code,
            Condition::Json { pointer, equals } => match response.json() {
                Ok(body) => body.pointer(pointer) == Some(equals),
                Err(_) => false,
            },
            Condition::Contains { text } => response.text().contains(text.as_str()),
            Condition::Html {
                selector,
                contains: None,
            } => selector.matches(response.text()),
            Condition::Html {
                selector,
                contains: Some(text),
            } => selector
                .select_text(response.text())
                .iter()
                .any(|x| x.contains(text.as_str())),
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Status { code: 200 }
    }
}
