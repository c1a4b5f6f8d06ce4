use serde::Deserialize;

use std::{cmp::Ordering, fmt::Display};

/// A CSS selector, parsed once when it is created.
#[derive(Clone)]
pub struct Selector {
    source: String,
    parsed: scraper::Selector,
}
impl Selector {
    pub fn new(selector: String) -> Result<Self, SelectorParseError> {
        let parsed = match scraper::Selector::parse(selector.as_str()) {
            Ok(x) => x,
            Err(_) => return Err(SelectorParseError),
        };

        Ok(Self {
            source: selector,
            parsed,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the text of every element in `html` matched by this selector,
    /// trimmed, empty ones dropped.
    pub fn select_text(&self, html: &str) -> Vec<String> {
        let doc = scraper::Html::parse_document(html);

        let texts: Vec<String> = doc
            .select(&self.parsed)
            .map(|x| x.text().collect::<String>())
            .map(|x| x.trim().to_owned())
            .filter(|x| !x.is_empty())
            .collect();
        texts
    }

    /// Whether `html` has at least one element matched by this selector.
    pub fn matches(&self, html: &str) -> bool {
        let doc = scraper::Html::parse_document(html);
        let found = doc.select(&self.parsed).next().is_some();
        found
    }
}
impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Selector").field(&self.source).finish()
    }
}
impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
impl Eq for Selector {}
impl PartialOrd for Selector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Selector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source.cmp(&other.source)
    }
}
impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(SelectorVisitor)
    }
}

struct SelectorVisitor;
impl<'de> serde::de::Visitor<'de> for SelectorVisitor {
    type Value = Selector;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "valid css selector")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match Selector::new(s.to_owned()) {
            Ok(x) => Ok(x),
            Err(_e) => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(s),
                &self,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectorParseError;
impl Display for SelectorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("failed to parse the selector.")
    }
}
impl std::error::Error for SelectorParseError {}
