use serde::Deserialize;

use std::{fmt::Display, str::FromStr};

/// An absolute URL that a poll session requests with GET.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Url(String);
impl Url {
    pub fn new(url: String) -> Result<Self, UrlParseError> {
        match url::Url::parse(url.as_ref()) {
            Ok(parsed) if parsed.has_host() => Ok(Self(url)),
            _ => Err(UrlParseError),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.0
    }
}
impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
impl Display for Url {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for Url {
    type Err = UrlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::new(s.to_owned())
    }
}
impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(UrlVisitor)
    }
}

struct UrlVisitor;
impl<'de> serde::de::Visitor<'de> for UrlVisitor {
    type Value = Url;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "valid URL")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match Url::new(s.to_owned()) {
            Ok(x) => Ok(x),
            Err(_e) => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(s),
                &self,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UrlParseError;
impl Display for UrlParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("failed to parse the URL.")
    }
}
impl std::error::Error for UrlParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_http_urls() {
        let url: Url = "http://localhost:8080/jobs/1?full=true".parse().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/jobs/1?full=true");
    }

    #[test]
    fn rejects_relative_and_hostless_urls() {
        assert_eq!("/jobs/1".parse::<Url>(), Err(UrlParseError));
        assert_eq!("mailto:ops@example.com".parse::<Url>(), Err(UrlParseError));
    }
}
