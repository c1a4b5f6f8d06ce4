use serde::Deserialize;
use std::fmt::Display;

/// Names a poll target, both in config files and in log lines.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(String);
impl Id {
    /// Generates a random id for targets that were not named by the user.
    pub fn new() -> Self {
        let mut buf = [0u8; 32];
        let s = uuid::Uuid::new_v4().simple().encode_lower(&mut buf);
        Self(s.to_owned())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}
impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
impl TryFrom<String> for Id {
    type Error = FromStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err(FromStringError {})
        } else {
            Ok(Self(value))
        }
    }
}
impl std::str::FromStr for Id {
    type Err = FromStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::try_from(s.to_owned())
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(IdVisitor)
    }
}

struct IdVisitor;
impl<'de> serde::de::Visitor<'de> for IdVisitor {
    type Value = Id;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "a non-empty string")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match Id::try_from(s.to_owned()) {
            Ok(x) => Ok(x),
            Err(_e) => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(s),
                &self,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FromStringError {}
impl Display for FromStringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Id must be a non-empty string.")
    }
}

impl std::error::Error for FromStringError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_hex() {
        let a = Id::new();
        let b = Id::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().bytes().all(|x| x.is_ascii_hexdigit()));
    }

    #[test]
    fn empty_string_is_not_an_id() {
        assert!(Id::try_from(String::new()).is_err());
        assert_eq!("build".parse::<Id>().unwrap().as_str(), "build");
    }
}
