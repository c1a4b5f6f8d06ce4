use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
    num::NonZeroU32,
    time::Duration,
};

use serde_derive::Deserialize;

use crate::domain::{
    config_repository::ConfigRepository, Condition, Id, PollOptions, PollRequest, Target, Url,
};

const DEFAULT_INTERVAL_MS: u64 = 1000;

#[derive(Deserialize, Clone)]
struct TomlTarget {
    url: Url,
    data: Option<BTreeMap<String, String>>,
    interval_ms: Option<u64>,
    max_attempts: Option<NonZeroU32>,
    condition: Option<Condition>,
}
impl From<TomlTarget> for Target {
    fn from(t: TomlTarget) -> Self {
        let TomlTarget {
            url,
            data,
            interval_ms,
            max_attempts,
            condition,
        } = t;
        Target {
            request: PollRequest { url, data },
            options: PollOptions {
                interval: Duration::from_millis(interval_ms.unwrap_or(DEFAULT_INTERVAL_MS)),
                max_attempts,
            },
            condition: condition.unwrap_or_default(),
        }
    }
}

/// Reads targets from a TOML file, one table per target id.
///
/// The file is re-read on every `get_all`, so edits take effect on the next run.
pub struct TomlConfigRepository {
    path: String,
}
impl TomlConfigRepository {
    /// Opens `path` and checks that it parses.
    pub async fn new(path: &str) -> Result<Self, Error> {
        let repo = Self {
            path: path.to_owned(),
        };
        let _targets = repo.load().await?;

        Ok(repo)
    }

    async fn load(&self) -> Result<HashMap<Id, Target>, Error> {
        let toml = tokio::fs::read_to_string(&self.path).await?;
        parse(&toml)
    }
}

fn parse(toml: &str) -> Result<HashMap<Id, Target>, Error> {
    let map: HashMap<Id, TomlTarget> = toml::from_str(toml)?;
    let map = map
        .into_iter()
        .map(|(id, target)| (id, target.into()))
        .collect();
    Ok(map)
}

#[async_trait::async_trait]
impl ConfigRepository for TomlConfigRepository {
    type Error = Error;

    async fn get_all(&mut self) -> Result<HashMap<Id, Target>, Self::Error> {
        self.load().await
    }
}

#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    TomlError(toml::de::Error),
}
impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IoError(e) => f.write_fmt(format_args!("IO error: {e}")),
            Error::TomlError(e) => f.write_fmt(format_args!("Toml error: {e}")),
        }
    }
}
impl std::error::Error for Error {}
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e)
    }
}
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::TomlError(e)
    }
}
