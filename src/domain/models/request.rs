use std::{collections::BTreeMap, num::NonZeroU32, time::Duration};

use crate::domain::Url;

/// What to request on every attempt of a poll session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    pub url: Url,
    /// Extra query parameters sent with each GET.
    pub data: Option<BTreeMap<String, String>>,
}
impl PollRequest {
    pub fn new(url: Url) -> Self {
        Self { url, data: None }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// How a session paces its attempts.
///
/// `max_attempts` is `None` unless set explicitly, in which case a session
/// keeps polling until the condition holds, the transport fails, or it is
/// cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    pub max_attempts: Option<NonZeroU32>,
}
impl PollOptions {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: NonZeroU32) -> Self {
        self.max_attempts = max_attempts.into();
        self
    }
}
