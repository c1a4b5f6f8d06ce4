//! Deterministic stand-ins for the network and the clock.

use std::{
    collections::VecDeque,
    fmt::Display,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use crate::domain::{PollRequest, Response, Sleeper, Transport};

/// Everything the doubles observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Get(String),
    Sleep(Duration),
}

pub type Timeline = Arc<Mutex<Vec<Event>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedError(pub String);
impl Display for ScriptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
impl std::error::Error for ScriptedError {}

/// Answers each GET with the next scripted result. Once the script runs dry,
/// requests never complete.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Response, ScriptedError>>>,
    timeline: Timeline,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<Response, ScriptedError>>, timeline: Timeline) -> Self {
        Self {
            script: Mutex::new(script.into()),
            timeline,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> usize {
        self.timeline
            .lock()
            .unwrap()
            .iter()
            .filter(|x| matches!(x, Event::Get(_)))
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    type Error = ScriptedError;

    async fn get(&self, request: &PollRequest) -> Result<Response, Self::Error> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.timeline
            .lock()
            .unwrap()
            .push(Event::Get(request.url.to_string()));

        tokio::task::yield_now().await;

        let next = self.script.lock().unwrap().pop_front();
        let result = match next {
            Some(x) => x,
            None => std::future::pending().await,
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Records the requested duration and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    timeline: Timeline,
}

impl RecordingSleeper {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.timeline
            .lock()
            .unwrap()
            .iter()
            .filter_map(|x| match x {
                Event::Sleep(d) => Some(*d),
                Event::Get(_) => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.timeline.lock().unwrap().push(Event::Sleep(duration));
    }
}

/// A JSON job document with the given state.
pub fn job(state: &str) -> Result<Response, ScriptedError> {
    Ok(Response::new(200, format!(r#"{{"status":"{state}"}}"#)))
}

pub fn failure(message: &str) -> Result<Response, ScriptedError> {
    Err(ScriptedError(message.to_owned()))
}
