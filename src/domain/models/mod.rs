pub mod condition;
pub mod id;
pub mod request;
pub mod response;
pub mod selector;
pub mod timestamp;
pub mod url;

pub use self::condition::Condition;
pub use self::id::Id;
pub use self::request::{PollOptions, PollRequest};
pub use self::response::Response;
pub use self::selector::Selector;
pub use self::timestamp::Timestamp;
pub use self::url::Url;

/// A configured poll target: what to request, how often, and when to stop.
#[derive(Debug, Clone)]
pub struct Target {
    pub request: PollRequest,
    pub options: PollOptions,
    pub condition: Condition,
}
