use crate::domain::{PollRequest, Response};

/// Issues one GET for a poll attempt.
///
/// Any status the server answers with is a `Response`; `Err` is reserved for
/// failures that left no usable response (DNS, refused connection, timeout,
/// broken body).
#[async_trait::async_trait]
pub trait Transport {
    type Error: std::error::Error + Send;

    async fn get(&self, request: &PollRequest) -> Result<Response, Self::Error>;
}
