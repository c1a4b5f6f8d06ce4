use std::time::Duration;

/// Waits between unsatisfied attempts.
#[async_trait::async_trait]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}
