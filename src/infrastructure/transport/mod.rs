pub mod http_transport;
pub mod tokio_sleeper;

pub use self::http_transport::HttpTransport;
pub use self::tokio_sleeper::TokioSleeper;
