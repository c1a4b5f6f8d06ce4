pub mod config_repository;
pub mod transport;

pub use self::config_repository::*;
pub use self::transport::*;
