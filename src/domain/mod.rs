pub mod callbacks;
pub mod config_repository;
pub mod models;
pub mod sleeper;
pub mod transport;

pub use self::callbacks::*;
pub use self::config_repository::*;
pub use self::models::*;
pub use self::sleeper::*;
pub use self::transport::*;
