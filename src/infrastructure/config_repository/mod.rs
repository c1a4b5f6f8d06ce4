pub mod static_config_repository;
pub mod toml_config_repository;

pub use self::static_config_repository::StaticConfigRepository;
pub use self::toml_config_repository::TomlConfigRepository;
