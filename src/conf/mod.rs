mod catalog;
mod config;
mod geocoding;
mod server;
mod table;

pub use catalog::StatusCatalog;
pub use config::Config;
pub use geocoding::GeocodingConfig;
pub use server::ServerConfig;
pub use table::{DataConfig, TableConfig};
