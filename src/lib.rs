//! Data access for the `album` table of the `recordings` database.

pub mod config;
pub mod database;
pub mod logging;
pub mod model;

pub use config::{AppConfig, DatabaseConfig};
pub use database::{get_driver, AlbumRepository, DbError, DbResult};
pub use model::{Album, AlbumCreate, AlbumId};
