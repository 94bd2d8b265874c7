use log::info;
use url::Url;

pub mod postgres;
pub mod mock;

use crate::config::DatabaseConfig;
use crate::model::{Album, AlbumCreate, AlbumId};
use super::{DbError, DbResult};

/// CRUD access to the `album` table.
///
/// Every call is one round trip; nothing is held between calls.
pub trait AlbumRepository {
    /// Scheme of the driver backing this repository, e.g. `postgresql`.
    fn driver_name(&self) -> &'static str;

    /// All albums by `name`. No match is an empty vec, not an error.
    fn albums_by_artist(&mut self, name: &str) -> DbResult<Vec<Album>>;

    /// Fails with [`DbError::NotFound`] when no row has this id.
    fn album_by_id(&mut self, id: AlbumId) -> DbResult<Album>;

    fn add_album(&mut self, album: &AlbumCreate) -> DbResult<AlbumId>;

    /// Deleting an id that does not exist succeeds.
    fn remove_album(&mut self, id: AlbumId) -> DbResult<()>;
}

impl<R: AlbumRepository + ?Sized> AlbumRepository for Box<R> {
    fn driver_name(&self) -> &'static str {
        (**self).driver_name()
    }

    fn albums_by_artist(&mut self, name: &str) -> DbResult<Vec<Album>> {
        (**self).albums_by_artist(name)
    }

    fn album_by_id(&mut self, id: AlbumId) -> DbResult<Album> {
        (**self).album_by_id(id)
    }

    fn add_album(&mut self, album: &AlbumCreate) -> DbResult<AlbumId> {
        (**self).add_album(album)
    }

    fn remove_album(&mut self, id: AlbumId) -> DbResult<()> {
        (**self).remove_album(id)
    }
}

/// Opens the repository described by `config`.
///
/// An explicit `url` picks the driver by scheme; otherwise the keyword
/// connection string goes to the postgres driver.
pub fn get_driver(config: &DatabaseConfig) -> DbResult<Box<dyn AlbumRepository>> {
    let url_raw = match config.url {
        Some(ref url) => url,
        None => {
            info!("event=get_driver module=db driver={}", postgres::DRIVER_NAME);
            let conn = postgres::PostgresConnector::connect(&config.connection_string())?;
            return Ok(Box::new(conn));
        }
    };

    let url = Url::parse(url_raw)?;

    info!("event=get_driver module=db driver={}", url.scheme());
    match url.scheme() {
        postgres::DRIVER_NAME | postgres::DRIVER_ALIAS => {
            Ok(Box::new(postgres::PostgresConnector::connect(url_raw)?))
        }
        mock::DRIVER_NAME => Ok(Box::new(mock::get_conn(&url)?)),
        other => Err(DbError::UnknownScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: Some(url.to_string()),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = get_driver(&with_url("mysql://localhost/recordings")).err().unwrap();
        assert!(matches!(err, DbError::UnknownScheme(ref s) if s == "mysql"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = get_driver(&with_url("not a url")).err().unwrap();
        assert!(matches!(err, DbError::InvalidUrl(_)));
    }

    #[test]
    fn mock_scheme_loads_fixtures() {
        let mut repo = get_driver(&with_url("mock:///fixtures")).unwrap();
        assert_eq!(repo.driver_name(), "mock");
        let albums = repo.albums_by_artist("John Coltrane").unwrap();
        assert_eq!(albums.len(), 2);
    }
}
