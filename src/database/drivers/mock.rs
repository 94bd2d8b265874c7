use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use log::{debug, info};
use serde::Deserialize;
use url::Url;

use crate::database::{DbError, DbResult};
use crate::model::{Album, AlbumCreate, AlbumId};
use super::AlbumRepository;

pub const DRIVER_NAME: &str = "mock";

/// Loads `./<path>/database.json` for a `mock:///<path>` url.
pub fn get_conn(url: &Url) -> DbResult<MockConnector> {
    let data_dir = PathBuf::from(format!(".{}", url.path()));
    let database_path = data_dir.join("database.json");

    let fixtures_error = |reason: String| DbError::Fixtures {
        path: database_path.clone(),
        reason,
    };

    let db_json = File::open(&database_path)
        .map_err(|e| fixtures_error(e.to_string()))?;
    let fixtures: Fixtures = serde_json::from_reader(BufReader::new(db_json))
        .map_err(|e| fixtures_error(e.to_string()))?;

    info!(
        "event=db_open module=db driver=mock status=ok path={} albums={}",
        database_path.display(),
        fixtures.albums.len()
    );
    Ok(MockConnector::with_albums(fixtures.albums))
}

#[derive(Debug, Deserialize)]
struct Fixtures {
    albums: Vec<Album>,
}

/// In-memory album store with the same observable behaviour as the
/// postgres driver.
#[derive(Debug, Default, Clone)]
pub struct MockConnector {
    albums: Vec<Album>,
}

impl MockConnector {
    pub fn new() -> MockConnector {
        MockConnector::default()
    }

    pub fn with_albums(albums: Vec<Album>) -> MockConnector {
        MockConnector { albums }
    }

    fn next_id(&self) -> AlbumId {
        let max = self.albums.iter().map(|a| a.id.0).max().unwrap_or(0);
        AlbumId(max + 1)
    }
}

impl AlbumRepository for MockConnector {
    fn driver_name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn albums_by_artist(&mut self, name: &str) -> DbResult<Vec<Album>> {
        Ok(self.albums
            .iter()
            .filter(|a| a.artist == name)
            .cloned()
            .collect())
    }

    fn album_by_id(&mut self, id: AlbumId) -> DbResult<Album> {
        self.albums
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(DbError::NotFound(id))
    }

    fn add_album(&mut self, album: &AlbumCreate) -> DbResult<AlbumId> {
        let id = self.next_id();
        self.albums.push(album.clone().into_album(id));
        info!("event=add_album module=db driver=mock status=ok id={}", id);
        Ok(id)
    }

    fn remove_album(&mut self, id: AlbumId) -> DbResult<()> {
        let before = self.albums.len();
        self.albums.retain(|a| a.id != id);
        debug!(
            "event=remove_album module=db driver=mock rows_affected={}",
            before - self.albums.len()
        );
        info!("event=remove_album module=db driver=mock status=ok id={}", id);
        Ok(())
    }
}
