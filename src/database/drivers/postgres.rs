use std::time::Instant;

use ::postgres::types::{ToSql, Type};
use ::postgres::{Client, NoTls, Row, Statement};
use log::{debug, error, info};

use crate::database::{tagged, DbError, DbResult};
use crate::model::{Album, AlbumCreate, AlbumId};
use super::AlbumRepository;

pub const DRIVER_NAME: &str = "postgresql";
pub const DRIVER_ALIAS: &str = "postgres";

const ALBUMS_BY_ARTIST_SQL: &str = "SELECT * FROM album WHERE artist = $1";
const ALBUM_BY_ID_SQL: &str = "SELECT * FROM album WHERE id = $1";
const ADD_ALBUM_SQL: &str =
    "INSERT INTO album (title, artist, price) VALUES ($1, $2, $3) RETURNING id";
const REMOVE_ALBUM_SQL: &str = "DELETE FROM album WHERE id = $1";

/// Album repository over a single `postgres` connection. The `id` column may
/// be `int4` or `int8`.
pub struct PostgresConnector {
    pgconn: Client,
}

impl PostgresConnector {
    /// Connects without TLS and pings the server before handing out the
    /// connector. `conn_str` is either keyword or URL form.
    pub fn connect(conn_str: &str) -> DbResult<PostgresConnector> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start");

        let pgconn = Client::connect(conn_str, NoTls)
            .and_then(|mut client| client.batch_execute("SELECT 1").map(|()| client))
            .map_err(|source| {
                error!(
                    "event=db_open module=db status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                DbError::Connect { source }
            })?;

        info!(
            "event=db_open module=db status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );

        Ok(PostgresConnector {
            pgconn,
        })
    }
}

impl From<Client> for PostgresConnector {
    /// Wraps an already connected client without pinging it.
    fn from(pgconn: Client) -> PostgresConnector {
        PostgresConnector {
            pgconn,
        }
    }
}

impl AlbumRepository for PostgresConnector {
    fn driver_name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn albums_by_artist(&mut self, name: &str) -> DbResult<Vec<Album>> {
        let context = format!("albums_by_artist {:?}", name);
        let rows = self.pgconn.query(ALBUMS_BY_ARTIST_SQL, &[&name])
            .map_err(tagged(context.clone()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            out.push(album_from_row(row).map_err(tagged(context.clone()))?);
        }
        debug!("event=albums_by_artist module=db status=ok rows={}", out.len());
        Ok(out)
    }

    fn album_by_id(&mut self, id: AlbumId) -> DbResult<Album> {
        let context = format!("album_by_id {}", id);
        let stmt = self.pgconn.prepare(ALBUM_BY_ID_SQL)
            .map_err(tagged(context.clone()))?;
        let param = bind_id(&stmt, id).ok_or(DbError::NotFound(id))?;

        let row = self.pgconn.query_opt(&stmt, &[&*param])
            .map_err(tagged(context.clone()))?
            .ok_or(DbError::NotFound(id))?;

        album_from_row(&row).map_err(tagged(context))
    }

    fn add_album(&mut self, album: &AlbumCreate) -> DbResult<AlbumId> {
        let row = self.pgconn.query_one(
            ADD_ALBUM_SQL,
            &[&album.title, &album.artist, &album.price],
        ).map_err(tagged("add_album"))?;

        let id = id_from_row(&row).map_err(tagged("add_album"))?;
        info!("event=add_album module=db status=ok id={}", id);
        Ok(id)
    }

    fn remove_album(&mut self, id: AlbumId) -> DbResult<()> {
        let context = format!("remove_album {}", id);
        let stmt = self.pgconn.prepare(REMOVE_ALBUM_SQL)
            .map_err(tagged(context.clone()))?;

        let affected = match bind_id(&stmt, id) {
            Some(param) => self.pgconn.execute(&stmt, &[&*param])
                .map_err(tagged(context))?,
            None => 0,
        };

        debug!("event=remove_album module=db rows_affected={}", affected);
        info!("event=remove_album module=db status=ok id={}", id);
        Ok(())
    }
}

/// Binds `id` as whatever integer type the `id` column has. `None` means the
/// id does not fit the column, so no row can carry it.
fn bind_id(stmt: &Statement, id: AlbumId) -> Option<Box<dyn ToSql + Sync>> {
    match stmt.params().first() {
        Some(ty) if *ty == Type::INT4 => {
            i32::try_from(id.0).ok().map(|v| Box::new(v) as Box<dyn ToSql + Sync>)
        }
        _ => Some(Box::new(id.0)),
    }
}

// `id` may be SERIAL (int4) or BIGSERIAL (int8).
fn id_from_row(row: &Row) -> Result<AlbumId, ::postgres::Error> {
    let id = match row.try_get::<_, i64>("id") {
        Ok(id) => id,
        Err(_) => i64::from(row.try_get::<_, i32>("id")?),
    };
    Ok(AlbumId(id))
}

fn album_from_row(row: &Row) -> Result<Album, ::postgres::Error> {
    Ok(Album {
        id: id_from_row(row)?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        price: row.try_get("price")?,
    })
}
