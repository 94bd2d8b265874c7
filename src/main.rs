use std::path::PathBuf;

use anyhow::Context;
use log::info;
use rust_decimal::Decimal;

use recordings::config::AppConfig;
use recordings::database::get_driver;
use recordings::logging::init_logging;
use recordings::model::{AlbumCreate, AlbumId};

fn main() -> anyhow::Result<()> {
    let config_file = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_file.as_deref()).context("error reading config")?;
    let _logger = init_logging(&config.logging.level).context("error starting logger")?;

    info!("event=config_loaded module=main database={}", config.database.redacted());

    let mut repo = get_driver(&config.database).context("error opening database")?;
    println!("Connected to {}!", repo.driver_name());

    let albums = repo.albums_by_artist("John Coltrane")?;
    println!("Albums found: {:?}", albums);

    let album = repo.album_by_id(AlbumId(3))?;
    println!("Album found: {}", album);

    let album_id = repo.add_album(&AlbumCreate::new(
        "Miles Davis - Requiem In D Minor",
        "Miles Davis",
        Decimal::new(5999, 2),
    ))?;
    println!("ID of added album: {}", album_id);

    repo.remove_album(album_id)?;
    println!("Album {} deleted", album_id);

    Ok(())
}
