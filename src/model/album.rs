use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct AlbumId(pub i64);

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored album. The id is assigned by the database and never changes.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    pub price: Decimal,
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} by {} ({})", self.id, self.title, self.artist, self.price)
    }
}

/// Insert payload for a new album; the database picks the id.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct AlbumCreate {
    pub title: String,
    pub artist: String,
    pub price: Decimal,
}

impl AlbumCreate {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, price: Decimal) -> AlbumCreate {
        AlbumCreate {
            title: title.into(),
            artist: artist.into(),
            price,
        }
    }

    pub fn into_album(self, id: AlbumId) -> Album {
        Album {
            id,
            title: self.title,
            artist: self.artist,
            price: self.price,
        }
    }
}
