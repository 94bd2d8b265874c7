//! Album persistence: the repository contract, its drivers, and the error
//! type they share.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::AlbumId;

pub mod drivers;

pub use self::drivers::{get_driver, AlbumRepository};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("failed to connect to database: {source}")]
    Connect {
        #[source]
        source: postgres::Error,
    },

    /// A statement or row mapping failed. `context` names the operation and
    /// its key, e.g. `albums_by_artist "John Coltrane"`.
    #[error("{context}: {source}")]
    Query {
        context: String,
        #[source]
        source: postgres::Error,
    },

    #[error("album_by_id {0}: no such album")]
    NotFound(AlbumId),

    #[error("error parsing url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unknown scheme: {0}")]
    UnknownScheme(String),

    #[error("error loading fixtures from {path:?}: {reason}")]
    Fixtures { path: PathBuf, reason: String },
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound(_))
    }
}

/// Wraps a driver error with the operation that produced it.
pub(crate) fn tagged(context: impl Into<String>) -> impl FnOnce(postgres::Error) -> DbError {
    let context = context.into();
    move |source| DbError::Query { context, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguished_and_names_the_id() {
        let err = DbError::NotFound(AlbumId(42));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "album_by_id 42: no such album");

        assert!(!DbError::UnknownScheme("ftp".into()).is_not_found());
    }

    #[test]
    fn tagged_errors_lead_with_operation_and_key() {
        let source = postgres::Client::connect(
            "host=127.0.0.1 port=1 user=nobody dbname=recordings sslmode=disable",
            postgres::NoTls,
        )
        .err()
        .expect("nothing listens on port 1");

        let err = tagged(format!("albums_by_artist {:?}", "Nobody"))(source);
        match err {
            DbError::Query { ref context, .. } => assert_eq!(context, "albums_by_artist \"Nobody\""),
            ref other => panic!("expected a query error, got {:?}", other),
        }
        assert!(err.to_string().starts_with("albums_by_artist \"Nobody\": "));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_not_found());
    }
}
