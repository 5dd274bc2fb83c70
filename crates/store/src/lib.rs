//! SQLite export for normalized conference talk data.
//!
//! Owns the schema (embedded migrations), the connection pool, and the
//! bulk insert of a finished dataset. Produces the full database plus a
//! stripped copy without talk texts and topics.

mod db;
mod error;
mod export;

pub use db::Database;
pub use error::{Error, ErrorKind, Result};
pub use export::{write_dataset, write_no_text_copy};
