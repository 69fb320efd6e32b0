pub mod connection;
pub mod tickets;

pub use connection::{init_db, Database};
