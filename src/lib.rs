//! Loads the Formula 1 standings dataset used by the charts front end:
//! five CSV files fetched concurrently, typed by inference, and joined into
//! lookup maps.

pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod process;
pub mod schema;

pub use config::LoaderConfig;
pub use error::{LoadError, RetrievalError};
pub use loader::{load, Dataset, DatasetLoader, Resource};
