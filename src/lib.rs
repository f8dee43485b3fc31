pub mod channels;
pub mod competition;
pub mod config;
pub mod errors;
pub mod logging;
pub mod logos;
pub mod matches;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod sources;

pub use errors::{CatalogError, MalformedEntry};
pub use matches::{Catalogs, MatchRecord, StreamLink};
pub use pipeline::{build_catalogs, CatalogRun, CatalogStats, Lookups};
