//! Offline catalog ingestion
//!
//! Reads the fashion catalog CSV, fills missing attribute values with the
//! dataset's conventional defaults, embeds each item's text representation
//! and upserts the vectors into the index. Runs from the `ingest` CLI
//! command, never during serving.

pub mod ingest;

pub use ingest::CatalogIngestor;
pub use ingest::parse_catalog_line;
