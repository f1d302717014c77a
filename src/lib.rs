pub mod fetch;
pub mod ingest;
pub mod views;
