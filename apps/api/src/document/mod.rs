// Document Loader: extracts the resume text once at startup and holds it
// read-only for the lifetime of the process.

pub mod loader;

pub use loader::{initialize, DocumentCache, LoadPolicy};
