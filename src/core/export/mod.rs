// Operations 1-3 of a run: authenticate, export, fan the bytes out to disk.

pub mod export_models;
pub mod export_service;

pub use export_models::{DestinationSet, DocumentRef, ExportError, ExportFormat, ExportedDocument};
pub use export_service::{DocumentExporter, DocumentSink, ExportService};
