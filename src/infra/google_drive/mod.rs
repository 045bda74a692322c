// =============================================================================
// GOOGLE DRIVE MODULE
// =============================================================================
//
// Exports Google Docs through the Drive v3 API using a service account.
// This lives in the infra layer because it handles external I/O; the core
// only sees the `DocumentExporter` port and a byte buffer.

pub mod drive_client;
pub mod service_account;

pub use drive_client::DriveExportClient;
pub use service_account::ServiceAccountAuth;
