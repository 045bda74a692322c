// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "google_drive/mod.rs"]
pub mod google_drive;

#[path = "filesystem/file_sink.rs"]
pub mod filesystem;

#[path = "shell/shell_runner.rs"]
pub mod shell;

#[path = "pdf/pdf_reader.rs"]
pub mod pdf;
