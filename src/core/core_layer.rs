// The core module contains all business logic.
// Nothing in here talks to Google, the disk, a shell or a PDF library
// directly; those are ports implemented in `infra`.

#[path = "export/mod.rs"]
pub mod export;

#[path = "publish/publish_service.rs"]
pub mod publish;

#[path = "pipeline/mod.rs"]
pub mod pipeline;

#[path = "resume/mod.rs"]
pub mod resume;
