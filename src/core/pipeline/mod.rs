pub mod pipeline_service;
pub mod run_config;

pub use pipeline_service::{PipelineService, PublishStatus, RunReport};
pub use run_config::{CredentialSource, RunConfig};
