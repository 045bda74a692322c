// Turns the exported resume PDF back into a structured outline.

pub mod resume_models;
pub mod resume_parser;
pub mod resume_service;

pub use resume_models::{
    LinkAnchor, ResumeEntry, ResumeError, ResumeOutline, ResumeSection, SectionBody, SkillGroup,
};
pub use resume_parser::ResumeParser;
pub use resume_service::{PdfTextSource, ResumeOutlineService};
