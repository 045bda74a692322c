use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Detail line without a header: {0}")]
    DetailWithoutHeader(String),
    #[error("Continuation without a bullet: {0}")]
    ContinuationWithoutBullet(String),
    #[error("Could not read PDF: {0}")]
    Pdf(String),
}

/// A URI link annotation and the text it is drawn over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAnchor {
    pub anchor: String,
    pub uri: String,
}

impl LinkAnchor {
    pub fn new(anchor: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            uri: uri.into(),
        }
    }

    /// What the anchor text is replaced with. `mailto:` and `tel:` links keep
    /// only the part after the scheme.
    pub fn replacement(&self) -> &str {
        if self.uri.starts_with("mailto:") || self.uri.starts_with("tel:") {
            self.uri.split(':').nth(1).unwrap_or_default()
        } else {
            &self.uri
        }
    }
}

/// The whole resume: free-form header lines followed by titled sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeOutline {
    pub header: Vec<String>,
    pub sections: Vec<ResumeSection>,
}

impl ResumeOutline {
    pub fn section(&self, title: &str) -> Option<&ResumeSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeSection {
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Skills { groups: Vec<SkillGroup> },
    Entries { entries: Vec<ResumeEntry> },
}

impl SectionBody {
    pub fn entries(&self) -> &[ResumeEntry] {
        match self {
            SectionBody::Entries { entries } => entries,
            SectionBody::Skills { .. } => &[],
        }
    }

    pub fn skill_groups(&self) -> &[SkillGroup] {
        match self {
            SectionBody::Skills { groups } => groups,
            SectionBody::Entries { .. } => &[],
        }
    }
}

/// `Languages: Rust, Go` becomes a group named `Languages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<String>,
}

/// One job, school or project, with its bullet points in `details`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResumeEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,
    pub details: Vec<String>,
}

impl ResumeEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_and_phone_links_drop_scheme() {
        assert_eq!(LinkAnchor::new("Email", "mailto:me@example.com").replacement(), "me@example.com");
        assert_eq!(LinkAnchor::new("Call", "tel:+15551234").replacement(), "+15551234");
        assert_eq!(
            LinkAnchor::new("Site", "https://example.com/a").replacement(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_entry_serializes_without_missing_fields() {
        let mut entry = ResumeEntry::named("Acme");
        entry.position = Some("Engineer".to_string());

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "name": "Acme", "position": "Engineer", "details": [] })
        );
    }

    #[test]
    fn test_section_kind_is_tagged() {
        let section = ResumeSection {
            title: "Skills".to_string(),
            body: SectionBody::Skills {
                groups: vec![SkillGroup {
                    name: "Languages".to_string(),
                    skills: vec!["Rust".to_string()],
                }],
            },
        };

        let json = serde_json::to_value(&section).unwrap();

        assert_eq!(json["kind"], "skills");
        assert_eq!(json["title"], "Skills");
        assert_eq!(json["groups"][0]["skills"][0], "Rust");
    }
}
