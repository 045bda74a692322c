// Text-to-outline rules for a single-column resume:
// - paragraphs are separated by a blank line, pages by several
// - the first five paragraphs are the header
// - every later paragraph is a section whose first line is its title
// - a `Skills` section holds `Group: a, b, c` lines
// - any other section holds entries introduced by a line containing `|`,
//   each followed by `- ` bullets and their wrapped continuation lines

use regex::Regex;

use super::resume_models::{
    LinkAnchor, ResumeEntry, ResumeError, ResumeOutline, ResumeSection, SectionBody, SkillGroup,
};

const PAGE_BREAK: &str = "\n\n\n\n\n";
const PARAGRAPH_BREAK: &str = "\n\n";
const HEADER_PARAGRAPHS: usize = 5;
const BULLET_PREFIX: &str = "- ";

#[derive(Debug, Clone)]
pub struct ResumeParser {
    // "2019 - 2023", "Jan 2020 -Present"
    date_separator: Regex,
    // "Acme, Springfield — Engineer | 2020 - 2023"
    entry_delimiter: Regex,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser {
    pub fn new() -> Self {
        Self {
            date_separator: Regex::new(r"\s*-\s*").expect("date separator pattern is valid"),
            entry_delimiter: Regex::new(r"\s*(,|—|\|)\s*")
                .expect("entry delimiter pattern is valid"),
        }
    }

    /// Builds the outline from per-page text. Link anchors are replaced by
    /// their targets before any structure is read.
    pub fn parse(
        &self,
        pages: &[String],
        links: &[LinkAnchor],
    ) -> Result<ResumeOutline, ResumeError> {
        let text = Self::link_text(pages, links);

        let paragraphs: Vec<&str> = text
            .split(PARAGRAPH_BREAK)
            .filter(|p| !p.trim().is_empty())
            .collect();

        let header: Vec<String> = paragraphs
            .iter()
            .take(HEADER_PARAGRAPHS)
            .flat_map(|&p| Self::content_lines(p))
            .map(str::to_string)
            .collect();

        let mut sections: Vec<ResumeSection> = Vec::new();
        for paragraph in paragraphs.iter().skip(HEADER_PARAGRAPHS) {
            let lines = Self::content_lines(paragraph);
            let Some((title, content)) = lines.split_first() else {
                continue;
            };

            let body = if title.to_lowercase() == "skills" {
                SectionBody::Skills {
                    groups: Self::skill_groups(content),
                }
            } else {
                SectionBody::Entries {
                    entries: self.entries(title, content)?,
                }
            };

            upsert(
                &mut sections,
                ResumeSection {
                    title: title.to_string(),
                    body,
                },
                |s| s.title.as_str(),
            );
        }

        Ok(ResumeOutline { header, sections })
    }

    fn link_text(pages: &[String], links: &[LinkAnchor]) -> String {
        let mut text = pages
            .join(PAGE_BREAK)
            .replace('\u{200b}', "")
            .replace('\x0c', "");

        // A repeated anchor keeps its first position with the last target.
        let mut unique: Vec<&LinkAnchor> = Vec::new();
        for link in links.iter().filter(|l| !l.anchor.is_empty()) {
            upsert(&mut unique, link, |l| l.anchor.as_str());
        }

        for link in unique {
            text = text.replace(&link.anchor, link.replacement());
        }
        text
    }

    fn content_lines(paragraph: &str) -> Vec<&str> {
        paragraph
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }

    fn skill_groups(lines: &[&str]) -> Vec<SkillGroup> {
        let mut groups = Vec::new();
        for line in lines {
            let Some((name, values)) = line.split_once(':') else {
                continue;
            };
            let group = SkillGroup {
                name: name.trim().to_string(),
                skills: values
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect(),
            };
            upsert(&mut groups, group, |g| g.name.as_str());
        }
        groups
    }

    fn entries(&self, title: &str, lines: &[&str]) -> Result<Vec<ResumeEntry>, ResumeError> {
        let education = title == "Education";
        let mut entries: Vec<ResumeEntry> = Vec::new();
        let mut current: Option<usize> = None;
        let mut last_bullet: Option<usize> = None;

        for line in lines {
            if line.contains('|') {
                let entry = if education {
                    self.education_entry(line)
                } else {
                    self.delimited_entry(line)
                };
                current = Some(upsert(&mut entries, entry, |e| e.name.as_str()));
                last_bullet = None;
                continue;
            }

            let Some(index) = current else {
                return Err(ResumeError::DetailWithoutHeader(line.to_string()));
            };
            let details = &mut entries[index].details;

            if line.starts_with(BULLET_PREFIX) {
                details.push(line.to_string());
                last_bullet = Some(details.len() - 1);
            } else {
                let Some(bullet) = last_bullet else {
                    return Err(ResumeError::ContinuationWithoutBullet(line.to_string()));
                };
                details[bullet].push(' ');
                details[bullet].push_str(line);
            }
        }

        Ok(entries)
    }

    /// `School — Degree, Major | start - end`
    fn education_entry(&self, line: &str) -> ResumeEntry {
        let (left, dates) = line.split_once('|').unwrap_or((line, ""));
        let left = left.trim();

        let (name, degree) = match left.split_once('—') {
            Some((name, degree)) => (name.trim(), Some(degree.trim())),
            None => (left, None),
        };

        let mut entry = ResumeEntry::named(name);
        if let Some(degree) = degree {
            match degree.split_once(',') {
                Some((kind, major)) => {
                    entry.degree_type = Some(kind.trim().to_string());
                    entry.major = Some(major.trim().to_string());
                }
                None => entry.degree_type = Some(degree.to_string()),
            }
        }

        let (start, end) = self.date_range(dates.trim());
        entry.date_start = Some(start);
        entry.date_end = Some(end);
        entry
    }

    /// `Name, Place — Position | start - end`, in any order after the name.
    /// Each delimiter sets the field named by the text that follows it.
    fn delimited_entry(&self, line: &str) -> ResumeEntry {
        let mut entry = ResumeEntry::default();
        let mut pending: Option<&str> = None;
        let mut last = 0;

        for captures in self.entry_delimiter.captures_iter(line) {
            let (Some(whole), Some(delimiter)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            self.apply_field(&mut entry, pending, &line[last..whole.start()]);
            pending = Some(delimiter.as_str());
            last = whole.end();
        }
        self.apply_field(&mut entry, pending, &line[last..]);

        entry
    }

    fn apply_field(&self, entry: &mut ResumeEntry, delimiter: Option<&str>, text: &str) {
        let text = text.trim();
        match delimiter {
            None => entry.name = text.to_string(),
            Some(",") => entry.place = Some(text.to_string()),
            Some("—") => entry.position = Some(text.to_string()),
            Some(_) => {
                let (start, end) = self.date_range(text);
                entry.date_start = Some(start);
                entry.date_end = Some(end);
            }
        }
    }

    /// A single date is both start and end.
    fn date_range(&self, text: &str) -> (String, String) {
        let mut parts = self.date_separator.split(text).map(str::trim);
        let start = parts.next().unwrap_or_default().to_string();
        let end = parts.next().map(str::to_string).unwrap_or_else(|| start.clone());
        (start, end)
    }
}

/// Inserts `item`, replacing an existing one with the same key in place.
/// Returns the index it ended up at.
fn upsert<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> &str) -> usize {
    let existing = items.iter().position(|other| key(other) == key(&item));
    match existing {
        Some(index) => {
            items[index] = item;
            index
        }
        None => {
            items.push(item);
            items.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 5] = [
        "Jane Doe",
        "Software Engineer",
        "Email | Portfolio",
        "Springfield, IL",
        "Builds reliable tools.",
    ];

    fn page(sections: &[&str]) -> Vec<String> {
        let mut paragraphs: Vec<&str> = HEADER.to_vec();
        paragraphs.extend_from_slice(sections);
        vec![paragraphs.join("\n\n")]
    }

    fn parse(sections: &[&str]) -> Result<ResumeOutline, ResumeError> {
        ResumeParser::new().parse(&page(sections), &[])
    }

    #[test]
    fn test_first_five_paragraphs_are_header() {
        let outline = parse(&["Experience\nAcme — Engineer | 2020"]).unwrap();

        assert_eq!(outline.header, HEADER.to_vec());
        assert_eq!(outline.sections.len(), 1);
        assert_eq!(outline.sections[0].title, "Experience");
    }

    #[test]
    fn test_skills_split_into_groups() {
        let outline = parse(&[
            "SKILLS\nLanguages: Rust, Python, \nTools:Git,Docker\nNot a group\nTools: Cargo",
        ])
        .unwrap();

        let groups = outline.section("SKILLS").unwrap().body.skill_groups();
        assert_eq!(
            groups,
            [
                SkillGroup {
                    name: "Languages".to_string(),
                    skills: vec!["Rust".to_string(), "Python".to_string()],
                },
                SkillGroup {
                    name: "Tools".to_string(),
                    skills: vec!["Cargo".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_education_line_reads_degree_and_dates() {
        let outline = parse(&[
            "Education\nState University — B.S., Computer Science | 2015 - 2019\nCity College — Certificate | 2021",
        ])
        .unwrap();

        let entries = outline.section("Education").unwrap().body.entries();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "State University");
        assert_eq!(entries[0].degree_type.as_deref(), Some("B.S."));
        assert_eq!(entries[0].major.as_deref(), Some("Computer Science"));
        assert_eq!(entries[0].date_start.as_deref(), Some("2015"));
        assert_eq!(entries[0].date_end.as_deref(), Some("2019"));

        assert_eq!(entries[1].degree_type.as_deref(), Some("Certificate"));
        assert_eq!(entries[1].major, None);
        assert_eq!(entries[1].date_start.as_deref(), Some("2021"));
        assert_eq!(entries[1].date_end.as_deref(), Some("2021"));
    }

    #[test]
    fn test_entry_fields_follow_their_delimiters() {
        let outline = parse(&[
            "Experience\nAcme Corp, Springfield — Senior Engineer | Jan 2020 - Present\n- Built the export pipeline\nin Rust\n- Led migrations\nInitech — Intern | 2019",
        ])
        .unwrap();

        let entries = outline.section("Experience").unwrap().body.entries();
        assert_eq!(
            entries[0],
            ResumeEntry {
                name: "Acme Corp".to_string(),
                place: Some("Springfield".to_string()),
                position: Some("Senior Engineer".to_string()),
                degree_type: None,
                major: None,
                date_start: Some("Jan 2020".to_string()),
                date_end: Some("Present".to_string()),
                details: vec![
                    "- Built the export pipeline in Rust".to_string(),
                    "- Led migrations".to_string(),
                ],
            }
        );
        assert_eq!(entries[1].name, "Initech");
        assert_eq!(entries[1].place, None);
        assert_eq!(entries[1].position.as_deref(), Some("Intern"));
        assert_eq!(entries[1].date_end.as_deref(), Some("2019"));
        assert!(entries[1].details.is_empty());
    }

    #[test]
    fn test_repeated_entry_name_replaces_in_place() {
        let outline = parse(&[
            "Projects\nAlpha — Lead | 2020\n- old bullet\nBeta — Dev | 2021\nAlpha — Maintainer | 2022\n- new bullet",
        ])
        .unwrap();

        let entries = outline.section("Projects").unwrap().body.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Alpha");
        assert_eq!(entries[0].position.as_deref(), Some("Maintainer"));
        assert_eq!(entries[0].details, vec!["- new bullet".to_string()]);
        assert_eq!(entries[1].name, "Beta");
    }

    #[test]
    fn test_detail_line_without_header_is_error() {
        let err = parse(&["Experience\n- orphan bullet"]).unwrap_err();

        assert!(matches!(err, ResumeError::DetailWithoutHeader(_)));
        assert_eq!(err.to_string(), "Detail line without a header: - orphan bullet");
    }

    #[test]
    fn test_continuation_without_bullet_is_error() {
        let err = parse(&["Experience\nAcme — Engineer | 2020\nwrapped text"]).unwrap_err();

        assert!(matches!(err, ResumeError::ContinuationWithoutBullet(_)));
        assert_eq!(err.to_string(), "Continuation without a bullet: wrapped text");
    }

    #[test]
    fn test_link_anchors_are_replaced_by_targets() {
        let links = [
            LinkAnchor::new("Email", "mailto:jane@example.com"),
            LinkAnchor::new("Portfolio", "https://old.example.com"),
            LinkAnchor::new("Portfolio", "https://jane.example.com"),
            LinkAnchor::new("", "https://ignored.example.com"),
        ];

        let outline = ResumeParser::new().parse(&page(&[]), &links).unwrap();

        assert_eq!(outline.header[2], "jane@example.com | https://jane.example.com");
    }

    #[test]
    fn test_pages_are_joined_and_form_feeds_dropped() {
        let pages = vec![
            format!("{}\n\x0c", HEADER.join("\n\n")),
            "Experience\u{200b}\nAcme — Engineer | 2020\n- Shipped".to_string(),
        ];

        let outline = ResumeParser::new().parse(&pages, &[]).unwrap();

        let section = outline.section("Experience").unwrap();
        assert_eq!(section.body.entries()[0].details, vec!["- Shipped".to_string()]);
    }
}
