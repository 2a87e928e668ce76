//! Structured resume record consumed by both renderers.
//!
//! The record is produced upstream by the analysis pipeline and is never
//! mutated here. Field names follow the upstream JSON so that a record can
//! be decoded directly with serde.
//!
//! Section ordering lives in one place, [`ResumeRecord::sections`], which
//! both the LaTeX renderer and the layout engine iterate. That keeps the two
//! outputs in lockstep.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An improved resume as returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// Candidate name, rendered as the document title line
    pub name: String,
    /// Single contact line (email, phone, links)
    pub contact: String,
    /// Optional professional summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Skills, rendered as one joined line in input order
    #[serde(default)]
    pub skills: Vec<String>,
    /// Work history, most relevant first as supplied upstream
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    /// Projects
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    /// Education entries, each either free text or structured
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// One position in the experience section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// Employer
    pub company: String,
    /// Job title
    pub title: String,
    /// Free-form date range, e.g. "Jan 2021 - Present"
    pub duration: String,
    /// Achievement bullets
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// One project in the projects section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Project name
    pub name: String,
    /// Technologies, joined with ", "
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Highlight bullets
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// An education line.
///
/// Upstream sends either a preformatted string or an object; on the wire
/// the two are told apart by JSON type, in Rust by variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EducationEntry {
    /// Preformatted line, rendered verbatim
    Plain(String),
    /// Structured entry
    Structured {
        /// School or university
        institution: String,
        /// Degree and field
        degree: String,
        /// Graduation date as supplied
        graduation_date: String,
    },
}

impl EducationEntry {
    /// The single display line for this entry.
    ///
    /// Structured entries read `institution — degree, graduation_date`.
    pub fn display_line(&self) -> String {
        match self {
            EducationEntry::Plain(text) => text.clone(),
            EducationEntry::Structured {
                institution,
                degree,
                graduation_date,
            } => format!("{} \u{2014} {}, {}", institution, degree, graduation_date),
        }
    }
}

/// A renderable section, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section<'a> {
    /// Summary paragraph
    Summary(&'a str),
    /// Joined skills line
    Skills(&'a [String]),
    /// Experience entries
    Experience(&'a [ExperienceEntry]),
    /// Project entries
    Projects(&'a [ProjectEntry]),
    /// Education entries
    Education(&'a [EducationEntry]),
}

impl Section<'_> {
    /// Upper-case heading shared by every output format.
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Summary(_) => "SUMMARY",
            Section::Skills(_) => "TECHNICAL SKILLS",
            Section::Experience(_) => "EXPERIENCE",
            Section::Projects(_) => "PROJECTS",
            Section::Education(_) => "EDUCATION",
        }
    }
}

/// Analysis pipeline response carrying the record under `improved_resume`.
#[derive(Deserialize)]
struct PipelineEnvelope {
    improved_resume: ResumeRecord,
}

impl ResumeRecord {
    /// Create a record with just the header fields.
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            ..Default::default()
        }
    }

    /// Decode a record from upstream JSON.
    ///
    /// Accepts the bare record or the full pipeline result that nests it
    /// under `improved_resume`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("improved_resume").is_some() {
            let envelope: PipelineEnvelope = serde_json::from_value(value)?;
            return Ok(envelope.improved_resume);
        }
        if !value.is_object() {
            return Err(Error::InvalidInput("expected a JSON object".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The summary text, if it has any visible content.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .filter(|summary| !summary.trim().is_empty())
    }

    /// Sections to render, in fixed document order.
    ///
    /// Empty sequences and a blank summary produce no section at all.
    pub fn sections(&self) -> impl Iterator<Item = Section<'_>> {
        let summary = self.summary_text().map(Section::Summary);
        let skills = (!self.skills.is_empty()).then(|| Section::Skills(&self.skills));
        let experience =
            (!self.experience.is_empty()).then(|| Section::Experience(&self.experience));
        let projects = (!self.projects.is_empty()).then(|| Section::Projects(&self.projects));
        let education = (!self.education.is_empty()).then(|| Section::Education(&self.education));

        [summary, skills, experience, projects, education]
            .into_iter()
            .flatten()
    }
}
