//! LaTeX converter for resumes.
//!
//! Produces a complete, compilable `article` document. Every value taken
//! from the resume passes through [`escape_latex`] before it is
//! interpolated; the converter's own markup never does.

use crate::resume::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord, Section};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Write;

lazy_static! {
    /// Regex for matching URLs and email addresses in the contact line
    static ref RE_LINK: Regex = Regex::new(
        r"https?://[^\s<>(){}\\]+|[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    )
    .unwrap();
}

const PREAMBLE: &str = r"\documentclass[11pt,letterpaper]{article}
\usepackage[utf8]{inputenc}
\usepackage[margin=0.75in]{geometry}
\usepackage{enumitem}
\usepackage{hyperref}

\pagestyle{empty}

\begin{document}

";

const POSTAMBLE: &str = r"\end{document}";

/// Separator between skills.
pub const SKILL_SEPARATOR: &str = r" $\bullet$ ";

/// Options for LaTeX output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatexOptions {
    /// Wrap URLs and email addresses in the contact line in `\href`
    pub link_contacts: bool,
}

/// Converter from a resume to LaTeX source.
///
/// # Examples
///
/// ```
/// use resume_export::converters::LatexConverter;
/// use resume_export::ResumeRecord;
///
/// let mut resume = ResumeRecord::new("Ada Lovelace", "ada@example.com");
/// resume.skills = vec!["Python".to_string(), "SQL".to_string()];
///
/// let latex = LatexConverter::new().convert(&resume);
/// assert!(latex.contains(r"\section*{TECHNICAL SKILLS}"));
/// assert!(latex.ends_with(r"\end{document}"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LatexConverter {
    options: LatexOptions,
}

impl LatexConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with the given options.
    pub fn with_options(options: LatexOptions) -> Self {
        Self { options }
    }

    /// Render the whole document.
    pub fn convert(&self, resume: &ResumeRecord) -> String {
        let mut out = String::with_capacity(2048);
        out.push_str(PREAMBLE);
        self.write_header(&mut out, resume);

        for section in resume.sections() {
            writeln!(out, "\\section*{{{}}}", section.heading()).ok();
            match section {
                Section::Summary(summary) => {
                    writeln!(out, "{}\n", escape_latex(summary)).ok();
                },
                Section::Skills(skills) => {
                    let joined = skills
                        .iter()
                        .map(|skill| escape_latex(skill))
                        .collect::<Vec<_>>()
                        .join(SKILL_SEPARATOR);
                    writeln!(out, "{}\n", joined).ok();
                },
                Section::Experience(entries) => {
                    for entry in entries {
                        write_experience(&mut out, entry);
                    }
                },
                Section::Projects(entries) => {
                    for entry in entries {
                        write_project(&mut out, entry);
                    }
                },
                Section::Education(entries) => {
                    for entry in entries {
                        writeln!(out, "{} \\\\", education_line(entry)).ok();
                    }
                    out.push('\n');
                },
            }
        }

        out.push_str(POSTAMBLE);
        out
    }

    fn write_header(&self, out: &mut String, resume: &ResumeRecord) {
        let contact = if self.options.link_contacts {
            linkify_contact(&resume.contact)
        } else {
            escape_latex(&resume.contact)
        };
        writeln!(out, "\\begin{{center}}").ok();
        writeln!(out, "{{\\Large \\textbf{{{}}}}} \\\\", escape_latex(&resume.name)).ok();
        writeln!(out, "{}", contact).ok();
        writeln!(out, "\\end{{center}}\n").ok();
    }
}

fn write_experience(out: &mut String, entry: &ExperienceEntry) {
    writeln!(
        out,
        "\\textbf{{{}}} --- {} \\hfill {} \\\\",
        escape_latex(&entry.company),
        escape_latex(&entry.title),
        escape_latex(&entry.duration)
    )
    .ok();
    write_itemize(out, &entry.bullets);
}

fn write_project(out: &mut String, entry: &ProjectEntry) {
    if entry.technologies.is_empty() {
        writeln!(out, "\\textbf{{{}}} \\\\", escape_latex(&entry.name)).ok();
    } else {
        let technologies = entry
            .technologies
            .iter()
            .map(|tech| escape_latex(tech))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "\\textbf{{{}}} | {} \\\\", escape_latex(&entry.name), technologies).ok();
    }
    write_itemize(out, &entry.bullets);
}

/// Bullet list; nothing at all for an empty list, which would not compile.
fn write_itemize(out: &mut String, bullets: &[String]) {
    if !bullets.is_empty() {
        out.push_str("\\begin{itemize}[leftmargin=*,noitemsep]\n");
        for bullet in bullets {
            writeln!(out, "  \\item {}", escape_latex(bullet)).ok();
        }
        out.push_str("\\end{itemize}\n");
    }
    out.push('\n');
}

fn education_line(entry: &EducationEntry) -> String {
    match entry {
        EducationEntry::Plain(text) => escape_latex(text),
        EducationEntry::Structured {
            institution,
            degree,
            graduation_date,
        } => format!(
            "{} --- {}, {}",
            escape_latex(institution),
            escape_latex(degree),
            escape_latex(graduation_date)
        ),
    }
}

/// Escape LaTeX special characters in text.
///
/// Handles `\ & % $ # _ { } ~ ^` and wraps `[` `]` in braces; everything
/// else passes through.
///
/// # Examples
///
/// ```
/// use resume_export::converters::escape_latex;
///
/// assert_eq!(escape_latex("Q&A bot, 50% faster"), r"Q\&A bot, 50\% faster");
/// assert_eq!(escape_latex(r"C:\dir"), r"C:\textbackslash{}dir");
/// ```
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(ch);
            },
            // Braced so a value after `\\` or `\item` is never read as an
            // optional argument.
            '[' => escaped.push_str("{[}"),
            ']' => escaped.push_str("{]}"),
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape a URL for the first argument of `\href`.
fn escape_href_target(url: &str) -> String {
    url.replace('%', r"\%").replace('#', r"\#")
}

/// Escape the contact line, turning URLs and emails into `\href` links.
fn linkify_contact(contact: &str) -> String {
    let mut out = String::with_capacity(contact.len() * 2);
    let mut last = 0;

    for m in RE_LINK.find_iter(contact) {
        let text = m.as_str().trim_end_matches(['.', ',', ';', ':']);
        let end = m.start() + text.len();
        out.push_str(&escape_latex(&contact[last..m.start()]));

        let target = if text.contains("://") {
            text.to_string()
        } else {
            format!("mailto:{}", text)
        };
        write!(out, "\\href{{{}}}{{{}}}", escape_href_target(&target), escape_latex(text)).ok();
        last = end;
    }

    out.push_str(&escape_latex(&contact[last..]));
    out
}

/// Render `resume` as LaTeX with default options.
pub fn render_markup(resume: &ResumeRecord) -> String {
    LatexConverter::new().convert(resume)
}
