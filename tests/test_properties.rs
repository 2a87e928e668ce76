//! Property tests for both renderers.

use proptest::prelude::*;
use resume_export::converters::escape_latex;
use resume_export::{render_markup, render_pages, ExperienceEntry, PageGeometry, ResumeRecord};

fn experience_strategy() -> impl Strategy<Value = Vec<ExperienceEntry>> {
    prop::collection::vec("[A-Za-z]{3,12}", 1..8).prop_map(|companies| {
        companies
            .into_iter()
            .enumerate()
            .map(|(i, company)| ExperienceEntry {
                // Index suffix keeps companies distinct
                company: format!("{}{}", company, i),
                title: "Engineer".to_string(),
                duration: "2020 - 2021".to_string(),
                bullets: vec![format!("Shipped release {}", i)],
            })
            .collect()
    })
}

/// Strip every escape sequence the converter produces.
fn strip_escapes(escaped: &str) -> String {
    escaped
        .replace("{[}", "")
        .replace("{]}", "")
        .replace(r"\textbackslash{}", "")
        .replace(r"\textasciitilde{}", "")
        .replace(r"\textasciicircum{}", "")
        .replace(r"\&", "")
        .replace(r"\%", "")
        .replace(r"\$", "")
        .replace(r"\#", "")
        .replace(r"\_", "")
        .replace(r"\{", "")
        .replace(r"\}", "")
}

proptest! {
    #[test]
    fn prop_escaped_text_has_no_bare_reserved_characters(text in any::<String>()) {
        let stripped = strip_escapes(&escape_latex(&text));
        for reserved in ['\\', '&', '%', '$', '#', '_', '{', '}', '~', '^'] {
            prop_assert!(!stripped.contains(reserved), "bare {:?} in {:?}", reserved, stripped);
        }
    }

    #[test]
    fn prop_escape_keeps_plain_text(text in "[A-Za-z0-9 .,;:!?()-]*") {
        prop_assert_eq!(escape_latex(&text), text);
    }

    #[test]
    fn prop_markup_is_deterministic(name in ".{0,40}", contact in ".{0,40}") {
        let resume = ResumeRecord::new(name, contact);
        prop_assert_eq!(render_markup(&resume), render_markup(&resume));
    }

    #[test]
    fn prop_experience_order_preserved(experience in experience_strategy()) {
        let mut resume = ResumeRecord::new("Ada", "ada@example.com");
        resume.experience = experience.clone();

        let latex = render_markup(&resume);
        let positions: Vec<usize> = experience
            .iter()
            .map(|entry| latex.find(&format!("\\textbf{{{}}}", entry.company)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        let layout = render_pages(&resume, PageGeometry::letter());
        let pdf_companies: Vec<String> = layout
            .text_ops()
            .filter_map(|op| op.text.split(" \u{2014} ").next().map(str::to_string))
            .filter(|head| experience.iter().any(|entry| &entry.company == head))
            .collect();
        let expected: Vec<String> = experience.iter().map(|entry| entry.company.clone()).collect();
        prop_assert_eq!(pdf_companies, expected);
    }

    #[test]
    fn prop_layout_stays_within_margins(lines in 1usize..150, margin in 18.0f32..90.0) {
        let geometry = PageGeometry::new(Default::default(), margin);
        let mut resume = ResumeRecord::new("Ada Lovelace", "ada@example.com");
        resume.summary = Some(
            (0..lines).map(|i| format!("word{} ", i)).collect::<String>(),
        );

        let layout = render_pages(&resume, geometry);
        for op in layout.text_ops() {
            prop_assert!(op.y >= geometry.top() - 0.01);
            prop_assert!(op.y <= geometry.bottom() + 0.01);
            prop_assert!(op.x + op.width <= geometry.right() + 0.01);
        }
        prop_assert_eq!(layout.page_count(), layout.page_breaks() + 1);
    }
}
