//! Integration tests for the export coordinator and PDF output.

use resume_export::layout::{PageDrawOps, TextMeasure};
use resume_export::writer::{DocumentInfo, RenderBackend};
use resume_export::{
    export, suggested_filename, Error, ExportConfig, ExportFormat, Exporter, FontFamily, PageSize,
    ResumeRecord,
};
use std::sync::Mutex;

fn sample() -> ResumeRecord {
    ResumeRecord::from_json(
        r#"{
            "improved_resume": {
                "name": "Ada Lovelace",
                "contact": "ada@example.com",
                "summary": "First programmer",
                "skills": ["Analysis", "Notation"],
                "experience": [{
                    "company": "Analytical Engine",
                    "title": "Collaborator",
                    "duration": "1842 - 1843",
                    "bullets": ["Published Note G"]
                }]
            },
            "score": 87
        }"#,
    )
    .unwrap()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Records what it was asked to render.
#[derive(Default)]
struct RecordingBackend {
    pages: Mutex<Vec<usize>>,
}

struct Fixed;

impl TextMeasure for Fixed {
    fn measure_text_width(&self, text: &str, _font: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.6
    }
}

impl RenderBackend for RecordingBackend {
    type Measure = Fixed;

    fn measure(&self) -> &Fixed {
        &Fixed
    }

    fn render(&self, layout: &PageDrawOps, info: &DocumentInfo) -> resume_export::Result<Vec<u8>> {
        self.pages.lock().unwrap().push(layout.page_count());
        Ok(format!("{} / {} page(s)", info.title, layout.page_count()).into_bytes())
    }
}

/// Always returns nothing.
struct EmptyBackend;

impl RenderBackend for EmptyBackend {
    type Measure = Fixed;

    fn measure(&self) -> &Fixed {
        &Fixed
    }

    fn render(&self, _layout: &PageDrawOps, _info: &DocumentInfo) -> resume_export::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Fails every render.
struct FailingBackend;

impl RenderBackend for FailingBackend {
    type Measure = Fixed;

    fn measure(&self) -> &Fixed {
        &Fixed
    }

    fn render(&self, _layout: &PageDrawOps, _info: &DocumentInfo) -> resume_export::Result<Vec<u8>> {
        Err(Error::Render("device unavailable".to_string()))
    }
}

#[test]
fn test_envelope_is_unwrapped() {
    let resume = sample();
    assert_eq!(resume.name, "Ada Lovelace");
    assert_eq!(resume.experience.len(), 1);
}

#[test]
fn test_invalid_json_is_invalid_input() {
    assert!(matches!(ResumeRecord::from_json("{"), Err(Error::InvalidInput(_))));
    assert!(matches!(ResumeRecord::from_json("[1, 2]"), Err(Error::InvalidInput(_))));
}

#[test]
fn test_filenames() {
    assert_eq!(suggested_filename("Ada Lovelace", ExportFormat::Pdf), "Ada_Lovelace_Resume.pdf");
    assert_eq!(suggested_filename("Ada Lovelace", ExportFormat::Latex), "Ada_Lovelace_Resume.tex");
    assert_eq!(suggested_filename("", ExportFormat::Latex), "Resume.tex");
    assert_eq!(suggested_filename("   ", ExportFormat::Pdf), "Resume.pdf");
    // Surrounding whitespace never turns into underscores
    assert_eq!(suggested_filename(" Ada Lovelace ", ExportFormat::Pdf), "Ada_Lovelace_Resume.pdf");
    assert_eq!(suggested_filename("\tAda\n", ExportFormat::Latex), "Ada_Resume.tex");
}

#[test]
fn test_pdf_structure() {
    let artifact = export(&sample(), ExportFormat::Pdf).unwrap();
    let bytes = artifact.bytes();
    assert_eq!(artifact.media_type(), "application/pdf");
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(contains(bytes, b"/Type /Catalog"));
    assert!(contains(bytes, b"/BaseFont /Helvetica-Bold"));
    assert!(contains(bytes, b"/Encoding /WinAnsiEncoding"));
    assert!(contains(bytes, b"/Title (Ada Lovelace Resume)"));
    assert!(contains(bytes, b"Published Note G) Tj"));
    assert!(bytes.ends_with(b"%%EOF"));
}

#[test]
fn test_pdf_whitespace_in_duration_is_not_substituted() {
    let mut resume = sample();
    resume.experience[0].duration = "2019\t-\u{2003}2021".to_string();
    let artifact = export(&resume, ExportFormat::Pdf).unwrap();
    assert!(contains(artifact.bytes(), b"(2019 - 2021) Tj"));
    assert!(!contains(artifact.bytes(), b"2019?"));
    assert!(artifact.warnings.is_empty(), "{:?}", artifact.warnings);
}

#[test]
fn test_pdf_is_deterministic() {
    let first = export(&sample(), ExportFormat::Pdf).unwrap();
    let second = export(&sample(), ExportFormat::Pdf).unwrap();
    assert_eq!(first.bytes(), second.bytes());
}

#[test]
fn test_compressed_pdf() {
    let exporter = Exporter::with_config(ExportConfig::new().with_compress(true));
    let artifact = exporter.export(&sample(), ExportFormat::Pdf).unwrap();
    assert!(contains(artifact.bytes(), b"/Filter /FlateDecode"));
    assert!(!contains(artifact.bytes(), b"Published Note G) Tj"));
}

#[test]
fn test_config_reaches_pdf() {
    let config = ExportConfig::from_toml_str(
        r#"
        page_size = "a4"
        font_family = "courier"
        "#,
    )
    .unwrap();
    let artifact = Exporter::with_config(config)
        .export(&sample(), ExportFormat::Pdf)
        .unwrap();
    assert!(contains(artifact.bytes(), b"/MediaBox [0 0 595 842]"));
    assert!(contains(artifact.bytes(), b"/BaseFont /Courier"));
    assert!(!contains(artifact.bytes(), b"/BaseFont /Helvetica"));
}

#[test]
fn test_custom_backend_receives_layout() {
    let backend = RecordingBackend::default();
    let exporter = Exporter::with_backend(ExportConfig::default(), backend);
    let artifact = exporter.export(&sample(), ExportFormat::Pdf).unwrap();
    assert_eq!(artifact.bytes(), b"Ada Lovelace Resume / 1 page(s)");
    assert_eq!(*exporter.backend().pages.lock().unwrap(), vec![1]);

    // Markup output never reaches the backend
    exporter.export(&sample(), ExportFormat::Latex).unwrap();
    assert_eq!(exporter.backend().pages.lock().unwrap().len(), 1);
}

#[test]
fn test_backend_failures_surface() {
    let failing = Exporter::with_backend(ExportConfig::default(), FailingBackend);
    assert!(matches!(failing.export(&sample(), ExportFormat::Pdf), Err(Error::Render(_))));

    let empty = Exporter::with_backend(ExportConfig::default(), EmptyBackend);
    assert!(matches!(empty.export(&sample(), ExportFormat::Pdf), Err(Error::Render(_))));
}

#[test]
fn test_custom_page_size() {
    let config = ExportConfig::new()
        .with_page_size(PageSize::Custom {
            width: 300.0,
            height: 300.0,
        })
        .with_font_family(FontFamily::Helvetica);
    let exporter = Exporter::with_config(config);
    let layout = exporter.layout(&sample()).unwrap();
    assert!(layout.page_count() >= 2);
    assert_eq!(layout.geometry.width, 300.0);
}

#[test]
fn test_save_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let resume = sample();
    for format in [ExportFormat::Pdf, ExportFormat::Latex] {
        let artifact = export(&resume, format).unwrap();
        let path = artifact.save_to(dir.path()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes());
    }
    assert!(dir.path().join("Ada_Lovelace_Resume.pdf").exists());
    assert!(dir.path().join("Ada_Lovelace_Resume.tex").exists());
}

#[test]
fn test_concurrent_exports_are_independent() {
    let exporter = Exporter::new();
    let expected = exporter.export(&sample(), ExportFormat::Pdf).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| exporter.export(&sample(), ExportFormat::Pdf).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().bytes(), expected.bytes());
        }
    });
}
