use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::models::document::Document;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const BODY_WRAP: usize = 90;

/// Render the CV view as a single downloadable PDF.
pub fn render_cv(doc: &Document) -> Result<Vec<u8>, String> {
    let title = if doc.name.is_empty() {
        "CV".to_string()
    } else {
        format!("{} — CV", doc.name)
    };

    let (pdf, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "cv");
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| e.to_string())?;

    let mut writer = CvWriter {
        pdf: &pdf,
        layer: pdf.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT - MARGIN,
    };

    // ── Header ──
    let name = if doc.name.is_empty() { "Unnamed" } else { &doc.name };
    writer.line(name, &bold, 22.0, 10.0);
    if !doc.title.is_empty() {
        writer.line(&doc.title, &regular, 12.0, 7.0);
    }
    let contact_bits: Vec<&str> = [
        doc.contact.email.as_str(),
        doc.contact.phone.as_str(),
        doc.contact.location.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect();
    if !contact_bits.is_empty() {
        writer.line(&contact_bits.join("  ·  "), &regular, 10.0, 8.0);
    }
    writer.gap(4.0);

    // ── About ──
    if !doc.about.is_empty() {
        writer.heading("About", &bold);
        for paragraph in doc.about.lines().filter(|l| !l.trim().is_empty()) {
            for row in wrap(paragraph.trim(), BODY_WRAP) {
                writer.line(&row, &regular, 10.0, 5.0);
            }
        }
        writer.gap(4.0);
    }

    // ── Skills ──
    if !doc.skills.is_empty() {
        writer.heading("Skills", &bold);
        for skill in &doc.skills {
            writer.line(
                &format!("{} — {}%", skill.name, skill.level),
                &regular,
                10.0,
                5.0,
            );
        }
        writer.gap(4.0);
    }

    // ── Projects ──
    if !doc.projects.is_empty() {
        writer.heading("Projects", &bold);
        for project in &doc.projects {
            writer.line(&project.title, &bold, 11.0, 6.0);
            for row in wrap(&project.short_description, BODY_WRAP) {
                writer.line(&row, &regular, 10.0, 5.0);
            }
            if !project.technologies.is_empty() {
                writer.line(
                    &format!("Technologies: {}", project.technologies.join(", ")),
                    &regular,
                    9.0,
                    5.0,
                );
            }
            writer.gap(2.0);
        }
    }

    pdf.save_to_bytes().map_err(|e| e.to_string())
}

struct CvWriter<'a> {
    pdf: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl CvWriter<'_> {
    fn line(&mut self, text: &str, font: &IndirectFontRef, size: f32, advance: f32) {
        self.page_break_if_needed();
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= advance;
    }

    fn heading(&mut self, text: &str, bold: &IndirectFontRef) {
        self.page_break_if_needed();
        self.line(text, bold, 14.0, 8.0);
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn page_break_if_needed(&mut self) {
        if self.y < MARGIN {
            let (page, layer) =
                self.pdf
                    .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "cv");
            self.layer = self.pdf.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }
}

/// Greedy word wrap for the fixed-width body font.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
