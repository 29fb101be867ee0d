//! PDF writer. Draws laid-out [`Page`]s with the built-in Helvetica faces.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use crate::error::{ExportError, ExportResult};
use crate::layout::{Element, FontWeight, Page, PageSpec};

/// Renders `pages` into PDF bytes.
pub fn render_pdf(pages: &[Page], spec: &PageSpec, title: &str) -> ExportResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(spec.width_mm),
        Mm(spec.height_mm),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(
                Mm(spec.width_mm),
                Mm(spec.height_mm),
                format!("Page {}", page.number),
            );
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, &regular, &bold);
    }

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Render(e.to_string()))
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for element in &page.elements {
        match element {
            Element::Text(text) => {
                let font = match text.weight {
                    FontWeight::Regular => regular,
                    FontWeight::Bold => bold,
                };
                layer.use_text(text.text.as_str(), text.size, Mm(text.x), Mm(text.y), font);
            }
            Element::Rule(rule) => {
                layer.set_outline_thickness(rule.thickness);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(rule.x1), Mm(rule.y1)), false),
                        (Point::new(Mm(rule.x2), Mm(rule.y2)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Rule, TextBlock};

    #[test]
    fn test_renders_pdf_bytes() {
        let spec = PageSpec::a4_portrait();
        let pages: Vec<Page> = (1..=2)
            .map(|number| Page {
                number,
                elements: vec![
                    Element::Text(TextBlock {
                        text: format!("Page {} of 2", number),
                        x: 20.0,
                        y: 20.0,
                        size: 8.0,
                        weight: FontWeight::Regular,
                    }),
                    Element::Rule(Rule {
                        x1: 10.0,
                        y1: 30.0,
                        x2: 200.0,
                        y2: 30.0,
                        thickness: 0.5,
                    }),
                ],
            })
            .collect();

        let bytes = render_pdf(&pages, &spec, "Invoice").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
