//! # Invoice Layout
//!
//! Positions an [`InvoiceDocument`] on A4 pages as plain primitives
//! (text blocks and rules) so that the PDF writer only has to draw them.
//!
//! ## Page Geometry
//! ```text
//!  (0,297) ┌───────────────────────────────────────┐ (210,297)
//!          │  10 mm margin                         │
//!          │  ┌─────────────────────────────────┐  │
//!          │  │ header / parties / details      │  │  page 1 only
//!          │  │ table header                    │  │  repeated on
//!          │  │ row 1 … row n                   │  │  continuation pages
//!          │  │ totals, terms, signature        │  │  after the last row
//!          │  │                                 │  │
//!          │  │ footer band (footer, page x/y)  │  │  every page
//!          │  └─────────────────────────────────┘  │
//!   (0,0)  └───────────────────────────────────────┘ (210,0)
//! ```
//!
//! Coordinates are millimetres with the origin at the bottom-left corner,
//! as in PDF. Text `y` is the baseline.
//!
//! The built-in PDF fonts cover Latin-1 only. Every text block goes
//! through [`pdf_text`], so other scripts print as `?` rather than as
//! garbage glyphs.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use frameit_core::invoice::{InvoiceBody, InvoiceDocument, InvoiceRow, COLUMN_HEADERS};
use frameit_core::money::RUPEE_SYMBOL;

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 0.352_778;

/// Average glyph advance of Helvetica as a fraction of the font size,
/// rounded up so estimated widths never fall short.
const CHAR_WIDTH_EM: f32 = 0.56;

const ROW_HEIGHT: f32 = 7.0;
const CELL_PAD: f32 = 2.0;
const FOOTER_BAND: f32 = 8.0;
const BODY_SIZE: f32 = 9.0;
const SMALL_SIZE: f32 = 8.0;

/// Relative column widths; they sum to 1.
const COLUMN_WEIGHTS: [f32; 6] = [0.065, 0.40, 0.08, 0.16, 0.11, 0.185];
const COLUMN_ALIGN: [Align; 6] = [
    Align::Center,
    Align::Left,
    Align::Center,
    Align::Right,
    Align::Right,
    Align::Right,
];

// =============================================================================
// Primitives
// =============================================================================

/// Paper size and margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageSpec {
    /// A4 portrait with a 10 mm margin.
    pub const fn a4_portrait() -> Self {
        PageSpec {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 10.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn left(&self) -> f32 {
        self.margin_mm
    }

    pub fn right(&self) -> f32 {
        self.width_mm - self.margin_mm
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec::a4_portrait()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One line of text. `x` is the left edge, `y` the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub weight: FontWeight,
}

impl TextBlock {
    /// Estimated width in millimetres.
    pub fn width(&self) -> f32 {
        text_width_mm(&self.text, self.size)
    }

    /// Height of the glyph box above the baseline in millimetres.
    pub fn height(&self) -> f32 {
        self.size * MM_PER_PT
    }
}

/// A straight line.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextBlock),
    Rule(Rule),
}

/// One laid-out page. `number` starts at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextBlock> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            Element::Rule(_) => None,
        })
    }

    /// True when some text block on the page reads exactly `text`.
    pub fn contains_text(&self, text: &str) -> bool {
        self.texts().any(|t| t.text == text)
    }
}

// =============================================================================
// Text
// =============================================================================

/// `text` as the built-in Helvetica faces can draw it.
///
/// The rupee sign becomes `currency_label`. Curly quotes, en/em dashes and
/// the ellipsis become their ASCII forms. Any other character outside
/// Latin-1 becomes `?`.
pub fn pdf_text<'a>(text: &'a str, currency_label: &str) -> Cow<'a, str> {
    if text.chars().all(is_drawable) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{20B9}' => out.push_str(currency_label),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            c if is_drawable(c) => out.push(c),
            c if c.is_whitespace() => out.push(' '),
            _ => out.push('?'),
        }
    }
    Cow::Owned(out)
}

/// Printable Latin-1.
fn is_drawable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
}

/// Estimated width of `text` at `size` points, in millimetres.
pub fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * CHAR_WIDTH_EM * MM_PER_PT
}

/// Shortens `text` with a trailing `...` until it fits `max_width`.
pub fn fit_text(text: &str, size: f32, max_width: f32) -> String {
    if text_width_mm(text, size) <= max_width {
        return text.to_string();
    }

    let budget = max_width - text_width_mm("...", size);
    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        if text_width_mm(&out, size) > budget {
            out.pop();
            break;
        }
    }
    format!("{}...", out.trim_end())
}

// =============================================================================
// Page Builder
// =============================================================================

/// Accumulates pages. `cursor` is the distance from the top edge.
struct PageBuilder {
    spec: PageSpec,
    currency_label: String,
    pages: Vec<Page>,
    elements: Vec<Element>,
    cursor: f32,
}

impl PageBuilder {
    fn new(spec: PageSpec, currency_label: &str) -> Self {
        PageBuilder {
            spec,
            currency_label: currency_label.to_string(),
            pages: Vec::new(),
            elements: Vec::new(),
            cursor: spec.margin_mm,
        }
    }

    /// Lowest usable cursor position above the footer band.
    fn limit(&self) -> f32 {
        self.spec.height_mm - self.spec.margin_mm - FOOTER_BAND
    }

    fn fits(&self, height: f32) -> bool {
        self.cursor + height <= self.limit()
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            elements: std::mem::take(&mut self.elements),
        });
        self.cursor = self.spec.margin_mm;
    }

    fn advance(&mut self, mm: f32) {
        self.cursor += mm;
    }

    /// Places text whose top edge sits at the cursor, clipped to the
    /// horizontal span `[from, to]`.
    fn text(&mut self, text: &str, size: f32, weight: FontWeight, align: Align, from: f32, to: f32) {
        let fitted = fit_text(&pdf_text(text, &self.currency_label), size, to - from);
        let width = text_width_mm(&fitted, size);
        let x = match align {
            Align::Left => from,
            Align::Center => from + ((to - from) - width) / 2.0,
            Align::Right => to - width,
        };
        let y = self.spec.height_mm - (self.cursor + size * MM_PER_PT);

        self.elements.push(Element::Text(TextBlock {
            text: fitted,
            x,
            y,
            size,
            weight,
        }));
    }

    fn rule(&mut self, from: f32, to: f32, thickness: f32) {
        let y = self.spec.height_mm - self.cursor;
        self.elements.push(Element::Rule(Rule {
            x1: from,
            y1: y,
            x2: to,
            y2: y,
            thickness,
        }));
    }

    fn finish(mut self, footer: &str) -> Vec<Page> {
        if !self.elements.is_empty() || self.pages.is_empty() {
            self.new_page();
        }

        let spec = self.spec;
        let footer = pdf_text(footer, &self.currency_label).into_owned();
        let total = self.pages.len();
        let baseline = spec.margin_mm + 2.0;
        for page in &mut self.pages {
            let label = format!("Page {} of {}", page.number, total);
            let label_width = text_width_mm(&label, SMALL_SIZE);
            let footer_span = spec.content_width() - 2.0 * (label_width + CELL_PAD);
            let footer_text = fit_text(&footer, SMALL_SIZE, footer_span);
            let footer_width = text_width_mm(&footer_text, SMALL_SIZE);

            page.elements.push(Element::Text(TextBlock {
                text: footer_text,
                x: (spec.width_mm - footer_width) / 2.0,
                y: baseline,
                size: SMALL_SIZE,
                weight: FontWeight::Regular,
            }));
            page.elements.push(Element::Text(TextBlock {
                text: label,
                x: spec.right() - label_width,
                y: baseline,
                size: SMALL_SIZE,
                weight: FontWeight::Regular,
            }));
        }
        self.pages
    }
}

/// Column spans `(from, to)` across the content width.
fn column_spans(spec: &PageSpec) -> [(f32, f32); 6] {
    let mut spans = [(0.0, 0.0); 6];
    let mut x = spec.left();
    for (i, weight) in COLUMN_WEIGHTS.iter().enumerate() {
        let width = spec.content_width() * weight;
        spans[i] = (x, (x + width).min(spec.right()));
        x += width;
    }
    spans
}

// =============================================================================
// Invoice Layout
// =============================================================================

/// Lays out `doc` on as many pages as its rows need.
///
/// `currency_label` replaces the rupee sign, which the built-in PDF fonts
/// cannot draw.
pub fn layout_invoice(doc: &InvoiceDocument, spec: &PageSpec, currency_label: &str) -> Vec<Page> {
    let mut b = PageBuilder::new(*spec, currency_label);
    let spans = column_spans(spec);
    let headers: Vec<String> = COLUMN_HEADERS
        .iter()
        .map(|h| h.replace(RUPEE_SYMBOL, currency_label))
        .collect();

    layout_header(&mut b, doc);
    layout_parties(&mut b, doc);
    layout_details(&mut b, doc);
    layout_table_header(&mut b, &spans, &headers);

    match &doc.body {
        InvoiceBody::Rows { rows } => {
            for row in rows {
                if !b.fits(ROW_HEIGHT) {
                    b.new_page();
                    layout_continuation(&mut b, doc);
                    layout_table_header(&mut b, &spans, &headers);
                }
                layout_row(&mut b, &spans, row);
            }
        }
        InvoiceBody::NoItems { message } => {
            b.advance(3.0);
            b.text(message, BODY_SIZE, FontWeight::Regular, Align::Center, spec.left(), spec.right());
            b.advance(BODY_SIZE * MM_PER_PT + 3.0);
            b.rule(spec.left(), spec.right(), 0.5);
        }
    }

    if !b.fits(closing_height(doc)) {
        b.new_page();
    }
    layout_closing(&mut b, doc, currency_label);

    b.finish(&doc.footer)
}

fn layout_header(b: &mut PageBuilder, doc: &InvoiceDocument) {
    let (left, right) = (b.spec.left(), b.spec.right());
    let split = left + b.spec.content_width() * 0.65;
    let top = b.cursor;

    b.text(&doc.header.business_name, 18.0, FontWeight::Bold, Align::Left, left, split);
    b.advance(9.0);
    b.text(&doc.header.tagline, 10.0, FontWeight::Regular, Align::Left, left, split);

    b.cursor = top;
    b.text(&doc.header.title, 10.0, FontWeight::Bold, Align::Right, split, right);
    b.advance(6.0);
    let number = format!("#{}", doc.header.bill_number);
    b.text(&number, 14.0, FontWeight::Bold, Align::Right, split, right);

    b.cursor = top + 17.0;
    b.rule(left, right, 1.0);
    b.advance(6.0);
}

fn layout_parties(b: &mut PageBuilder, doc: &InvoiceDocument) {
    let (left, right) = (b.spec.left(), b.spec.right());
    let mid = left + b.spec.content_width() / 2.0;
    let line = 4.5;
    let top = b.cursor;

    b.text("Our Details", 11.0, FontWeight::Bold, Align::Left, left, mid - CELL_PAD);
    b.advance(6.0);
    let seller = &doc.seller;
    let seller_lines = seller
        .address_lines
        .iter()
        .chain([&seller.phone, &seller.email, &seller.website])
        .filter(|l| !l.trim().is_empty());
    for text in seller_lines {
        b.text(text, BODY_SIZE, FontWeight::Regular, Align::Left, left, mid - CELL_PAD);
        b.advance(line);
    }
    let seller_bottom = b.cursor;

    b.cursor = top;
    b.text("Bill To", 11.0, FontWeight::Bold, Align::Left, mid, right);
    b.advance(6.0);
    b.text(&doc.bill_to.name, 10.0, FontWeight::Bold, Align::Left, mid, right);
    b.advance(5.0);
    for text in &doc.bill_to.lines {
        b.text(text, BODY_SIZE, FontWeight::Regular, Align::Left, mid, right);
        b.advance(line);
    }

    b.cursor = b.cursor.max(seller_bottom) + 3.0;
}

fn layout_details(b: &mut PageBuilder, doc: &InvoiceDocument) {
    if doc.details.is_empty() {
        return;
    }
    let left = b.spec.left();
    let width = b.spec.content_width() / doc.details.len() as f32;
    let top = b.cursor;

    for (i, field) in doc.details.iter().enumerate() {
        let from = left + width * i as f32;
        let to = from + width - CELL_PAD;
        b.cursor = top;
        b.text(&field.label, SMALL_SIZE, FontWeight::Regular, Align::Left, from, to);
        b.advance(4.5);
        b.text(&field.value, 10.0, FontWeight::Bold, Align::Left, from, to);
    }

    b.cursor = top + 12.0;
}

fn layout_continuation(b: &mut PageBuilder, doc: &InvoiceDocument) {
    let text = format!(
        "{} - {} #{} (continued)",
        doc.header.business_name, doc.header.title, doc.header.bill_number
    );
    let (left, right) = (b.spec.left(), b.spec.right());
    b.text(&text, BODY_SIZE, FontWeight::Bold, Align::Left, left, right);
    b.advance(8.0);
}

fn layout_table_header(b: &mut PageBuilder, spans: &[(f32, f32); 6], headers: &[String]) {
    let (left, right) = (b.spec.left(), b.spec.right());
    b.rule(left, right, 0.8);
    b.advance(2.0);
    for ((from, to), (header, align)) in spans.iter().zip(headers.iter().zip(COLUMN_ALIGN)) {
        b.text(header, BODY_SIZE, FontWeight::Bold, align, from + CELL_PAD, to - CELL_PAD);
    }
    b.advance(ROW_HEIGHT - 2.0);
    b.rule(left, right, 0.8);
}

fn layout_row(b: &mut PageBuilder, spans: &[(f32, f32); 6], row: &InvoiceRow) {
    let cells = [
        row.index.to_string(),
        row.description.clone(),
        row.quantity.to_string(),
        row.unit_price.fixed2(),
        row.gst_rate_label(),
        row.total.fixed2(),
    ];

    b.advance(2.0);
    for ((from, to), (cell, align)) in spans.iter().zip(cells.iter().zip(COLUMN_ALIGN)) {
        b.text(cell, BODY_SIZE, FontWeight::Regular, align, from + CELL_PAD, to - CELL_PAD);
    }
    b.advance(ROW_HEIGHT - 2.0);
    b.rule(b.spec.left(), b.spec.right(), 0.3);
}

/// Height of totals, terms and signature together.
fn closing_height(doc: &InvoiceDocument) -> f32 {
    let totals = 4.0 + 4.0 * 6.0 + 1.0 + 2.0;
    let terms = 8.0 + 5.0 * doc.terms.len() as f32;
    let signature = 6.0 + 16.0;
    totals + terms + signature
}

fn layout_closing(b: &mut PageBuilder, doc: &InvoiceDocument, currency_label: &str) {
    let (left, right) = (b.spec.left(), b.spec.right());
    let label_from = left + b.spec.content_width() * 0.55;

    // totals
    b.advance(4.0);
    let lines = doc.totals.lines();
    let last = lines.len() - 1;
    for (i, (label, amount)) in lines.iter().enumerate() {
        let weight = if i == last {
            b.rule(label_from, right, 0.8);
            b.advance(1.0);
            FontWeight::Bold
        } else {
            FontWeight::Regular
        };
        let size = if i == last { 11.0 } else { 10.0 };
        b.text(label, size, weight, Align::Left, label_from, right);
        b.text(&amount.with_label(currency_label), size, weight, Align::Right, label_from, right);
        b.advance(6.0);
    }
    b.advance(2.0);

    // terms
    if !doc.terms.is_empty() {
        b.text("Terms & Conditions:", 10.0, FontWeight::Bold, Align::Left, left, right);
        b.advance(8.0);
        for term in &doc.terms {
            b.text(&format!("- {}", term), SMALL_SIZE, FontWeight::Regular, Align::Left, left, right);
            b.advance(5.0);
        }
    }

    // signature
    let sign_from = right - 60.0;
    b.advance(14.0);
    b.rule(sign_from, right, 0.5);
    b.advance(2.0);
    b.text(&doc.signature_label, BODY_SIZE, FontWeight::Regular, Align::Center, sign_from, right);
    b.advance(6.0);
}

// =============================================================================
// Unit Tests
// =============================================================================
