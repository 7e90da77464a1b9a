use crate::render::RenderError;
use crate::render::text::{SEPARATOR, TITLE_MARKER};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

pub const FOOTER_TEXT: &str = "Report generated by the FELKLA methodology";

// A4 in points.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN_LEFT: f32 = 72.0;
const MARGIN_RIGHT: f32 = 72.0;
const MARGIN_TOP: f32 = 72.0;
const MARGIN_BOTTOM: f32 = 18.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

const BLANK_LINE_SPACING: f32 = 6.0;
const FOOTER_GAP: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgb(f32, f32, f32);

// #006837
const BRAND: Rgb = Rgb(0.0, 0.408, 0.216);
const INK: Rgb = Rgb(0.0, 0.0, 0.0);
const MUTED: Rgb = Rgb(0.5, 0.5, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy)]
struct Style {
    font: Font,
    size: f32,
    leading: f32,
    color: Rgb,
    align: Align,
    space_before: f32,
    space_after: f32,
}

const TITLE: Style = Style {
    font: Font::Bold,
    size: 16.0,
    leading: 19.2,
    color: BRAND,
    align: Align::Center,
    space_before: 0.0,
    space_after: 30.0,
};

const HEADING: Style = Style {
    font: Font::Bold,
    size: 12.0,
    leading: 14.4,
    color: BRAND,
    align: Align::Left,
    space_before: 12.0,
    space_after: 12.0,
};

const BODY: Style = Style {
    font: Font::Regular,
    size: 10.0,
    leading: 12.0,
    color: INK,
    align: Align::Left,
    space_before: 0.0,
    space_after: 6.0,
};

const FOOTER: Style = Style {
    font: Font::Regular,
    size: 8.0,
    leading: 9.6,
    color: MUTED,
    align: Align::Center,
    space_before: 0.0,
    space_after: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Heading,
    Body,
    Footer,
}

impl BlockKind {
    fn style(self) -> Style {
        match self {
            Self::Title => TITLE,
            Self::Heading => HEADING,
            Self::Body => BODY,
            Self::Footer => FOOTER,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Spacer(f32),
    Paragraph { kind: BlockKind, text: String },
}

/// Classifies each line of a plain-text report and appends the footer.
pub fn parse_blocks(text: &str) -> Result<Vec<Block>, RenderError> {
    let mut blocks = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();

        if let Some(bad) = line.chars().find(|c| c.is_control() && *c != '\t') {
            return Err(RenderError::InvalidText {
                line: idx + 1,
                reason: format!("control character {:?}", bad),
            });
        }

        if line.is_empty() {
            blocks.push(Block::Spacer(BLANK_LINE_SPACING));
        } else if line.starts_with(TITLE_MARKER) {
            blocks.push(paragraph(BlockKind::Title, line));
        } else if is_separator(line) {
            continue;
        } else if is_section_heading(line) {
            blocks.push(paragraph(BlockKind::Heading, line));
        } else {
            blocks.push(paragraph(BlockKind::Body, line));
        }
    }

    blocks.push(Block::Spacer(FOOTER_GAP));
    blocks.push(paragraph(BlockKind::Footer, FOOTER_TEXT));
    Ok(blocks)
}

fn paragraph(kind: BlockKind, text: &str) -> Block {
    Block::Paragraph {
        kind,
        text: text.replace('\t', " "),
    }
}

fn is_separator(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == SEPARATOR)
}

fn is_section_heading(line: &str) -> bool {
    line.ends_with(':')
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
}

/// Renders a plain-text report into a paginated A4 PDF.
pub fn render_document(text: &str) -> Result<Vec<u8>, RenderError> {
    let blocks = parse_blocks(text)?;

    let mut layout = Layout::new();
    for block in &blocks {
        match block {
            Block::Spacer(amount) => layout.space(*amount),
            Block::Paragraph { kind, text } => layout.paragraph(kind.style(), text),
        }
    }

    write_pdf(layout.finish())
}

struct Layout {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN_TOP,
        }
    }

    // Vertical space is dropped at the top of a page.
    fn space(&mut self, amount: f32) {
        if !self.current.is_empty() {
            self.y -= amount;
        }
    }

    fn paragraph(&mut self, style: Style, text: &str) {
        self.space(style.space_before);

        for line in wrap(text, style.font, style.size, CONTENT_WIDTH) {
            if self.y - style.leading < MARGIN_BOTTOM {
                self.break_page();
            }
            self.y -= style.leading;

            let width = text_width(&line, style.font, style.size);
            let x = match style.align {
                Align::Left => MARGIN_LEFT,
                Align::Center => MARGIN_LEFT + ((CONTENT_WIDTH - width) / 2.0).max(0.0),
            };
            let baseline = self.y + style.leading - style.size;
            self.current.extend(show_text(&line, x, baseline, style));
        }

        self.space(style.space_after);
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - MARGIN_TOP;
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

fn show_text(line: &str, x: f32, y: f32, style: Style) -> Vec<Operation> {
    let Rgb(r, g, b) = style.color;
    vec![
        Operation::new("BT", vec![]),
        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
        Operation::new(
            "Tf",
            vec![style.font.resource_name().into(), style.size.into()],
        ),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(line))]),
        Operation::new("ET", vec![]),
    ]
}

fn write_pdf(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|err| RenderError::Encode(err.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ];
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| RenderError::Write(err.to_string()))?;
    Ok(bytes)
}

/// Helvetica advance widths in 1/1000 em, coarse per character class.
fn char_width(c: char, font: Font) -> f32 {
    let regular = match c {
        ' ' | 'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '!' | '/' | '\'' | '|' => 278.0,
        'f' | 't' => 278.0,
        'r' | '-' | '(' | ')' | '[' | ']' => 333.0,
        'm' | 'M' => 833.0,
        'w' => 722.0,
        'W' => 944.0,
        '%' => 889.0,
        '0'..='9' => 556.0,
        c if c.is_uppercase() => 667.0,
        _ => 556.0,
    };
    match font {
        Font::Regular => regular,
        Font::Bold => regular * 1.08,
    }
}

fn text_width(text: &str, font: Font, size: f32) -> f32 {
    text.chars().map(|c| char_width(c, font)).sum::<f32>() * size / 1000.0
}

/// Greedy word wrap; words wider than the line are split by character.
fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ').filter(|word| !word.is_empty()) {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if text_width(&candidate, font, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        for c in word.chars() {
            current.push(c);
            if text_width(&current, font, size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Maps text to the WinAnsi code page used by the standard fonts; anything
/// outside it becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(blocks: &[Block]) -> Vec<Option<BlockKind>> {
        blocks
            .iter()
            .map(|block| match block {
                Block::Spacer(_) => None,
                Block::Paragraph { kind, .. } => Some(*kind),
            })
            .collect()
    }

    #[test]
    fn classifies_report_lines() {
        let text = "FELKLA ASSESSMENT REPORT - FELKLA-1\n=====\n\nANALYSIS:\n- Strengths: None identified\nPROJECT APPROVED - done\n";
        let blocks = parse_blocks(text).unwrap();
        assert_eq!(
            kinds(&blocks),
            vec![
                Some(BlockKind::Title),
                None,
                Some(BlockKind::Heading),
                Some(BlockKind::Body),
                Some(BlockKind::Body),
                None,
                Some(BlockKind::Footer),
            ]
        );
    }

    #[test]
    fn heading_needs_upper_case_and_colon() {
        assert!(is_section_heading("NEXT STEPS:"));
        assert!(is_section_heading("ÁREA RESPONSÁVEL:"));
        assert!(!is_section_heading("Next steps:"));
        assert!(!is_section_heading("NEXT STEPS"));
        assert!(!is_section_heading("123:"));
    }

    #[test]
    fn separator_is_only_repeated_equals() {
        assert!(is_separator("====="));
        assert!(is_separator("="));
        assert!(!is_separator("==x=="));
        assert!(!is_separator(""));
    }

    #[test]
    fn control_characters_fail_with_line_number() {
        let err = parse_blocks("ok\nbad\u{7}line\n").unwrap_err();
        match err {
            RenderError::InvalidText { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wraps_long_lines_within_content_width() {
        let text = "word ".repeat(200);
        let lines = wrap(&text, Font::Regular, 10.0, CONTENT_WIDTH);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 10.0) <= CONTENT_WIDTH);
        }
        let unbroken = "x".repeat(500);
        let lines = wrap(&unbroken, Font::Bold, 12.0, CONTENT_WIDTH);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), unbroken);
    }

    #[test]
    fn encodes_latin_and_replaces_the_rest() {
        assert_eq!(encode_win_ansi("Área"), vec![0xC1, b'r', b'e', b'a']);
        assert_eq!(encode_win_ansi("a—b"), vec![b'a', 0x97, b'b']);
        assert_eq!(encode_win_ansi("✅"), vec![b'?']);
    }

    #[test]
    fn renders_pdf_bytes() {
        let bytes = render_document("FELKLA ASSESSMENT REPORT - X\n===\n\nRESULT:\n- Final Score: 60.0%\n").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(bytes.len() > 200);
    }

    #[test]
    fn long_reports_span_several_pages() {
        let body: String = (0..400).map(|i| format!("- line {i}\n")).collect();
        let blocks = parse_blocks(&body).unwrap();
        let mut layout = Layout::new();
        for block in &blocks {
            match block {
                Block::Spacer(amount) => layout.space(*amount),
                Block::Paragraph { kind, text } => layout.paragraph(kind.style(), text),
            }
        }
        assert!(layout.finish().len() > 1);
        assert!(!render_document(&body).unwrap().is_empty());
    }

    #[test]
    fn empty_text_still_produces_a_page() {
        let bytes = render_document("").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn rendering_is_repeatable() {
        let text = "FELKLA ASSESSMENT REPORT - X\nBODY:\n- a\n";
        assert_eq!(render_document(text).unwrap(), render_document(text).unwrap());
    }
}
