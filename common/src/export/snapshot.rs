//! Printable snapshot of the detail view
//!
//! Lays the detail sections out as a single SVG page, 800 px wide with
//! 20 px padding. Text width is estimated from average glyph widths, so
//! wrapping is approximate but deterministic.

use crate::detail::{DetailField, DetailView, ProductTable};

pub const SNAPSHOT_WIDTH_PX: u32 = 800;
pub const SNAPSHOT_PADDING_PX: u32 = 20;
/// Raw OCR text printed into the snapshot is capped at this many characters.
pub const RAW_TEXT_LIMIT: usize = 2000;

const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
const MONO_FAMILY: &str = "Courier New, monospace";

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 14.0;
const TABLE_SIZE: f32 = 12.0;
const RAW_SIZE: f32 = 10.0;

/// Average advance of a proportional glyph, as a fraction of the font size.
const PROPORTIONAL_ADVANCE: f32 = 0.55;
const MONO_ADVANCE: f32 = 0.6;

const CELL_PADDING: f32 = 8.0;
const RAW_PADDING: f32 = 10.0;

/// Rendered-but-not-rasterized detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub svg: String,
    pub width: u32,
    pub height: u32,
}

/// Builds the snapshot for one document.
pub fn render_snapshot(view: &DetailView) -> Snapshot {
    let mut canvas = SvgCanvas::new();

    canvas.text_block(&view.title, TITLE_SIZE, true, FONT_FAMILY, PROPORTIONAL_ADVANCE);
    canvas.rule();

    canvas.heading("Informações Principais");
    canvas.fields(&view.main);

    canvas.heading("Detalhes do Transporte");
    canvas.fields(&view.transport);

    if let Some(table) = &view.products {
        canvas.heading("Produtos Enviados");
        canvas.table(table);
    }

    canvas.heading("Conteúdo Bruto (OCR)");
    canvas.preformatted(&view.raw_text_excerpt(RAW_TEXT_LIMIT));

    canvas.finish()
}

struct SvgCanvas {
    body: String,
    cursor_y: f32,
}

impl SvgCanvas {
    fn new() -> Self {
        Self {
            body: String::new(),
            cursor_y: SNAPSHOT_PADDING_PX as f32,
        }
    }

    fn content_width(&self) -> f32 {
        (SNAPSHOT_WIDTH_PX - 2 * SNAPSHOT_PADDING_PX) as f32
    }

    fn left(&self) -> f32 {
        SNAPSHOT_PADDING_PX as f32
    }

    fn text_block(&mut self, text: &str, size: f32, bold: bool, family: &str, advance: f32) {
        let max_chars = chars_per_line(self.content_width(), size, advance);
        let line_height = size * 1.3;
        for line in wrap_text(text, max_chars) {
            self.cursor_y += line_height;
            self.push_text(self.left(), self.cursor_y - size * 0.3, &line, size, bold, family);
        }
        self.cursor_y += size * 0.4;
    }

    fn heading(&mut self, text: &str) {
        self.cursor_y += HEADING_SIZE * 0.6;
        self.text_block(text, HEADING_SIZE, true, FONT_FAMILY, PROPORTIONAL_ADVANCE);
    }

    fn rule(&mut self) {
        self.cursor_y += 4.0;
        self.body.push_str(&format!(
            r##"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="#cccccc" stroke-width="1"/>"##,
            x1 = self.left(),
            x2 = self.left() + self.content_width(),
            y = self.cursor_y
        ));
        self.cursor_y += 8.0;
    }

    fn fields(&mut self, fields: &[DetailField]) {
        for field in fields {
            let label = format!("{}:", field.label);
            let value = field.display();
            let label_width = label.chars().count() as f32 * BODY_SIZE * PROPORTIONAL_ADVANCE;
            let max_chars = chars_per_line(
                (self.content_width() - label_width).max(BODY_SIZE * 10.0),
                BODY_SIZE,
                PROPORTIONAL_ADVANCE,
            );
            let line_height = BODY_SIZE * 1.5;
            for (i, line) in wrap_text(&value, max_chars).into_iter().enumerate() {
                self.cursor_y += line_height;
                let baseline = self.cursor_y - BODY_SIZE * 0.4;
                if i == 0 {
                    self.push_text(self.left(), baseline, &label, BODY_SIZE, true, FONT_FAMILY);
                }
                self.push_text(
                    self.left() + label_width + BODY_SIZE * 0.4,
                    baseline,
                    &line,
                    BODY_SIZE,
                    false,
                    FONT_FAMILY,
                );
            }
        }
        self.cursor_y += BODY_SIZE * 0.5;
    }

    fn table(&mut self, table: &ProductTable) {
        let columns = table.column_count().max(1);
        let col_width = self.content_width() / columns as f32;
        let max_chars = chars_per_line(col_width - 2.0 * CELL_PADDING, TABLE_SIZE, PROPORTIONAL_ADVANCE);
        let row_height = TABLE_SIZE + 2.0 * CELL_PADDING;

        let rows = std::iter::once((&table.header, true)).chain(table.rows.iter().map(|row| (row, false)));
        for (row, is_header) in rows {
            let top = self.cursor_y;
            if is_header {
                self.body.push_str(&format!(
                    r##"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="#f2f2f2"/>"##,
                    x = self.left(),
                    y = top,
                    w = self.content_width(),
                    h = row_height
                ));
            }
            for col in 0..columns {
                let x = self.left() + col as f32 * col_width;
                self.body.push_str(&format!(
                    r##"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="none" stroke="#dddddd" stroke-width="1"/>"##,
                    x = x,
                    y = top,
                    w = col_width,
                    h = row_height
                ));
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                let text = truncate_to(cell, max_chars);
                self.push_text(
                    x + CELL_PADDING,
                    top + CELL_PADDING + TABLE_SIZE * 0.85,
                    &text,
                    TABLE_SIZE,
                    is_header,
                    FONT_FAMILY,
                );
            }
            self.cursor_y += row_height;
        }
        self.cursor_y += 20.0;
    }

    fn preformatted(&mut self, text: &str) {
        let inner_width = self.content_width() - 2.0 * RAW_PADDING;
        let max_chars = chars_per_line(inner_width, RAW_SIZE, MONO_ADVANCE);
        let lines = wrap_text(text, max_chars);
        let line_height = RAW_SIZE * 1.4;
        let block_height = lines.len() as f32 * line_height + 2.0 * RAW_PADDING;

        self.body.push_str(&format!(
            r##"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="4" fill="#f5f5f5"/>"##,
            x = self.left(),
            y = self.cursor_y,
            w = self.content_width(),
            h = block_height
        ));
        let mut y = self.cursor_y + RAW_PADDING;
        for line in lines {
            y += line_height;
            self.push_text(self.left() + RAW_PADDING, y - RAW_SIZE * 0.35, &line, RAW_SIZE, false, MONO_FAMILY);
        }
        self.cursor_y += block_height;
    }

    fn push_text(&mut self, x: f32, y: f32, text: &str, size: f32, bold: bool, family: &str) {
        if text.is_empty() {
            return;
        }
        self.body.push_str(&format!(
            r##"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" font-weight="{weight}" fill="#222222" xml:space="preserve">{text}</text>"##,
            x = x,
            y = y,
            family = family,
            size = size,
            weight = if bold { "bold" } else { "normal" },
            text = escape_xml(text)
        ));
    }

    fn finish(self) -> Snapshot {
        let height = (self.cursor_y + SNAPSHOT_PADDING_PX as f32).ceil() as u32;
        let mut svg = String::with_capacity(self.body.len() + 256);
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = SNAPSHOT_WIDTH_PX,
            h = height
        ));
        svg.push_str(&format!(
            r##"<rect x="0" y="0" width="{w}" height="{h}" fill="#ffffff"/>"##,
            w = SNAPSHOT_WIDTH_PX,
            h = height
        ));
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        Snapshot {
            svg,
            width: SNAPSHOT_WIDTH_PX,
            height,
        }
    }
}

fn chars_per_line(width: f32, font_size: f32, advance: f32) -> usize {
    ((width / (font_size * advance)).floor() as usize).max(1)
}

/// Splits on newlines, form feeds and vertical tabs, then wraps each
/// paragraph at word boundaries. Words longer than a line are hard-broken.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split(['\n', '\u{b}', '\u{c}']) {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split(' ') {
            let mut word: Vec<char> = word.chars().collect();
            loop {
                let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
                if needed <= max_chars {
                    if current_len > 0 {
                        current.push(' ');
                        current_len += 1;
                    }
                    current.extend(word.iter());
                    current_len += word.len();
                    break;
                }
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                    continue;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
        }
        lines.push(current);
    }
    lines
}

fn truncate_to(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Escapes markup and drops characters XML 1.0 does not allow.
fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' || c == '\u{fffe}' || c == '\u{ffff}' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::sample_response;
    use crate::types::AnalysisResult;

    fn sample_view() -> DetailView {
        let result = AnalysisResult::from_value(sample_response()).expect("parse failed");
        DetailView::from_result(&result)
    }

    #[test]
    fn test_wrap_text_words() {
        assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_text_hard_breaks_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("xy abcdefghij", 4), vec!["xy", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_multibyte() {
        assert_eq!(wrap_text("ããã ããã", 3), vec!["ããã", "ããã"]);
    }

    #[test]
    fn test_snapshot_contains_sections() {
        let snapshot = render_snapshot(&sample_view());
        assert_eq!(snapshot.width, 800);
        assert!(snapshot.height > 200);
        for needle in [
            "NOTA DE REMESSA",
            "Informações Principais",
            "Detalhes do Transporte",
            "Produtos Enviados",
            "Cimento CP-II",
            "Conteúdo Bruto (OCR)",
            "João Silva",
        ] {
            assert!(snapshot.svg.contains(needle), "missing {needle}");
        }
        assert!(snapshot.svg.starts_with("<svg"));
        assert!(snapshot.svg.ends_with("</svg>"));
    }

    #[test]
    fn test_snapshot_escapes_markup() {
        let mut view = sample_view();
        view.raw_text = "<script>&</script>".to_string();
        let snapshot = render_snapshot(&view);
        assert!(snapshot.svg.contains("&lt;script&gt;&amp;&lt;/script&gt;"));
        assert!(!snapshot.svg.contains("<script>"));
    }

    #[test]
    fn test_wrap_text_page_breaks() {
        assert_eq!(wrap_text("PAGINA 1\u{c}PAGINA 2", 20), vec!["PAGINA 1", "PAGINA 2"]);
        assert_eq!(wrap_text("a\u{b}b", 20), vec!["a", "b"]);
    }

    #[test]
    fn test_escape_xml_drops_control_chars() {
        assert_eq!(escape_xml("a\u{0}b\u{1f}c\u{ffff}"), "abc");
        assert_eq!(escape_xml("x\ty"), "x\ty");
    }

    #[test]
    fn test_snapshot_has_no_control_chars() {
        let mut view = sample_view();
        view.raw_text = "PAGINA 1\u{c}PAGINA 2\u{0}".to_string();
        view.title = "scan\u{b}01.png".to_string();
        let snapshot = render_snapshot(&view);
        assert!(snapshot.svg.contains("PAGINA 1"));
        assert!(snapshot.svg.contains("PAGINA 2"));
        assert!(!snapshot
            .svg
            .chars()
            .any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
    }

    #[test]
    fn test_snapshot_caps_raw_text() {
        let mut view = sample_view();
        view.raw_text = "x".repeat(10_000);
        let capped = render_snapshot(&view);
        view.raw_text = "x".repeat(RAW_TEXT_LIMIT);
        let exact = render_snapshot(&view);
        assert_eq!(capped.height, exact.height);
    }

    #[test]
    fn test_snapshot_grows_with_text() {
        let mut view = sample_view();
        view.raw_text = "linha\n".repeat(5);
        let short = render_snapshot(&view);
        view.raw_text = "linha\n".repeat(150);
        let long = render_snapshot(&view);
        assert!(long.height > short.height);
    }

    #[test]
    fn test_truncate_to() {
        assert_eq!(truncate_to("abc", 5), "abc");
        assert_eq!(truncate_to("abcdef", 4), "abc…");
    }
}
