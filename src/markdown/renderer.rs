use std::collections::HashMap;

use crate::markdown::RenderOptions;
use crate::markdown::style::{Painter, StyleSlot};
use crate::markdown::syntax::{self, SyntaxSpan};
use crate::markdown::table::TableState;
use crate::markdown::tree::{Node, NodeKind, walk};
use crate::markdown::wrap::{
    MAX_LINE_WIDTH, display_width, split_at_width, truncate_with_ellipsis, wrap_text,
};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

const BULLET: &str = "\u{2022} "; // •
const QUOTE_BAR: &str = "\u{2502} "; // │
const RULE_GLYPH: &str = "\u{2500}"; // ─
const IMAGE_OPEN: &str = "[Image: ";
const IMAGE_CLOSE: &str = "]";

/// Inline code longer than this is truncated.
const MAX_INLINE_CODE: usize = MAX_LINE_WIDTH - 2;
/// Columns kept from a truncated link destination.
const LINK_URL_KEEP: usize = MAX_LINE_WIDTH - 10;
/// Columns kept from a truncated image destination.
const IMAGE_URL_KEEP: usize = MAX_LINE_WIDTH - 15;
/// Text columns inside a code block box (`│ ` + text + ` │`).
const CODE_BOX_INNER: usize = MAX_LINE_WIDTH - 4;
const TAB_WIDTH: usize = 4;

// ---------------------------------------------------------------------------
// Traversal state
// ---------------------------------------------------------------------------

/// Mutable state threaded through one rendering pass.
#[derive(Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderState {
    pub list_level: usize,
    /// Items seen so far at each list depth.
    pub list_index: HashMap<usize, usize>,
    pub in_code_block: bool,
    pub in_emph: bool,
    pub in_strong: bool,
    pub in_heading: Option<u8>,
    /// Visible columns on the line being built.
    pub current_line_len: usize,
    pub just_added_emph_space: bool,
    /// The last visible column on the line is a space.
    pub trailing_space: bool,
    /// The previous text run ended in whitespace that has not been emitted.
    pub pending_space: bool,
    /// Width of the list marker / quote bar already on this line.
    pub prefix_len: usize,
    /// Width of the quote bars that open this line.
    pub quote_len: usize,
    /// Present only while inside a table.
    pub table: Option<TableState>,
}

impl RenderState {
    pub fn in_table(&self) -> bool {
        self.table.is_some()
    }

    fn in_table_cell(&self) -> bool {
        self.table.as_ref().is_some_and(TableState::in_cell)
    }

    /// The line holds quote bars and nothing else.
    fn quote_only(&self) -> bool {
        self.quote_len > 0 && self.current_line_len == self.quote_len
    }

    fn text_style(&self) -> StyleSlot {
        if self.in_heading.is_some() {
            return StyleSlot::Heading;
        }
        match (self.in_strong, self.in_emph) {
            (true, true) => StyleSlot::StrongEmph,
            (true, false) => StyleSlot::Strong,
            (false, true) => StyleSlot::Emph,
            (false, false) => StyleSlot::Plain,
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Emphasis {
    Emph,
    Strong,
}

/// Turns walk events into styled text. One renderer renders one document.
pub struct Renderer {
    painter: Painter,
    syntax_highlight: bool,
    state: RenderState,
    out: String,
}

/// Render a parsed document.
pub fn render_document(root: &Node, options: &RenderOptions) -> String {
    let mut renderer = Renderer::new(options);
    walk(root, |node, parent, entering| {
        renderer.visit(node, parent, entering);
    });
    renderer.finish()
}

impl Renderer {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            painter: Painter::new(options.theme.clone(), options.depth),
            syntax_highlight: options.syntax_highlight,
            state: RenderState::default(),
            out: String::new(),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Handle one walk event. Leaves only ever arrive with `entering` set.
    pub fn visit(&mut self, node: &Node, parent: Option<&Node>, entering: bool) {
        match &node.kind {
            NodeKind::Heading { level } => self.heading(*level, entering),
            NodeKind::Paragraph => self.paragraph(entering),
            NodeKind::Text(literal) => self.text(literal),
            NodeKind::Emph => self.emphasis(Emphasis::Emph, entering),
            NodeKind::Strong => self.emphasis(Emphasis::Strong, entering),
            NodeKind::Link { destination } => {
                if !entering {
                    self.link_end(destination);
                }
            }
            NodeKind::Image { destination } => self.image(destination, entering),
            NodeKind::Code(literal) => self.inline_code(literal),
            NodeKind::CodeBlock { info, literal } => {
                self.state.in_code_block = entering;
                if entering {
                    self.code_block(info, literal);
                }
            }
            NodeKind::List { .. } => self.list(entering),
            NodeKind::ListItem => self.list_item(parent, entering),
            NodeKind::Table => self.table(entering),
            NodeKind::TableHeader => {
                if let Some(table) = self.state.table.as_mut() {
                    table.is_header = entering;
                }
            }
            NodeKind::TableRow => {
                if let Some(table) = self.state.table.as_mut() {
                    if entering {
                        table.start_row();
                    } else {
                        table.finish_row();
                    }
                }
            }
            NodeKind::TableCell { align } => {
                if let Some(table) = self.state.table.as_mut() {
                    if entering {
                        table.start_cell(*align);
                    } else {
                        table.finish_cell();
                    }
                }
            }
            NodeKind::BlockQuote => {
                if entering {
                    self.block_quote();
                }
            }
            NodeKind::HorizontalRule => self.horizontal_rule(),
            NodeKind::Softbreak | NodeKind::Hardbreak => self.line_break(),
            NodeKind::Document | NodeKind::TableBody | NodeKind::Other => {}
        }
    }

    // -- line bookkeeping ---------------------------------------------------

    fn newline(&mut self) {
        self.out.push('\n');
        let s = &mut self.state;
        s.current_line_len = 0;
        s.prefix_len = 0;
        s.quote_len = 0;
        s.trailing_space = false;
        s.pending_space = false;
    }

    fn end_line(&mut self) {
        if self.state.current_line_len > 0 {
            self.newline();
        }
    }

    /// Emit one separating space if the line has content that does not
    /// already end in one.
    fn separate(&mut self) {
        let s = &mut self.state;
        if s.current_line_len > 0 && !s.trailing_space && s.current_line_len < MAX_LINE_WIDTH {
            self.out.push(' ');
            s.current_line_len += 1;
            s.trailing_space = true;
        }
    }

    fn push_painted(&mut self, slot: StyleSlot, text: &str) {
        let painted = self.painter.paint(slot, text);
        self.out.push_str(&painted);
    }

    /// Place a span that must not be split, breaking the line first if it
    /// would not fit.
    fn place_inline(&mut self, slot: StyleSlot, text: &str) {
        let width = display_width(text);
        let len = self.state.current_line_len;
        if len > 0 && (len + width > MAX_LINE_WIDTH || len >= MAX_LINE_WIDTH) {
            self.newline();
        }
        self.push_painted(slot, text);

        let s = &mut self.state;
        s.current_line_len = (s.current_line_len + width).min(MAX_LINE_WIDTH);
        s.trailing_space = text.ends_with(' ');
        s.pending_space = false;
    }

    // -- inline -------------------------------------------------------------

    fn text(&mut self, literal: &str) {
        if let Some(table) = self.state.table.as_mut()
            && table.push_cell_text(literal)
        {
            return;
        }

        let suppress = std::mem::take(&mut self.state.just_added_emph_space);
        if literal.starts_with(char::is_whitespace) && !suppress {
            self.state.pending_space = true;
        }

        let s = &self.state;
        let sep = usize::from(s.pending_space && s.current_line_len > 0 && !s.trailing_space);
        let (wrapped, new_len) = wrap_text(literal, s.current_line_len + sep);
        if wrapped.is_empty() {
            return;
        }

        if sep == 1 && !wrapped.starts_with('\n') {
            self.out.push(' ');
        }
        let slot = self.state.text_style();
        for (i, line) in wrapped.split('\n').enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.push_painted(slot, line);
        }

        let s = &mut self.state;
        if wrapped.contains('\n') {
            s.prefix_len = 0;
            s.quote_len = 0;
        }
        s.current_line_len = new_len;
        s.trailing_space = false;
        s.pending_space = literal.ends_with(char::is_whitespace);
    }

    fn emphasis(&mut self, kind: Emphasis, entering: bool) {
        if self.state.in_table_cell() {
            self.set_emphasis(kind, entering);
            return;
        }

        if entering {
            self.state.pending_space = false;
            self.separate();
            self.set_emphasis(kind, true);
            self.state.just_added_emph_space = false;
        } else {
            self.set_emphasis(kind, false);
            self.separate();
            self.state.just_added_emph_space = true;
        }
    }

    fn set_emphasis(&mut self, kind: Emphasis, on: bool) {
        match kind {
            Emphasis::Emph => self.state.in_emph = on,
            Emphasis::Strong => self.state.in_strong = on,
        }
    }

    fn inline_code(&mut self, literal: &str) {
        if let Some(table) = self.state.table.as_mut()
            && table.push_cell_text(literal)
        {
            return;
        }

        let code = if display_width(literal) > MAX_INLINE_CODE {
            truncate_with_ellipsis(literal, MAX_INLINE_CODE - 3)
        } else {
            literal.to_owned()
        };
        self.place_inline(StyleSlot::Code, &format!(" {code} "));
    }

    fn link_end(&mut self, destination: &str) {
        if self.state.in_table_cell() {
            return;
        }
        let url = if display_width(destination) > LINK_URL_KEEP {
            truncate_with_ellipsis(destination, LINK_URL_KEEP)
        } else {
            destination.to_owned()
        };
        self.place_inline(StyleSlot::Link, &format!(" ({url})"));
    }

    fn image(&mut self, destination: &str, entering: bool) {
        if self.state.in_table_cell() {
            return;
        }

        if entering {
            let open = display_width(IMAGE_OPEN);
            if self.state.pending_space {
                self.separate();
                self.state.pending_space = false;
            }
            let len = self.state.current_line_len;
            if len > 0 && len + open >= MAX_LINE_WIDTH {
                self.newline();
            }
            self.push_painted(StyleSlot::ImageMarker, IMAGE_OPEN);
            self.state.current_line_len += open;
            self.state.trailing_space = true;
            return;
        }

        let url = if display_width(destination) > IMAGE_URL_KEEP {
            truncate_with_ellipsis(destination, IMAGE_URL_KEEP)
        } else {
            destination.to_owned()
        };
        let tail = format!(" - {url}");
        let width = display_width(&tail) + IMAGE_CLOSE.len();
        let len = self.state.current_line_len;
        if len > 0 && len + width > MAX_LINE_WIDTH {
            self.newline();
        }
        self.push_painted(StyleSlot::Link, &tail);
        self.push_painted(StyleSlot::ImageMarker, IMAGE_CLOSE);

        let s = &mut self.state;
        s.current_line_len = (s.current_line_len + width).min(MAX_LINE_WIDTH);
        s.trailing_space = false;
        s.pending_space = false;
    }

    fn line_break(&mut self) {
        if let Some(table) = self.state.table.as_mut()
            && table.push_cell_text(" ")
        {
            return;
        }
        self.newline();
    }

    // -- blocks -------------------------------------------------------------

    fn heading(&mut self, level: u8, entering: bool) {
        if entering {
            if !self.state.quote_only() {
                self.newline();
            }
            let marker = format!("{} ", "#".repeat(usize::from(level)));
            self.push_painted(StyleSlot::HeadingMarker, &marker);
            self.state.current_line_len += marker.len();
            self.state.trailing_space = true;
            self.state.in_heading = Some(level);
        } else {
            self.newline();
            self.state.in_heading = None;
        }
    }

    fn paragraph(&mut self, entering: bool) {
        if entering {
            let s = &mut self.state;
            s.current_line_len = s.prefix_len;
            s.trailing_space = s.prefix_len > 0;
            s.pending_space = false;
        } else {
            self.newline();
        }
    }

    fn list(&mut self, entering: bool) {
        let s = &mut self.state;
        if entering {
            s.list_level += 1;
            s.list_index.insert(s.list_level, 0);
        } else {
            s.list_level = s.list_level.saturating_sub(1);
            self.newline();
        }
    }

    fn list_item(&mut self, parent: Option<&Node>, entering: bool) {
        if !entering {
            self.end_line();
            return;
        }

        if !self.state.quote_only() {
            self.end_line();
        }
        let level = self.state.list_level;
        let counter = self.state.list_index.entry(level).or_insert(0);
        *counter += 1;
        let n = *counter;

        let ordered = matches!(
            parent.map(|p| &p.kind),
            Some(NodeKind::List { ordered: true })
        );
        let marker = if ordered {
            format!("{n}. ")
        } else {
            BULLET.to_owned()
        };
        let marker_width = display_width(&marker);
        if self.state.current_line_len + marker_width > MAX_LINE_WIDTH {
            self.newline();
        }

        // Deep nesting stops indenting once the marker would not fit.
        let base = self.state.current_line_len;
        let indent = (2 * level.saturating_sub(1))
            .min(MAX_LINE_WIDTH.saturating_sub(base + marker_width));
        self.out.push_str(&" ".repeat(indent));
        self.push_painted(StyleSlot::ListMarker, &marker);

        let width = base + indent + marker_width;
        let s = &mut self.state;
        s.current_line_len = width;
        s.prefix_len = width;
        s.trailing_space = true;
        s.pending_space = false;
    }

    fn block_quote(&mut self) {
        let width = display_width(QUOTE_BAR);
        if self.state.current_line_len + width > MAX_LINE_WIDTH {
            return;
        }
        self.push_painted(StyleSlot::QuoteBar, QUOTE_BAR);
        let s = &mut self.state;
        if s.quote_len == s.current_line_len {
            s.quote_len += width;
        }
        s.current_line_len += width;
        s.prefix_len += width;
        s.trailing_space = true;
    }

    fn horizontal_rule(&mut self) {
        self.newline();
        self.push_painted(StyleSlot::Rule, &RULE_GLYPH.repeat(MAX_LINE_WIDTH));
        self.newline();
        self.newline();
    }

    fn code_block(&mut self, info: &str, literal: &str) {
        self.newline();
        let rule = "\u{2500}".repeat(MAX_LINE_WIDTH - 2);
        self.push_painted(StyleSlot::Border, &format!("\u{250c}{rule}\u{2510}"));
        self.newline();

        let highlighted = (self.syntax_highlight && syntax::is_supported(info))
            .then(|| syntax::highlight_code(literal, info, self.painter.theme()))
            .flatten();
        let is_highlighted = highlighted.is_some();
        let spans = highlighted.unwrap_or_else(|| {
            vec![SyntaxSpan {
                text: literal.to_owned(),
                color: self.painter.theme().code_block,
            }]
        });

        for line in code_lines(spans) {
            for row in chunk_line(line, CODE_BOX_INNER) {
                let used: usize = row.iter().map(|s| display_width(&s.text)).sum();
                self.push_painted(StyleSlot::Border, "\u{2502} ");
                for span in &row {
                    if is_highlighted {
                        let painted = self.painter.paint_color(span.color, &span.text);
                        self.out.push_str(&painted);
                    } else {
                        self.push_painted(StyleSlot::CodeBlock, &span.text);
                    }
                }
                self.out.push_str(&" ".repeat(CODE_BOX_INNER.saturating_sub(used)));
                self.push_painted(StyleSlot::Border, " \u{2502}");
                self.newline();
            }
        }

        self.push_painted(StyleSlot::Border, &format!("\u{2514}{rule}\u{2518}"));
        self.newline();
    }

    fn table(&mut self, entering: bool) {
        if entering {
            self.end_line();
            self.state.table = Some(TableState::default());
            return;
        }

        if let Some(table) = self.state.table.take() {
            let rendered = table.render(&self.painter);
            self.out.push_str(&rendered);
        }
        let s = &mut self.state;
        s.current_line_len = 0;
        s.prefix_len = 0;
        s.quote_len = 0;
        s.trailing_space = false;
        s.pending_space = false;
    }
}

/// Split code spans into source lines, tabs expanded. The empty line after
/// a trailing newline is dropped.
fn code_lines(spans: Vec<SyntaxSpan>) -> Vec<Vec<SyntaxSpan>> {
    let mut lines = vec![Vec::new()];
    for span in spans {
        for (i, piece) in span.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            if piece.is_empty() {
                continue;
            }
            if let Some(line) = lines.last_mut() {
                line.push(SyntaxSpan {
                    text: piece.replace('\t', &" ".repeat(TAB_WIDTH)),
                    color: span.color,
                });
            }
        }
    }
    if lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }
    lines
}

/// Split one line of spans into rows of at most `width` columns.
fn chunk_line(line: Vec<SyntaxSpan>, width: usize) -> Vec<Vec<SyntaxSpan>> {
    let mut rows = Vec::new();
    let mut row: Vec<SyntaxSpan> = Vec::new();
    let mut used = 0;

    for span in line {
        let mut rest = span.text.as_str();
        while !rest.is_empty() {
            let (mut head, mut tail) = split_at_width(rest, width - used);
            if head.is_empty() {
                if used > 0 {
                    rows.push(std::mem::take(&mut row));
                    used = 0;
                    continue;
                }
                let first = rest.chars().next().map_or(rest.len(), char::len_utf8);
                (head, tail) = rest.split_at(first);
            }
            used += display_width(head);
            row.push(SyntaxSpan {
                text: head.to_owned(),
                color: span.color,
            });
            rest = tail;
            if used >= width && !rest.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
        }
    }
    rows.push(row);
    rows
}

#[cfg(test)]
mod tests {
    use strip_ansi_escapes::strip_str;

    use super::*;
    use crate::color::Color;
    use crate::markdown::tree::CellAlign;

    fn plain(markdown: &str) -> String {
        strip_str(render_document(
            &Node::parse(markdown),
            &RenderOptions::default(),
        ))
    }

    fn drive(renderer: &mut Renderer, events: &[(Node, bool)]) {
        for (node, entering) in events {
            renderer.visit(node, None, *entering);
        }
    }

    #[test]
    fn heading_marker_and_breaks() {
        assert_eq!(plain("### Title"), "\n### Title\n");
    }

    #[test]
    fn emphasis_gets_single_spaces() {
        assert_eq!(
            plain("**bold** and *italic* in one line"),
            "bold and italic in one line\n"
        );
        assert_eq!(plain("say *this*"), "say this \n");
    }

    #[test]
    fn text_style_priority() {
        let mut state = RenderState::default();
        assert_eq!(state.text_style(), StyleSlot::Plain);
        state.in_emph = true;
        assert_eq!(state.text_style(), StyleSlot::Emph);
        state.in_strong = true;
        assert_eq!(state.text_style(), StyleSlot::StrongEmph);
        state.in_emph = false;
        assert_eq!(state.text_style(), StyleSlot::Strong);
        state.in_heading = Some(2);
        assert_eq!(state.text_style(), StyleSlot::Heading);
    }

    #[test]
    fn link_keeps_boundary_space() {
        assert_eq!(
            plain("Visit [site](https://x.io) now"),
            "Visit site (https://x.io) now\n"
        );
    }

    #[test]
    fn long_link_destination_is_truncated() {
        let url = format!("https://{}", "a".repeat(150));
        let out = plain(&format!("[x]({url})"));
        let expected = format!("x ({}...)\n", &url[..LINK_URL_KEEP]);
        assert_eq!(out, expected);
    }

    #[test]
    fn link_breaks_line_when_it_would_overflow() {
        let words = "word ".repeat(18); // 89 columns of text
        let out = plain(&format!("{words}[here](https://example.com/path)"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2, "{out:?}");
        assert_eq!(lines[1], " (https://example.com/path)");
        assert!(lines.iter().all(|l| display_width(l) <= MAX_LINE_WIDTH));
    }

    #[test]
    fn image_marker_and_destination() {
        assert_eq!(
            plain("![logo](img/logo.png)"),
            "[Image: logo - img/logo.png]\n"
        );
    }

    #[test]
    fn inline_code_is_padded() {
        assert_eq!(plain("Use `foo()` here"), "Use foo() here\n");
    }

    #[test]
    fn long_inline_code_is_truncated() {
        let code = "c".repeat(120);
        let out = plain(&format!("`{code}`"));
        let line = out.trim_end_matches('\n');
        assert_eq!(display_width(line), MAX_LINE_WIDTH);
        assert!(line.ends_with("... "));
    }

    #[test]
    fn code_block_box_is_full_width() {
        let out = plain("```\nlet x = 1;\n\tindented\n```\n");
        let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 4, "{out:?}");
        for line in &lines {
            assert_eq!(display_width(line), MAX_LINE_WIDTH, "{line:?}");
        }
        assert!(lines[0].starts_with('┌'));
        assert!(lines[1].starts_with("│ let x = 1;"));
        assert!(lines[2].starts_with("│     indented"));
        assert!(lines[3].starts_with('└'));
        assert!(!plain("```\n```\n").contains('│'));
    }

    #[test]
    fn long_code_line_is_split_into_rows() {
        let code = "x".repeat(200);
        let out = plain(&format!("```\n{code}\n```\n"));
        let rows: Vec<&str> = out.lines().filter(|l| l.starts_with('│')).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| display_width(r) == MAX_LINE_WIDTH));
    }

    #[test]
    fn chunk_line_respects_span_boundaries() {
        let red = Color::Ansi256(1);
        let blue = Color::Ansi256(4);
        let line = vec![
            SyntaxSpan {
                text: "a".repeat(5),
                color: red,
            },
            SyntaxSpan {
                text: "b".repeat(5),
                color: blue,
            },
        ];
        let rows = chunk_line(line, 4);
        let texts: Vec<Vec<&str>> = rows
            .iter()
            .map(|r| r.iter().map(|s| s.text.as_str()).collect())
            .collect();
        assert_eq!(
            texts,
            vec![vec!["aaaa"], vec!["a", "bbb"], vec!["bb"]]
        );
        assert_eq!(rows[1][1].color, blue);
    }

    #[test]
    fn nested_lists_indent_and_count_per_depth() {
        let out = plain("1. one\n   - inner\n   - inner\n2. two\n");
        assert_eq!(out, "1. one\n  • inner\n  • inner\n\n2. two\n\n");
    }

    #[test]
    fn every_list_exit_breaks_the_line() {
        assert_eq!(plain("- a\n  - b\n- c"), "• a\n  • b\n\n• c\n\n");
        assert_eq!(plain("- a\n  - b"), "• a\n  • b\n\n\n");
    }

    #[test]
    fn quote_bar_shares_line_with_nested_block() {
        assert_eq!(plain("> - a"), "│ • a\n\n");
        assert_eq!(plain("> # Title"), "│ # Title\n");
        assert_eq!(plain("> > nested"), "│ │ nested\n");
    }

    #[test]
    fn deep_quote_bars_stop_at_line_width() {
        let out = plain(&format!("{}deep", "> ".repeat(60)));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "│ ".repeat(MAX_LINE_WIDTH / 2));
        assert_eq!(lines[1], "deep");
    }

    #[test]
    fn deep_list_indent_stays_within_line_width() {
        let mut md = String::new();
        for depth in 0..70 {
            md.push_str(&"  ".repeat(depth));
            md.push_str("- x\n");
        }
        let out = plain(&md);
        assert!(out.lines().all(|l| display_width(l) <= MAX_LINE_WIDTH), "{out}");
    }

    #[test]
    fn blockquote_bar() {
        assert_eq!(plain("> quoted"), "│ quoted\n");
    }

    #[test]
    fn horizontal_rule_is_full_width() {
        let out = plain("---");
        assert_eq!(out, format!("\n{}\n\n", "─".repeat(MAX_LINE_WIDTH)));
    }

    #[test]
    fn soft_break_starts_new_line() {
        assert_eq!(plain("one\ntwo"), "one\ntwo\n");
    }

    #[test]
    fn table_state_is_reset_after_table() {
        let mut renderer = Renderer::new(&RenderOptions::default());
        let cell = |align| Node::new(NodeKind::TableCell { align });
        drive(
            &mut renderer,
            &[
                (Node::new(NodeKind::Table), true),
                (Node::new(NodeKind::TableHeader), true),
                (Node::new(NodeKind::TableRow), true),
                (cell(CellAlign::Right), true),
                (Node::new(NodeKind::Text("A".into())), true),
            ],
        );
        assert!(renderer.state().in_table());
        assert!(renderer.state().in_table_cell());
        drive(
            &mut renderer,
            &[
                (cell(CellAlign::Right), false),
                (Node::new(NodeKind::TableRow), false),
                (Node::new(NodeKind::TableHeader), false),
                (Node::new(NodeKind::Table), false),
            ],
        );
        assert!(!renderer.state().in_table());
        assert_eq!(renderer.state().current_line_len, 0);
        assert!(strip_str(renderer.finish()).contains("│   A │"));
    }

    #[test]
    fn cells_keep_literal_text_only() {
        let out = plain("| A | B |\n|---|---|\n| **x** [l](http://u) | `c` |\n");
        assert!(out.contains("│ x l │ c   │"), "{out}");
        assert!(!out.contains("http://u"));
    }

    #[test]
    fn unknown_nodes_are_ignored() {
        let mut renderer = Renderer::new(&RenderOptions::default());
        renderer.visit(&Node::new(NodeKind::Other), None, true);
        renderer.visit(&Node::new(NodeKind::Other), None, false);
        assert_eq!(renderer.state().current_line_len, 0);
        assert!(renderer.finish().is_empty());
    }
}
