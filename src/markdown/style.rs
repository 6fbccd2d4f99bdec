use crossterm::style::{ContentStyle, Stylize};

use crate::color::{Color, ColorDepth};
use crate::theme::ResolvedTheme;

/// Force style escape codes on, even when stdout is not a terminal or
/// `NO_COLOR` is set. Process-wide; calling it again has no further effect.
pub fn force_styled_output() {
    crossterm::style::force_color_output(true);
}

/// What a piece of output is, for the purpose of styling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSlot {
    Plain,
    Emph,
    Strong,
    StrongEmph,
    /// Heading text; wins over emphasis.
    Heading,
    HeadingMarker,
    Code,
    CodeBlock,
    Link,
    ImageMarker,
    ListMarker,
    QuoteBar,
    Rule,
    Border,
    TableHeader,
}

/// Turns style slots into escape-coded strings using a resolved theme.
#[derive(Debug, Clone)]
pub struct Painter {
    theme: ResolvedTheme,
    depth: ColorDepth,
}

impl Painter {
    pub fn new(theme: ResolvedTheme, depth: ColorDepth) -> Self {
        Self { theme, depth }
    }

    pub fn theme(&self) -> &ResolvedTheme {
        &self.theme
    }

    /// The content style for `slot`, or `None` for unstyled output.
    pub fn style(&self, slot: StyleSlot) -> Option<ContentStyle> {
        let t = &self.theme;
        let fg = |color: Color| ContentStyle::new().with(color.to_crossterm_color(self.depth));
        let style = match slot {
            StyleSlot::Plain => return None,
            StyleSlot::Emph => fg(t.emph).italic(),
            StyleSlot::Strong => fg(t.strong).bold(),
            StyleSlot::StrongEmph => fg(t.strong).bold().italic(),
            StyleSlot::Heading => fg(t.heading_text).bold(),
            StyleSlot::HeadingMarker => fg(t.heading_marker),
            StyleSlot::Code => fg(t.code),
            StyleSlot::CodeBlock => fg(t.code_block),
            StyleSlot::Link => fg(t.link).dim(),
            StyleSlot::ImageMarker => fg(t.image),
            StyleSlot::ListMarker => fg(t.list_marker),
            StyleSlot::QuoteBar => fg(t.blockquote),
            StyleSlot::Rule => fg(t.horizontal_rule),
            StyleSlot::Border => fg(t.border),
            StyleSlot::TableHeader => fg(t.table_header).bold(),
        };
        Some(style)
    }

    /// `text` wrapped in the escape codes for `slot`. Empty text stays empty.
    pub fn paint(&self, slot: StyleSlot, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.style(slot) {
            Some(style) => style.apply(text).to_string(),
            None => text.to_owned(),
        }
    }

    /// `text` in a single foreground color (used for highlighted code).
    pub fn paint_color(&self, color: Color, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        text.with(color.to_crossterm_color(self.depth)).to_string()
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::new(ResolvedTheme::default(), ColorDepth::default())
    }
}
