use crate::color::Color;
use crate::config::types::Theme;

/// Detected terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Dark,
    Light,
}

impl Background {
    /// Detect whether the terminal has a dark or light background.
    ///
    /// Heuristic: check `COLORFGBG` (format "fg;bg"), fall back to dark.
    pub fn detect() -> Self {
        if let Ok(val) = std::env::var("COLORFGBG")
            && let Some(bg) = val.rsplit(';').next()
            && let Ok(n) = bg.parse::<u8>()
            && n > 6
            && n != 8
        {
            return Background::Light;
        }
        Background::Dark
    }
}

/// A fully resolved theme: every style slot the renderer paints with has a
/// concrete `Color` (from user config, or the defaults for the background).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub heading_marker: Color,
    pub heading_text: Color,
    pub strong: Color,
    pub emph: Color,
    pub code: Color,
    pub code_block: Color,
    pub link: Color,
    pub image: Color,
    pub list_marker: Color,
    pub blockquote: Color,
    pub horizontal_rule: Color,
    pub border: Color,
    pub table_header: Color,
    // Syntax highlighting
    pub syn_keyword: Color,
    pub syn_string: Color,
    pub syn_comment: Color,
    pub syn_number: Color,
    pub syn_function: Color,
    pub syn_type: Color,
    pub syn_operator: Color,
    pub syn_punctuation: Color,
    pub syn_name: Color,
    pub syn_name_builtin: Color,
}

impl ResolvedTheme {
    /// Build a resolved theme from user config and the terminal background.
    pub fn resolve(theme: &Theme, bg: Background) -> Self {
        let d = Defaults::for_background(bg);
        let md = &theme.colors.markdown;
        let syn = &md.syntax;

        Self {
            heading_marker: md.heading.unwrap_or(d.heading_marker),
            heading_text: md.heading_text.unwrap_or(d.text_bright),
            strong: md.strong.unwrap_or(d.accent),
            emph: md.emph.unwrap_or(d.accent),
            code: md.code.unwrap_or(d.code),
            code_block: md.code_block.unwrap_or(d.code_block),
            link: md.link.unwrap_or(d.text_bright),
            image: md.image.unwrap_or(d.image),
            list_marker: md.list_marker.unwrap_or(d.list_marker),
            blockquote: md.blockquote.unwrap_or(d.faint),
            horizontal_rule: md.horizontal_rule.unwrap_or(d.faint),
            border: md.border.unwrap_or(d.faint),
            table_header: md.table_header.unwrap_or(d.text_bright),
            syn_keyword: syn.keyword.unwrap_or(d.syn_keyword),
            syn_string: syn.string.unwrap_or(d.syn_string),
            syn_comment: syn.comment.unwrap_or(d.syn_comment),
            syn_number: syn.number.unwrap_or(d.syn_number),
            syn_function: syn.name_function.unwrap_or(d.syn_function),
            syn_type: syn.keyword_type.or(syn.name_class).unwrap_or(d.syn_type),
            syn_operator: syn.operator.unwrap_or(d.syn_operator),
            syn_punctuation: syn.punctuation.unwrap_or(d.syn_punctuation),
            syn_name: syn.name.unwrap_or(d.code_block),
            syn_name_builtin: syn.name_builtin.unwrap_or(d.syn_name_builtin),
        }
    }
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        Self::resolve(&Theme::default(), Background::Dark)
    }
}

struct Defaults {
    text_bright: Color,
    faint: Color,
    accent: Color,
    heading_marker: Color,
    code: Color,
    code_block: Color,
    image: Color,
    list_marker: Color,
    syn_keyword: Color,
    syn_string: Color,
    syn_comment: Color,
    syn_number: Color,
    syn_function: Color,
    syn_type: Color,
    syn_operator: Color,
    syn_punctuation: Color,
    syn_name_builtin: Color,
}

impl Defaults {
    fn for_background(bg: Background) -> Self {
        match bg {
            Background::Dark => Self {
                text_bright: Color::Ansi256(7),
                faint: Color::Ansi256(8),
                accent: Color::Ansi256(12),        // bright blue
                heading_marker: Color::Ansi256(4), // blue
                code: Color::Ansi256(9),           // bright red
                code_block: Color::Ansi256(13),    // bright magenta
                image: Color::Ansi256(5),
                list_marker: Color::Ansi256(3),
                syn_keyword: Color::Ansi256(5),
                syn_string: Color::Ansi256(2),
                syn_comment: Color::Ansi256(243),
                syn_number: Color::Ansi256(3),
                syn_function: Color::Ansi256(4),
                syn_type: Color::Ansi256(6),
                syn_operator: Color::Ansi256(7),
                syn_punctuation: Color::Ansi256(245),
                syn_name_builtin: Color::Ansi256(6),
            },
            Background::Light => Self {
                text_bright: Color::Ansi256(0),
                faint: Color::Ansi256(244),
                accent: Color::Ansi256(4),
                heading_marker: Color::Ansi256(4),
                code: Color::Ansi256(1),
                code_block: Color::Ansi256(5),
                image: Color::Ansi256(5),
                list_marker: Color::Ansi256(130),
                syn_keyword: Color::Ansi256(5),
                syn_string: Color::Ansi256(2),
                syn_comment: Color::Ansi256(248),
                syn_number: Color::Ansi256(1),
                syn_function: Color::Ansi256(4),
                syn_type: Color::Ansi256(6),
                syn_operator: Color::Ansi256(0),
                syn_punctuation: Color::Ansi256(240),
                syn_name_builtin: Color::Ansi256(6),
            },
        }
    }
}
