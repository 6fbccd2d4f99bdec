use serde::Deserialize;

use crate::color::Color;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Highlight fenced code blocks whose language is recognised.
    pub syntax_highlight: bool,
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: ColorsTheme,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsTheme {
    pub markdown: MarkdownColors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarkdownColors {
    /// The `#` marker in front of headings.
    pub heading: Option<Color>,
    pub heading_text: Option<Color>,
    pub strong: Option<Color>,
    pub emph: Option<Color>,
    pub code: Option<Color>,
    pub code_block: Option<Color>,
    pub link: Option<Color>,
    pub image: Option<Color>,
    pub list_marker: Option<Color>,
    pub blockquote: Option<Color>,
    pub horizontal_rule: Option<Color>,
    pub border: Option<Color>,
    pub table_header: Option<Color>,
    pub syntax: SyntaxColors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyntaxColors {
    pub comment: Option<Color>,
    pub keyword: Option<Color>,
    pub keyword_type: Option<Color>,
    pub operator: Option<Color>,
    pub punctuation: Option<Color>,
    pub name: Option<Color>,
    pub name_builtin: Option<Color>,
    pub name_class: Option<Color>,
    pub name_function: Option<Color>,
    pub number: Option<Color>,
    pub string: Option<Color>,
}
