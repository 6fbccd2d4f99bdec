use crate::color::Color;
use crate::theme::ResolvedTheme;

use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

// ---------------------------------------------------------------------------
// Highlight name index -> theme color mapping
// ---------------------------------------------------------------------------

/// Recognized highlight names in priority order. The index into this array
/// matches the `Highlight` index returned by tree-sitter-highlight.
const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "function",
    "function.builtin",
    "keyword",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

/// Map a highlight name index to a theme color.
fn highlight_color(index: usize, theme: &ResolvedTheme) -> Color {
    match HIGHLIGHT_NAMES.get(index) {
        Some(&"comment") => theme.syn_comment,
        Some(&"keyword") => theme.syn_keyword,
        Some(&"string" | &"string.special") => theme.syn_string,
        Some(&"number" | &"constant" | &"constant.builtin") => theme.syn_number,
        Some(&"function" | &"function.builtin" | &"constructor") => theme.syn_function,
        Some(&"type" | &"type.builtin") => theme.syn_type,
        Some(&"operator") => theme.syn_operator,
        Some(&"punctuation" | &"punctuation.bracket" | &"punctuation.delimiter") => {
            theme.syn_punctuation
        }
        Some(&"attribute" | &"tag") => theme.syn_name_builtin,
        Some(&"property") => theme.syn_name,
        _ => theme.code_block,
    }
}

// ---------------------------------------------------------------------------
// Languages
// ---------------------------------------------------------------------------

/// A fenced code block language with a bundled grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Language {
    Rust,
    Go,
    Python,
    JavaScript,
    TypeScript,
    Tsx,
    Ruby,
    Bash,
    Json,
    Toml,
    Html,
    Css,
    C,
    Cpp,
    Java,
}

/// Grammar plus its highlights, injections and locals queries.
type Grammar = (tree_sitter::Language, &'static str, &'static str, &'static str);

impl Language {
    /// Resolve a code fence info tag, ignoring case.
    fn from_tag(tag: &str) -> Option<Self> {
        let lang = match tag.to_ascii_lowercase().as_str() {
            "rust" | "rs" => Language::Rust,
            "go" | "golang" => Language::Go,
            "python" | "py" => Language::Python,
            "javascript" | "js" | "jsx" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "tsx" => Language::Tsx,
            "ruby" | "rb" => Language::Ruby,
            "bash" | "sh" | "shell" | "zsh" => Language::Bash,
            "json" => Language::Json,
            "toml" => Language::Toml,
            "html" => Language::Html,
            "css" => Language::Css,
            "c" | "h" => Language::C,
            "cpp" | "c++" | "cxx" | "hpp" => Language::Cpp,
            "java" => Language::Java,
            _ => return None,
        };
        Some(lang)
    }

    fn name(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::Ruby => "ruby",
            Language::Bash => "bash",
            Language::Json => "json",
            Language::Toml => "toml",
            Language::Html => "html",
            Language::Css => "css",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    fn grammar(self) -> Grammar {
        match self {
            Language::Rust => (
                tree_sitter_rust::LANGUAGE.into(),
                tree_sitter_rust::HIGHLIGHTS_QUERY,
                tree_sitter_rust::INJECTIONS_QUERY,
                "",
            ),
            Language::Go => (
                tree_sitter_go::LANGUAGE.into(),
                tree_sitter_go::HIGHLIGHTS_QUERY,
                "",
                "",
            ),
            Language::Python => (
                tree_sitter_python::LANGUAGE.into(),
                tree_sitter_python::HIGHLIGHTS_QUERY,
                "",
                "",
            ),
            Language::JavaScript => (
                tree_sitter_javascript::LANGUAGE.into(),
                tree_sitter_javascript::HIGHLIGHT_QUERY,
                tree_sitter_javascript::INJECTIONS_QUERY,
                tree_sitter_javascript::LOCALS_QUERY,
            ),
            Language::TypeScript => (
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                tree_sitter_typescript::HIGHLIGHTS_QUERY,
                "",
                tree_sitter_typescript::LOCALS_QUERY,
            ),
            Language::Tsx => (
                tree_sitter_typescript::LANGUAGE_TSX.into(),
                tree_sitter_typescript::HIGHLIGHTS_QUERY,
                "",
                tree_sitter_typescript::LOCALS_QUERY,
            ),
            Language::Ruby => (
                tree_sitter_ruby::LANGUAGE.into(),
                tree_sitter_ruby::HIGHLIGHTS_QUERY,
                "",
                tree_sitter_ruby::LOCALS_QUERY,
            ),
            Language::Bash => (
                tree_sitter_bash::LANGUAGE.into(),
                tree_sitter_bash::HIGHLIGHT_QUERY,
                "",
                "",
            ),
            Language::Json => (
                tree_sitter_json::LANGUAGE.into(),
                tree_sitter_json::HIGHLIGHTS_QUERY,
                "",
                "",
            ),
            Language::Toml => (
                tree_sitter_toml_ng::LANGUAGE.into(),
                tree_sitter_toml_ng::HIGHLIGHTS_QUERY,
                "",
                "",
            ),
            Language::Html => (
                tree_sitter_html::LANGUAGE.into(),
                tree_sitter_html::HIGHLIGHTS_QUERY,
                tree_sitter_html::INJECTIONS_QUERY,
                "",
            ),
            Language::Css => (
                tree_sitter_css::LANGUAGE.into(),
                tree_sitter_css::HIGHLIGHTS_QUERY,
                "",
                "",
            ),
            Language::C => (
                tree_sitter_c::LANGUAGE.into(),
                tree_sitter_c::HIGHLIGHT_QUERY,
                "",
                "",
            ),
            Language::Cpp => (
                tree_sitter_cpp::LANGUAGE.into(),
                tree_sitter_cpp::HIGHLIGHT_QUERY,
                "",
                "",
            ),
            Language::Java => (
                tree_sitter_java::LANGUAGE.into(),
                tree_sitter_java::HIGHLIGHTS_QUERY,
                "",
                "",
            ),
        }
    }

    fn highlight_config(self) -> Option<HighlightConfiguration> {
        let (language, highlights, injections, locals) = self.grammar();
        match HighlightConfiguration::new(language, self.name(), highlights, injections, locals) {
            Ok(mut config) => {
                config.configure(HIGHLIGHT_NAMES);
                Some(config)
            }
            Err(err) => {
                tracing::debug!(lang = self.name(), %err, "bad highlight query");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Public API: highlight code -> colored spans
// ---------------------------------------------------------------------------

/// A run of source code in one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxSpan {
    pub text: String,
    pub color: Color,
}

/// Whether a fenced block tagged `lang` can be highlighted.
pub fn is_supported(lang: &str) -> bool {
    Language::from_tag(lang).is_some()
}

/// Highlight `source` with tree-sitter.
///
/// Returns `None` when the language is unsupported or highlighting fails, in
/// which case the caller renders the block in the plain code block style.
/// Concatenating the span texts gives back `source`.
pub fn highlight_code(
    source: &str,
    lang: &str,
    theme: &ResolvedTheme,
) -> Option<Vec<SyntaxSpan>> {
    let config = Language::from_tag(lang)?.highlight_config()?;

    let mut highlighter = Highlighter::new();
    let events = highlighter
        .highlight(&config, source.as_bytes(), None, |_| None)
        .ok()?;

    let mut spans: Vec<SyntaxSpan> = Vec::new();
    let mut color_stack: Vec<Color> = vec![theme.code_block];

    for event in events {
        let Ok(event) = event else {
            tracing::debug!(lang, "highlighting aborted");
            return None;
        };
        match event {
            HighlightEvent::Source { start, end } => {
                let Some(text) = source.get(start..end).filter(|t| !t.is_empty()) else {
                    continue;
                };
                let color = color_stack.last().copied().unwrap_or(theme.code_block);
                match spans.last_mut() {
                    Some(prev) if prev.color == color => prev.text.push_str(text),
                    _ => spans.push(SyntaxSpan {
                        text: text.to_owned(),
                        color,
                    }),
                }
            }
            HighlightEvent::HighlightStart(h) => {
                color_stack.push(highlight_color(h.0, theme));
            }
            HighlightEvent::HighlightEnd => {
                color_stack.pop();
            }
        }
    }

    Some(spans)
}
