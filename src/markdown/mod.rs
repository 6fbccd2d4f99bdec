pub mod renderer;
pub mod style;
pub mod syntax;
pub mod table;
pub mod tree;
pub mod wrap;

pub use style::force_styled_output;
pub use wrap::{MAX_LINE_WIDTH, wrap_text};

use crate::color::ColorDepth;
use crate::theme::ResolvedTheme;

/// Everything a render call needs besides the markdown itself.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: ResolvedTheme,
    pub depth: ColorDepth,
    /// Highlight fenced code blocks whose language is recognised.
    pub syntax_highlight: bool,
}

/// Render markdown to styled terminal text with the default theme.
///
/// Colors are left out when `NO_COLOR` is set, unless [`force_styled_output`]
/// has been called.
pub fn render(markdown: &str) -> String {
    render_with(markdown, &RenderOptions::default())
}

/// Render markdown to styled terminal text.
pub fn render_with(markdown: &str, options: &RenderOptions) -> String {
    let document = tree::Node::parse(markdown);
    renderer::render_document(&document, options)
}
