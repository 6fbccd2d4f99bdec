//! Owned document tree built from the `pulldown-cmark` event stream, and the
//! depth-first walk the renderer is driven by.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Alignment> for CellAlign {
    fn from(align: Alignment) -> Self {
        match align {
            Alignment::None | Alignment::Left => CellAlign::Left,
            Alignment::Center => CellAlign::Center,
            Alignment::Right => CellAlign::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading { level: u8 },
    Paragraph,
    Text(String),
    Emph,
    Strong,
    Link { destination: String },
    Image { destination: String },
    Code(String),
    /// `info` is the first word of a fenced block's info string.
    CodeBlock { info: String, literal: String },
    List { ordered: bool },
    ListItem,
    Table,
    TableHeader,
    TableBody,
    TableRow,
    TableCell { align: CellAlign },
    BlockQuote,
    HorizontalRule,
    Softbreak,
    Hardbreak,
    /// Anything the renderer has no handling for (raw HTML, strikethrough,
    /// footnotes, ...). Children are still visited.
    Other,
}

impl NodeKind {
    /// Leaves are visited once, as "entering", with no exit event.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Text(_)
                | NodeKind::Code(_)
                | NodeKind::HorizontalRule
                | NodeKind::Softbreak
                | NodeKind::Hardbreak
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    /// Parse markdown into a `Document` node.
    pub fn parse(markdown: &str) -> Self {
        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_TABLES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);

        TreeBuilder::new().build(Parser::new_ext(markdown, opts))
    }
}

// ---------------------------------------------------------------------------
// Event stream -> tree
// ---------------------------------------------------------------------------

struct TreeBuilder {
    stack: Vec<Node>,
    alignments: Vec<CellAlign>,
    column: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Document)],
            alignments: Vec::new(),
            column: 0,
        }
    }

    fn build<'a>(mut self, events: impl Iterator<Item = Event<'a>>) -> Node {
        for event in events {
            match event {
                // pulldown-cmark puts header cells directly under the head and
                // has no body container; normalise to header/body + rows.
                Event::Start(Tag::Table(alignments)) => {
                    self.alignments = alignments.into_iter().map(CellAlign::from).collect();
                    self.open(NodeKind::Table);
                }
                Event::Start(Tag::TableHead) => {
                    self.open(NodeKind::TableHeader);
                    self.open(NodeKind::TableRow);
                    self.column = 0;
                }
                Event::End(TagEnd::TableHead) => {
                    self.close();
                    self.close();
                    self.open(NodeKind::TableBody);
                }
                Event::Start(Tag::TableRow) => {
                    self.open(NodeKind::TableRow);
                    self.column = 0;
                }
                Event::Start(Tag::TableCell) => {
                    let align = self
                        .alignments
                        .get(self.column)
                        .copied()
                        .unwrap_or_default();
                    self.column += 1;
                    self.open(NodeKind::TableCell { align });
                }
                Event::End(TagEnd::Table) => {
                    if matches!(self.top_kind(), Some(NodeKind::TableBody)) {
                        self.close();
                    }
                    self.close();
                    self.alignments.clear();
                }
                Event::Start(tag) => self.open(kind_for(tag)),
                Event::End(_) => self.close(),
                Event::Text(text) => self.push_text(&text),
                Event::Code(code) => self.push_leaf(NodeKind::Code(code.into_string())),
                Event::SoftBreak => self.push_leaf(NodeKind::Softbreak),
                Event::HardBreak => self.push_leaf(NodeKind::Hardbreak),
                Event::Rule => self.push_leaf(NodeKind::HorizontalRule),
                // Raw HTML, footnote references, math, task markers: not rendered.
                _ => {}
            }
        }

        while self.stack.len() > 1 {
            self.close();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| Node::new(NodeKind::Document))
    }

    fn top_kind(&self) -> Option<&NodeKind> {
        self.stack.last().map(|n| &n.kind)
    }

    fn open(&mut self, kind: NodeKind) {
        self.stack.push(Node::new(kind));
    }

    /// Pop the innermost open node and attach it to its parent. The document
    /// root is never popped here.
    fn close(&mut self) {
        if self.stack.len() > 1
            && let Some(node) = self.stack.pop()
        {
            self.push_node(node);
        }
    }

    fn push_node(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    fn push_leaf(&mut self, kind: NodeKind) {
        self.push_node(Node::new(kind));
    }

    fn push_text(&mut self, text: &str) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        if let NodeKind::CodeBlock { literal, .. } = &mut top.kind {
            literal.push_str(text);
            return;
        }
        if let Some(Node {
            kind: NodeKind::Text(prev),
            ..
        }) = top.children.last_mut()
        {
            prev.push_str(text);
            return;
        }
        top.children.push(Node::new(NodeKind::Text(text.to_owned())));
    }
}

fn kind_for(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading { level: level as u8 },
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(kind) => {
            let info = match kind {
                CodeBlockKind::Fenced(info) => {
                    info.split_whitespace().next().unwrap_or("").to_owned()
                }
                CodeBlockKind::Indented => String::new(),
            };
            NodeKind::CodeBlock {
                info,
                literal: String::new(),
            }
        }
        Tag::List(start) => NodeKind::List {
            ordered: start.is_some(),
        },
        Tag::Item => NodeKind::ListItem,
        Tag::Emphasis => NodeKind::Emph,
        Tag::Strong => NodeKind::Strong,
        Tag::Link { dest_url, .. } => NodeKind::Link {
            destination: dest_url.into_string(),
        },
        Tag::Image { dest_url, .. } => NodeKind::Image {
            destination: dest_url.into_string(),
        },
        _ => NodeKind::Other,
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Visit `root` and all descendants in document order.
///
/// `visit` receives the node, its parent and `true` on entry. Non-leaf nodes
/// get a second call with `false` once all their children are done. The walk
/// keeps its own stack, so nesting depth is bounded only by memory.
pub fn walk<'a>(root: &'a Node, mut visit: impl FnMut(&'a Node, Option<&'a Node>, bool)) {
    visit(root, None, true);
    if root.kind.is_leaf() {
        return;
    }

    // (node, parent, index of the next child to visit)
    let mut stack: Vec<(&'a Node, Option<&'a Node>, usize)> = vec![(root, None, 0)];
    while let Some(frame) = stack.last_mut() {
        let (node, parent, next) = *frame;
        match node.children.get(next) {
            Some(child) => {
                frame.2 += 1;
                visit(child, Some(node), true);
                if !child.kind.is_leaf() {
                    stack.push((child, Some(node), 0));
                }
            }
            None => {
                stack.pop();
                visit(node, parent, false);
            }
        }
    }
}
