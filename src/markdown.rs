//! Structural model of a markdown changelog.
//!
//! A document is split into top level blocks with `pulldown-cmark`. Blocks
//! keep their original source text so sections can be written back without
//! re-rendering. The [`tree::HeadingTree`] groups blocks under the heading
//! that precedes them.
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use regex::Regex;
use std::{ops::Range, sync::LazyLock};

pub mod merger;
pub mod source;
pub mod tree;
pub mod validator;

/// Matches a list item marker (`-`, `*`, `+`, `1.` or `1)`) at the start of
/// an item.
static ITEM_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+]|\d+[.)])[ \t]*").unwrap());

/// A block level markdown node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Whole document holding its top level blocks.
    Document(Vec<Node>),
    Heading {
        level: u8,
        text: String,
        source: String,
    },
    /// Itemized list, with each item's text stripped of its marker. Nested
    /// lists are kept in `source` but left out of `items`.
    List {
        items: Vec<String>,
        source: String,
    },
    Paragraph(String),
    CodeBlock(String),
    /// Anything else (rules, html, tables, quotes).
    Other(String),
}

impl Node {
    pub fn heading(&self) -> Option<(u8, &str)> {
        match self {
            Node::Heading { level, text, .. } => Some((*level, text.as_str())),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List { .. })
    }

    /// Markdown source of this node.
    pub fn to_markdown(&self) -> String {
        match self {
            Node::Document(children) => join_markdown(children),
            Node::Heading { source, .. } | Node::List { source, .. } => {
                source.clone()
            }
            Node::Paragraph(source)
            | Node::CodeBlock(source)
            | Node::Other(source) => source.clone(),
        }
    }
}

/// Joins nodes with a blank line between each.
pub fn join_markdown(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(Node::to_markdown)
        .collect::<Vec<String>>()
        .join("\n\n")
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

enum PendingKind {
    Heading(u8),
    List,
    Paragraph,
    CodeBlock,
    Other,
}

/// Block being collected while walking parser events.
struct Pending {
    kind: PendingKind,
    range: Range<usize>,
    text: String,
    items: Vec<Range<usize>>,
}

impl Pending {
    fn new(tag: &Tag, range: Range<usize>) -> Self {
        let kind = match tag {
            Tag::Heading { level, .. } => {
                PendingKind::Heading(heading_level_to_u8(*level))
            }
            Tag::List(_) => PendingKind::List,
            Tag::Paragraph => PendingKind::Paragraph,
            Tag::CodeBlock(_) => PendingKind::CodeBlock,
            _ => PendingKind::Other,
        };
        Self {
            kind,
            range,
            text: String::new(),
            items: vec![],
        }
    }

    fn finish(self, content: &str) -> Node {
        let source = content[self.range].trim_end().to_string();
        match self.kind {
            PendingKind::Heading(level) => Node::Heading {
                level,
                text: self.text.trim().to_string(),
                source,
            },
            PendingKind::List => Node::List {
                items: self
                    .items
                    .into_iter()
                    .map(|r| item_text(&content[r]))
                    .collect(),
                source,
            },
            PendingKind::Paragraph => Node::Paragraph(source),
            PendingKind::CodeBlock => Node::CodeBlock(source),
            PendingKind::Other => Node::Other(source),
        }
    }
}

fn item_text(item: &str) -> String {
    let item = item.trim();
    ITEM_MARKER_REGEX.replace(item, "").trim_end().to_string()
}

/// Split markdown content into a [`Node::Document`] of top level blocks.
pub fn parse(content: &str) -> Node {
    let mut blocks = vec![];
    let mut depth = 0usize;
    let mut pending: Option<Pending> = None;

    for (event, range) in Parser::new_ext(content, options()).into_offset_iter()
    {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    pending = Some(Pending::new(&tag, range));
                } else if depth == 1
                    && matches!(tag, Tag::Item)
                    && let Some(p) = pending.as_mut()
                {
                    p.items.push(range);
                } else if depth == 2
                    && matches!(tag, Tag::List(_))
                    && let Some(item) =
                        pending.as_mut().and_then(|p| p.items.last_mut())
                {
                    // a nested list ends the text of its parent item
                    item.end = item.end.min(range.start);
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0
                    && let Some(p) = pending.take()
                {
                    blocks.push(p.finish(content));
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(p) = pending.as_mut()
                    && matches!(p.kind, PendingKind::Heading(_))
                {
                    p.text.push_str(&text);
                }
            }
            Event::Rule | Event::Html(_) if depth == 0 => {
                let source = content[range].trim_end().to_string();
                blocks.push(Node::Other(source));
            }
            _ => {}
        }
    }

    Node::Document(blocks)
}
