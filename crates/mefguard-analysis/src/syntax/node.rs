//! Owned, immutable syntax elements.
//!
//! Children are `Arc`-shared so an edit rebuilds only the path from the edited
//! node to the root. Structural equality ignores node ids and tracking markers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use smallvec::SmallVec;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_raw_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a node within one tree version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn fresh() -> Self {
        Self(next_raw_id())
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque tag that survives rebuilds which discard node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackingMarker(u64);

impl TrackingMarker {
    pub fn fresh() -> Self {
        Self(next_raw_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    Whitespace,
    Comment,
    /// Preprocessor line (`#pragma`, `#region`, ...).
    Directive,
    /// Source text the grammar did not cover.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
}

impl Trivia {
    pub fn whitespace(text: impl Into<String>) -> Self {
        Self {
            kind: TriviaKind::Whitespace,
            text: text.into(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            kind: TriviaKind::Comment,
            text: text.into(),
        }
    }

    pub fn directive(text: impl Into<String>) -> Self {
        Self {
            kind: TriviaKind::Directive,
            text: text.into(),
        }
    }

    pub fn is_line_comment(&self) -> bool {
        self.kind == TriviaKind::Comment && self.text.starts_with("//")
    }

    pub fn contains_newline(&self) -> bool {
        self.text.contains('\n')
    }
}

/// A leaf. Owns the trivia that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: &'static str,
    pub field: Option<&'static str>,
    pub text: String,
    pub leading: Vec<Trivia>,
}

impl SyntaxToken {
    pub fn new(kind: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            text: text.into(),
            leading: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Option<&'static str>) -> Self {
        self.field = field;
        self
    }

    pub fn with_leading(mut self, leading: Vec<Trivia>) -> Self {
        self.leading = leading;
        self
    }

    pub fn leading_len(&self) -> usize {
        self.leading.iter().map(|t| t.text.len()).sum()
    }

    pub fn full_len(&self) -> usize {
        self.leading_len() + self.text.len()
    }

    pub fn write_full(&self, out: &mut String) {
        for trivia in &self.leading {
            out.push_str(&trivia.text);
        }
        out.push_str(&self.text);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(Arc<SyntaxNode>),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Node(n) => n.kind(),
            Self::Token(t) => t.kind,
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Node(n) => n.field(),
            Self::Token(t) => t.field,
        }
    }

    pub fn as_node(&self) -> Option<&Arc<SyntaxNode>> {
        match self {
            Self::Node(n) => Some(n),
            Self::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            Self::Token(t) => Some(t),
            Self::Node(_) => None,
        }
    }

    pub fn first_token(&self) -> Option<&SyntaxToken> {
        match self {
            Self::Node(n) => n.first_token(),
            Self::Token(t) => Some(t),
        }
    }

    /// Source text without the leading trivia of the first token.
    pub fn text(&self) -> String {
        match self {
            Self::Node(n) => n.text(),
            Self::Token(t) => t.text.clone(),
        }
    }

    pub fn full_text(&self) -> String {
        let mut out = String::new();
        self.write_full(&mut out);
        out
    }

    pub fn write_full(&self, out: &mut String) {
        match self {
            Self::Node(n) => n.write_full(out),
            Self::Token(t) => t.write_full(out),
        }
    }

    pub fn full_len(&self) -> usize {
        match self {
            Self::Node(n) => n.full_len(),
            Self::Token(t) => t.full_len(),
        }
    }

    pub fn leading_len(&self) -> usize {
        self.first_token().map_or(0, SyntaxToken::leading_len)
    }

    pub fn with_field(self, field: Option<&'static str>) -> Self {
        match self {
            Self::Node(n) => Self::Node(Arc::new(n.with_field(field))),
            Self::Token(t) => Self::Token(t.with_field(field)),
        }
    }

    pub fn with_leading_trivia(&self, leading: Vec<Trivia>) -> Self {
        match self {
            Self::Node(n) => Self::Node(Arc::new(n.with_leading_trivia(leading))),
            Self::Token(t) => Self::Token(t.clone().with_leading(leading)),
        }
    }
}

impl From<SyntaxNode> for SyntaxElement {
    fn from(node: SyntaxNode) -> Self {
        Self::Node(Arc::new(node))
    }
}

impl From<Arc<SyntaxNode>> for SyntaxElement {
    fn from(node: Arc<SyntaxNode>) -> Self {
        Self::Node(node)
    }
}

impl From<SyntaxToken> for SyntaxElement {
    fn from(token: SyntaxToken) -> Self {
        Self::Token(token)
    }
}

/// An interior node.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    id: NodeId,
    kind: &'static str,
    field: Option<&'static str>,
    children: Vec<SyntaxElement>,
    markers: SmallVec<[TrackingMarker; 1]>,
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.field == other.field && self.children == other.children
    }
}

impl Eq for SyntaxNode {}

impl SyntaxNode {
    pub fn new(kind: &'static str, children: Vec<SyntaxElement>) -> Self {
        Self {
            id: NodeId::fresh(),
            kind,
            field: None,
            children,
            markers: SmallVec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn field(&self) -> Option<&'static str> {
        self.field
    }

    pub fn children(&self) -> &[SyntaxElement] {
        &self.children
    }

    pub fn markers(&self) -> &[TrackingMarker] {
        &self.markers
    }

    pub fn has_marker(&self, marker: TrackingMarker) -> bool {
        self.markers.contains(&marker)
    }

    /// Same node in a different parent slot. Keeps the id.
    pub fn with_field(&self, field: Option<&'static str>) -> Self {
        Self {
            field,
            ..self.clone()
        }
    }

    /// Same kind, field and markers over new children, under a fresh id.
    pub fn with_children(&self, children: Vec<SyntaxElement>) -> Self {
        Self {
            id: NodeId::fresh(),
            kind: self.kind,
            field: self.field,
            children,
            markers: self.markers.clone(),
        }
    }

    pub fn with_marker(&self, marker: TrackingMarker) -> Self {
        let mut node = self.with_children(self.children.clone());
        if !node.markers.contains(&marker) {
            node.markers.push(marker);
        }
        node
    }

    pub fn without_markers(&self) -> Self {
        let mut node = self.with_children(self.children.clone());
        node.markers.clear();
        node
    }

    /// Replaces the leading trivia of the first token.
    pub fn with_leading_trivia(&self, leading: Vec<Trivia>) -> Self {
        let mut children = self.children.clone();
        if let Some(first) = children.first_mut() {
            *first = first.with_leading_trivia(leading);
        }
        self.with_children(children)
    }

    pub fn child_by_field(&self, field: &str) -> Option<&SyntaxElement> {
        self.children.iter().find(|c| c.field() == Some(field))
    }

    pub fn child_node_by_field(&self, field: &str) -> Option<&Arc<SyntaxNode>> {
        self.child_by_field(field).and_then(SyntaxElement::as_node)
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &Arc<SyntaxNode>> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    pub fn first_child_of_kind(&self, kind: &str) -> Option<&Arc<SyntaxNode>> {
        self.child_nodes().find(|n| n.kind == kind)
    }

    pub fn first_token(&self) -> Option<&SyntaxToken> {
        self.children.iter().find_map(SyntaxElement::first_token)
    }

    /// All tokens in document order.
    pub fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a SyntaxToken>) {
        for child in &self.children {
            match child {
                SyntaxElement::Node(n) => n.collect_tokens(out),
                SyntaxElement::Token(t) => out.push(t),
            }
        }
    }

    /// Every node below this one, preorder.
    pub fn descendant_nodes(&self) -> Vec<&Arc<SyntaxNode>> {
        let mut out = Vec::new();
        self.collect_nodes(&mut out);
        out
    }

    fn collect_nodes<'a>(&'a self, out: &mut Vec<&'a Arc<SyntaxNode>>) {
        for child in self.child_nodes() {
            out.push(child);
            child.collect_nodes(out);
        }
    }

    pub fn write_full(&self, out: &mut String) {
        for child in &self.children {
            child.write_full(out);
        }
    }

    pub fn full_text(&self) -> String {
        let mut out = String::new();
        self.write_full(&mut out);
        out
    }

    /// Source text without the leading trivia of the first token.
    pub fn text(&self) -> String {
        let full = self.full_text();
        full.get(self.leading_len()..).unwrap_or_default().to_string()
    }

    pub fn full_len(&self) -> usize {
        self.children.iter().map(SyntaxElement::full_len).sum()
    }

    pub fn leading_len(&self) -> usize {
        self.first_token().map_or(0, SyntaxToken::leading_len)
    }

    /// Offset of child `index` from this node's full start.
    pub fn child_offset(&self, index: usize) -> usize {
        self.children
            .iter()
            .take(index)
            .map(SyntaxElement::full_len)
            .sum()
    }
}
