//! Document-level types and tab flattening.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ContentElement, Span};

/// Default title for a tab that carries none.
pub const UNTITLED_TAB: &str = "Untitled Tab";

/// Synthesized title for the main body of a tab-less document.
pub const MAIN_DOCUMENT: &str = "Main Document";

/// Default title for a document whose metadata carries none.
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// A structural rich-text document: a main body plus ordered, arbitrarily
/// nested tabs, with the list definitions referenced by bulleted paragraphs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralDocument {
    /// Document metadata (title, ids, timestamps)
    pub metadata: DocumentMetadata,

    /// Main body content
    pub body: Vec<ContentElement>,

    /// Top-level tabs
    pub tabs: Vec<Tab>,

    /// List definitions, keyed by list id
    pub lists: HashMap<String, ListDefinition>,
}

impl StructuralDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: DocumentMetadata::default(),
            body: Vec::new(),
            tabs: Vec::new(),
            lists: HashMap::new(),
        }
    }

    /// Create a document with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.metadata.title = Some(title.into());
        doc
    }

    /// Add an element to the main body.
    pub fn add_element(&mut self, element: ContentElement) {
        self.body.push(element);
    }

    /// Add a top-level tab.
    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
    }

    /// Register a list definition.
    pub fn add_list(&mut self, id: impl Into<String>, definition: ListDefinition) {
        self.lists.insert(id.into(), definition);
    }

    /// Look up a list definition by id.
    pub fn list(&self, id: &str) -> Option<&ListDefinition> {
        self.lists.get(id)
    }

    /// Check if the document has no content anywhere.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.tabs.is_empty()
    }

    /// Linearize the tab tree into an ordered list of (title, elements)
    /// entries: main body first (when non-empty), then tabs depth-first with
    /// parents before their children, preserving document order.
    ///
    /// Uses an explicit work stack so pathological nesting depth cannot
    /// exhaust the call stack. A tab with no elements of its own is still
    /// traversed for children but contributes no entry. A document with
    /// nothing else yields a single main-body entry.
    pub fn flatten_tabs(&self) -> Vec<FlatTab<'_>> {
        let mut flat = Vec::new();

        if !self.body.is_empty() {
            flat.push(FlatTab {
                title: MAIN_DOCUMENT.to_string(),
                elements: &self.body,
            });
        }

        let mut stack: Vec<&Tab> = self.tabs.iter().rev().collect();
        while let Some(tab) = stack.pop() {
            if !tab.elements.is_empty() {
                flat.push(FlatTab {
                    title: tab
                        .title
                        .clone()
                        .unwrap_or_else(|| UNTITLED_TAB.to_string()),
                    elements: &tab.elements,
                });
            }
            for child in tab.children.iter().rev() {
                stack.push(child);
            }
        }

        if flat.is_empty() {
            flat.push(FlatTab {
                title: MAIN_DOCUMENT.to_string(),
                elements: &self.body,
            });
        }

        flat
    }
}

impl Default for StructuralDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,

    /// Store-assigned document id
    pub document_id: Option<String>,

    /// Store-assigned revision id of the snapshot
    pub revision_id: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

/// One tab of a document, possibly nesting child tabs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    /// Tab title; `None` renders as "Untitled Tab"
    pub title: Option<String>,

    /// Content elements owned by this tab
    pub elements: Vec<ContentElement>,

    /// Nested child tabs
    pub children: Vec<Tab>,
}

impl Tab {
    /// Create a new titled tab.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            elements: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a tab without a title.
    pub fn untitled() -> Self {
        Self {
            title: None,
            elements: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an element to the tab.
    pub fn add_element(&mut self, element: ContentElement) {
        self.elements.push(element);
    }

    /// Add a child tab.
    pub fn add_child(&mut self, child: Tab) {
        self.children.push(child);
    }
}

/// One flattened tab: a title plus a borrowed view of its elements.
#[derive(Debug, Clone)]
pub struct FlatTab<'a> {
    /// Resolved tab title
    pub title: String,

    /// Elements owned by the tab
    pub elements: &'a [ContentElement],
}

/// An explicit section break element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionBreak {
    /// Character range in the owning document, if snapshotted
    pub span: Option<Span>,
}

impl SectionBreak {
    /// Create a new section break.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A list definition, referenced (never owned) by paragraph bullets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDefinition {
    /// Per-nesting-level rendering properties, outermost first
    pub nesting_levels: Vec<NestingLevel>,
}

impl ListDefinition {
    /// Create a definition whose first nesting level uses `glyph`.
    pub fn with_glyph(glyph: GlyphType) -> Self {
        Self {
            nesting_levels: vec![NestingLevel { glyph }],
        }
    }

    /// Whether the list renders as a numbered list, judged from the first
    /// nesting level's glyph. An empty definition is unordered.
    pub fn is_ordered(&self) -> bool {
        self.nesting_levels
            .first()
            .map(|level| level.glyph.is_ordered())
            .unwrap_or(false)
    }
}

/// Rendering properties of one list nesting level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestingLevel {
    /// Glyph used for items at this level
    pub glyph: GlyphType,
}

/// Glyph class of a list nesting level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphType {
    /// 1, 2, 3, ...
    Decimal,
    /// 01, 02, 03, ...
    ZeroDecimal,
    /// a, b, c, ...
    Alpha,
    /// A, B, C, ...
    UpperAlpha,
    /// i, ii, iii, ...
    Roman,
    /// I, II, III, ...
    UpperRoman,
    /// Filled disc bullet
    Disc,
    /// Hollow circle bullet
    Circle,
    /// Square bullet
    Square,
    /// No glyph information
    #[default]
    Unspecified,
}

impl GlyphType {
    /// Whether the glyph belongs to a numbered (ordered) class.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            GlyphType::Decimal
                | GlyphType::ZeroDecimal
                | GlyphType::Alpha
                | GlyphType::UpperAlpha
                | GlyphType::Roman
                | GlyphType::UpperRoman
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    fn para(text: &str) -> ContentElement {
        ContentElement::Paragraph(Paragraph::with_text(text))
    }

    #[test]
    fn test_flatten_no_tabs() {
        let mut doc = StructuralDocument::new();
        doc.add_element(para("body text"));

        let flat = doc.flatten_tabs();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].title, MAIN_DOCUMENT);
        assert_eq!(flat[0].elements.len(), 1);
    }

    #[test]
    fn test_flatten_empty_document() {
        let doc = StructuralDocument::new();
        let flat = doc.flatten_tabs();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].title, MAIN_DOCUMENT);
        assert!(flat[0].elements.is_empty());
    }

    #[test]
    fn test_flatten_depth_first_order() {
        let mut doc = StructuralDocument::new();
        doc.add_element(para("main"));

        let mut first = Tab::new("First");
        first.add_element(para("a"));
        let mut child = Tab::new("First Child");
        child.add_element(para("b"));
        first.add_child(child);

        let mut second = Tab::new("Second");
        second.add_element(para("c"));

        doc.add_tab(first);
        doc.add_tab(second);

        let titles: Vec<_> = doc.flatten_tabs().into_iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            vec![MAIN_DOCUMENT, "First", "First Child", "Second"]
        );
    }

    #[test]
    fn test_flatten_empty_tab_still_recurses() {
        let mut doc = StructuralDocument::new();
        let mut parent = Tab::untitled();
        let mut child = Tab::new("Inner");
        child.add_element(para("deep"));
        parent.add_child(child);
        doc.add_tab(parent);

        let flat = doc.flatten_tabs();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].title, "Inner");
    }

    #[test]
    fn test_flatten_untitled_tab_default() {
        let mut doc = StructuralDocument::new();
        let mut tab = Tab::untitled();
        tab.add_element(para("x"));
        doc.add_tab(tab);

        assert_eq!(doc.flatten_tabs()[0].title, UNTITLED_TAB);
    }

    #[test]
    fn test_flatten_deep_nesting() {
        // A thousand levels of nesting must not overflow the stack.
        let mut tab = {
            let mut t = Tab::new("leaf");
            t.add_element(para("bottom"));
            t
        };
        for i in 0..1000 {
            let mut parent = Tab::new(format!("level-{i}"));
            parent.add_child(tab);
            tab = parent;
        }
        let mut doc = StructuralDocument::new();
        doc.add_tab(tab);

        let flat = doc.flatten_tabs();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].title, "leaf");
    }

    #[test]
    fn test_list_definition_ordered() {
        assert!(ListDefinition::with_glyph(GlyphType::Decimal).is_ordered());
        assert!(ListDefinition::with_glyph(GlyphType::UpperRoman).is_ordered());
        assert!(!ListDefinition::with_glyph(GlyphType::Disc).is_ordered());
        assert!(!ListDefinition::default().is_ordered());
    }
}
