//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

use super::{SectionBreak, Table};

/// A half-open `[start, end)` range of character offsets into the owning
/// document's text stream, as of the snapshot that produced it.
///
/// Locally constructed documents carry no spans; a span only becomes
/// meaningful once a document store has assigned the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// First character offset covered by the range.
    pub start: usize,
    /// One past the last character offset covered by the range.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A block-level element of a tab or table cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentElement {
    /// A paragraph of styled text runs
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// A section break
    SectionBreak(SectionBreak),
}

impl ContentElement {
    /// Get the paragraph if this element is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            ContentElement::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// Get the table if this element is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            ContentElement::Table(t) => Some(t),
            _ => None,
        }
    }

    /// The element's character range in the owning document, if snapshotted.
    pub fn span(&self) -> Option<Span> {
        match self {
            ContentElement::Paragraph(p) => p.span,
            ContentElement::Table(t) => t.span,
            ContentElement::SectionBreak(s) => s.span,
        }
    }
}

/// A paragraph of text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Named paragraph style
    pub style: NamedStyle,

    /// Bullet metadata if this paragraph is a list item
    pub bullet: Option<Bullet>,

    /// Text runs in the paragraph
    pub runs: Vec<TextRun>,

    /// Character range in the owning document, if snapshotted
    pub span: Option<Span>,
}

impl Paragraph {
    /// Create a new empty normal-text paragraph.
    pub fn new() -> Self {
        Self {
            style: NamedStyle::NormalText,
            bullet: None,
            runs: Vec::new(),
            span: None,
        }
    }

    /// Create a paragraph with a single plain text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a heading paragraph. Levels outside 1..=6 are clamped.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut p = Self::with_text(text);
        p.style = NamedStyle::heading(level);
        p
    }

    /// Add a plain text run. Empty text is ignored.
    pub fn add_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.runs.push(TextRun::new(text));
        }
    }

    /// Add a styled text run. Runs with empty text are ignored.
    pub fn add_run(&mut self, run: TextRun) {
        if !run.text.is_empty() {
            self.runs.push(run);
        }
    }

    /// Mark this paragraph as a list item.
    pub fn with_bullet(mut self, list_id: impl Into<String>, nesting_level: u8) -> Self {
        self.bullet = Some(Bullet {
            list_id: list_id.into(),
            nesting_level,
        });
        self
    }

    /// Get the plain text of the paragraph (run texts concatenated).
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph carries no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.style, NamedStyle::Heading(_))
    }

    /// Get the heading level (1-6) or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self.style {
            NamedStyle::Heading(level) => Some(level),
            NamedStyle::NormalText => None,
        }
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.bullet.is_some()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Paragraph-level role tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedStyle {
    /// Regular body text (default)
    #[default]
    NormalText,

    /// Heading with level 1-6
    Heading(u8),
}

impl NamedStyle {
    /// Create a heading style, clamping the level to 1..=6.
    pub fn heading(level: u8) -> Self {
        NamedStyle::Heading(level.clamp(1, 6))
    }
}

/// List membership of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    /// Id of the list definition this paragraph belongs to
    pub list_id: String,

    /// Nesting depth (0 = top level)
    pub nesting_level: u8,
}

/// A run of text sharing one exact style.
///
/// Run text never contains the paragraph terminator; the trailing newline
/// of a paragraph is implicit in the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content (non-empty)
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a styled text run.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Create a link run.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                link: Some(LinkTarget::Url(url.into())),
                ..Default::default()
            },
        )
    }

    /// Number of characters in the run.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Font family and weight
    pub font: Option<WeightedFont>,

    /// Font size in points
    pub font_size_pt: Option<f32>,

    /// Text color (hex format, e.g. "#FF0000")
    pub foreground_color: Option<String>,

    /// Background/highlight color
    pub background_color: Option<String>,

    /// Link target, if the run is a link
    pub link: Option<LinkTarget>,
}

impl TextStyle {
    /// Check if any attribute differs from the default.
    pub fn has_styling(&self) -> bool {
        self.bold
            || self.italic
            || self.underline
            || self.strikethrough
            || self.font.is_some()
            || self.font_size_pt.is_some()
            || self.foreground_color.is_some()
            || self.background_color.is_some()
            || self.link.is_some()
    }

    /// The link URL, if the run links to an external URL.
    pub fn link_url(&self) -> Option<&str> {
        match self.link {
            Some(LinkTarget::Url(ref url)) => Some(url),
            _ => None,
        }
    }
}

/// A font family with an explicit weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedFont {
    /// Font family name
    pub family: String,

    /// Font weight (400 = regular, 700 = bold)
    pub weight: u16,
}

/// Destination of a link run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// External URL
    Url(String),

    /// Bookmark inside the same document
    Bookmark(String),

    /// Heading inside the same document
    Heading(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.add_run(TextRun::bold("world"));
        p.add_text("!");

        assert_eq!(p.plain_text(), "Hello world!");
    }

    #[test]
    fn test_heading() {
        let h1 = Paragraph::heading("Title", 1);
        assert!(h1.is_heading());
        assert_eq!(h1.heading_level(), Some(1));

        let clamped = Paragraph::heading("Deep", 9);
        assert_eq!(clamped.heading_level(), Some(6));
    }

    #[test]
    fn test_text_style() {
        let style = TextStyle::default();
        assert!(!style.has_styling());

        let linked = TextStyle {
            link: Some(LinkTarget::Url("https://example.com".into())),
            ..Default::default()
        };
        assert!(linked.has_styling());
        assert_eq!(linked.link_url(), Some("https://example.com"));

        let bookmark = TextStyle {
            link: Some(LinkTarget::Bookmark("b.1".into())),
            ..Default::default()
        };
        assert_eq!(bookmark.link_url(), None);
    }

    #[test]
    fn test_bullet() {
        let p = Paragraph::with_text("item").with_bullet("list-1", 2);
        assert!(p.is_list_item());
        assert_eq!(p.bullet.as_ref().unwrap().nesting_level, 2);
    }

    #[test]
    fn test_span() {
        let span = Span::new(3, 10);
        assert_eq!(span.len(), 7);
        assert!(!span.is_empty());
        assert!(Span::new(5, 5).is_empty());
    }

    #[test]
    fn test_empty_runs_ignored() {
        let mut p = Paragraph::new();
        p.add_text("");
        p.add_run(TextRun::new(""));
        assert!(p.runs.is_empty());
    }
}
