//! Rendering options and configuration.

/// Options for rendering a document to Markdown.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// How to partition the rendered output into sections
    pub split: SplitMode,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the split mode.
    pub fn with_split(mut self, split: SplitMode) -> Self {
        self.split = split;
        self
    }

    /// Emit one section per tab.
    pub fn by_tab(self) -> Self {
        self.with_split(SplitMode::ByTab)
    }

    /// Emit one section per top-level heading / section break.
    pub fn by_heading(self) -> Self {
        self.with_split(SplitMode::ByHeading)
    }
}

/// How rendered output is partitioned into sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitMode {
    /// Everything concatenated into a single body
    #[default]
    Combined,
    /// One section per flattened tab
    ByTab,
    /// Sections bounded by level-1 headings and section breaks
    ByHeading,
}
