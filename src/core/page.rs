// src/core/page.rs
use crate::core::types::Language;

/// How a translated string is written into a node. Mirrors the three
/// element shapes the markup tags: plain text containers, input-like
/// elements whose placeholder text is replaced, and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Text,
    Placeholder,
    Label,
}

/// One translatable element: a stable key, the role deciding how text is
/// written, and the text currently rendered for it.
#[derive(Debug, Clone)]
pub struct TaggedNode {
    pub key: String,
    pub role: NodeRole,
    pub content: String,
}

impl TaggedNode {
    pub fn new(key: impl Into<String>, role: NodeRole, content: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            role,
            content: content.into(),
        }
    }
}

/// The localizable slice of the rendered page: the tagged nodes, the
/// document-level language attribute, and the language toggle control.
#[derive(Debug, Clone)]
pub struct Page {
    pub nodes: Vec<TaggedNode>,
    /// Document-level language attribute.
    pub document_lang: String,
    /// Label currently shown on the language toggle control.
    pub toggle_label: String,
    /// Markup inserted where a translation carries an embedded line
    /// break. Only Text-role nodes are converted.
    pub line_break: String,
}

impl Page {
    /// A page over the given nodes, starting in the default language.
    pub fn new(nodes: Vec<TaggedNode>) -> Self {
        let default = Language::default();
        Self {
            nodes,
            document_lang: default.document_code().to_string(),
            toggle_label: default.indicator_label().to_string(),
            line_break: "\n".to_string(),
        }
    }

    /// The localizable nodes of the lab site's publications screen, with
    /// the English text the markup ships with.
    pub fn lab_site() -> Self {
        Self::new(vec![
            TaggedNode::new("nav-home", NodeRole::Text, "Home"),
            TaggedNode::new("nav-research", NodeRole::Text, "Research"),
            TaggedNode::new("nav-publications", NodeRole::Text, "Publications"),
            TaggedNode::new("nav-contact", NodeRole::Text, "Contact"),
            TaggedNode::new("hero-title", NodeRole::Text, "Lab of Data Analytics in"),
            TaggedNode::new("hero-title-highlight", NodeRole::Text, "Human Science"),
            TaggedNode::new("search-placeholder", NodeRole::Placeholder, "Search publications..."),
            TaggedNode::new("filter-all", NodeRole::Label, "All Years"),
            TaggedNode::new("footer-contact", NodeRole::Text, "Contact"),
            TaggedNode::new(
                "footer-address",
                NodeRole::Text,
                "T4-816, 4th Teaching Building\nNational Taiwan University of Science and Technology\nNo. 43, Sec. 4, Keelung Rd., Da'an Dist.\nTaipei City 10607, Taiwan",
            ),
        ])
    }

    /// The first node tagged with `key`, if the page has one.
    pub fn node(&self, key: &str) -> Option<&TaggedNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// Rendered text for `key`, or the fallback when the page has no such
    /// node. Missing targets are not an error condition.
    pub fn text(&self, key: &str, fallback: &str) -> String {
        self.node(key)
            .map(|n| n.content.clone())
            .unwrap_or_else(|| fallback.to_string())
    }
}
