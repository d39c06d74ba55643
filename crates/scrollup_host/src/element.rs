//! Element identity and description

use slotmap::new_key_type;

new_key_type! {
    /// Identifies an element owned by a host.
    pub struct ElementId;
}

/// Description of an element handed to [`ScrollHost::create_element`].
///
/// Hosts create described elements hidden; callers reveal them with the
/// fade primitives.
///
/// [`ScrollHost::create_element`]: crate::host::ScrollHost::create_element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementSpec {
    /// Document-unique identifier
    pub id: String,
    /// Style class(es), space-separated
    pub class: String,
    /// Visible label
    pub text: String,
}

impl ElementSpec {
    /// Create a spec with an identifier and no class or text
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the style class(es)
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Set the visible label
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}
