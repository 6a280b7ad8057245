use serde::{Deserialize, Serialize};

use crate::parsing::ruby::Ruby;
use crate::render::{html::element_to_html, segments::ruby_element, tree::Element};

/// The replacement shown over an annotation in the live view.
///
/// Two widgets are equal when they render the same pairs, which lets a host
/// keep the existing widget across rebuilds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RubyWidget {
    pub ruby: Ruby,
}

impl RubyWidget {
    pub fn new(ruby: Ruby) -> Self {
        Self { ruby }
    }

    /// Same element structure the static view produces.
    pub fn to_element(&self) -> Element {
        ruby_element(&self.ruby)
    }

    pub fn to_html(&self) -> String {
        element_to_html(&self.to_element())
    }

    /// Plain-text form for hosts without ruby layout: `日(に)本(ほん)`, or
    /// just the bases when readings are hidden.
    pub fn to_text(&self, readings_visible: bool) -> String {
        let mut out = String::new();
        for pair in &self.ruby.pairs {
            out.push_str(&pair.base);
            if readings_visible {
                out.push('(');
                out.push_str(&pair.reading);
                out.push(')');
            }
        }
        out
    }
}
