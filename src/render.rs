//! Barcode rendering capability.
//!
//! The registry side only ever produces codes; turning a code into a
//! scannable image is an external concern behind [`BarcodeRenderer`]. The
//! console front-end ships [`LabelRenderer`], a text placard stand-in: a
//! framed code row with the human-readable value underneath, the same layout
//! a printed label carries.

use crate::errors::{Error, Result};

/// Producer interface: code string in, printable label out.
pub trait BarcodeRenderer {
    /// Renders `code` as a label block.
    ///
    /// # Errors
    /// Returns `Render` if the code cannot be rendered; callers log the
    /// failure and skip that product without aborting the rest.
    fn render(&self, code: &str) -> Result<String>;
}

/// Text-label renderer for the console front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelRenderer;

impl LabelRenderer {
    /// Creates the renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BarcodeRenderer for LabelRenderer {
    fn render(&self, code: &str) -> Result<String> {
        if code.is_empty() {
            return Err(Error::Render("empty code".to_string()));
        }
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Render(format!("non-numeric code '{code}'")));
        }

        let bar_row: String = code.chars().map(|c| if c == '0' { '|' } else { '‖' }).collect();
        let inner_width = code.len() + 2;
        let border = format!("+{}+", "-".repeat(inner_width));
        Ok(format!(
            "{border}\n| {bar_row} |\n| {code} |\n{border}"
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_label_carries_the_code_text() {
        let label = LabelRenderer::new().render("123456789012").unwrap();
        assert!(label.contains("123456789012"));
        assert_eq!(label.lines().count(), 4);
    }

    #[test]
    fn test_rejects_empty_and_non_numeric_codes() {
        let renderer = LabelRenderer::new();
        assert!(matches!(renderer.render(""), Err(Error::Render(_))));
        assert!(matches!(renderer.render("12ab"), Err(Error::Render(_))));
    }
}
