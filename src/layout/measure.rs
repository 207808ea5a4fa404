//! Leaf measurement.
//!
//! The renderer owns fonts and images, so leaves are sized through the
//! [`Measure`] callback it supplies. [`MonospaceMeasure`] is a fixed-pitch
//! implementation for hosts that draw on a cell grid, and for tests.

use taffy::geometry::Size;
use unicode_width::UnicodeWidthStr;

use crate::engine::Node;
use crate::error::MeasureError;
use crate::types::NodeKind;

/// Intrinsic size of a leaf node.
pub trait Measure {
    fn measure(&self, node: &Node) -> Result<Size<f32>, MeasureError>;
}

impl<F> Measure for F
where
    F: Fn(&Node) -> Result<Size<f32>, MeasureError>,
{
    fn measure(&self, node: &Node) -> Result<Size<f32>, MeasureError> {
        self(node)
    }
}

/// Display width of a string in cells.
///
/// Uses Unicode East Asian Width: CJK and most emoji take 2 cells,
/// combining marks take 0.
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Fixed-pitch measure: every cell is `cell_width` wide, every line
/// `line_height` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub cell_width: f32,
    pub line_height: f32,
    /// Extra cells around a button label, per side.
    pub button_inset: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            cell_width: 1.0,
            line_height: 1.0,
            button_inset: 1.0,
        }
    }
}

impl MonospaceMeasure {
    pub fn new(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width,
            line_height,
            ..Self::default()
        }
    }

    fn text_size(&self, text: &str) -> Size<f32> {
        if text.is_empty() {
            return Size {
                width: 0.0,
                height: 0.0,
            };
        }
        let columns = text.lines().map(string_width).max().unwrap_or(0);
        let lines = text.lines().count().max(1);
        Size {
            width: columns as f32 * self.cell_width,
            height: lines as f32 * self.line_height,
        }
    }
}

impl Measure for MonospaceMeasure {
    fn measure(&self, node: &Node) -> Result<Size<f32>, MeasureError> {
        let text = node.text().unwrap_or_default();
        match node.kind() {
            NodeKind::Text => Ok(self.text_size(text)),
            NodeKind::Input => {
                let shown = if text.is_empty() {
                    node.prop("placeholder").map(|p| p.to_display()).unwrap_or_default()
                } else {
                    text.to_string()
                };
                let size = self.text_size(&shown);
                Ok(Size {
                    width: size.width.max(self.cell_width),
                    height: size.height.max(self.line_height),
                })
            }
            NodeKind::Button => {
                let size = self.text_size(text);
                Ok(Size {
                    width: size.width + 2.0 * self.button_inset * self.cell_width,
                    height: size.height.max(self.line_height),
                })
            }
            NodeKind::Image => Err(MeasureError::new(format!(
                "image `{}` has no intrinsic size; set width and height",
                node.id()
            ))),
            NodeKind::Container => Ok(Size {
                width: 0.0,
                height: 0.0,
            }),
        }
    }
}
