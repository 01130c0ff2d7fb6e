#![forbid(unsafe_code)]

//! Design-time debug label drawn in the grid's top-left corner.

use gridinv_core::Rgba;

use crate::config::GridConfig;
use crate::scale::target_size;

/// Offset of the label from the grid origin.
pub const LABEL_OFFSET: (f32, f32) = (5.0, 5.0);

/// Label text color.
pub const LABEL_COLOR: Rgba = Rgba::rgb(102, 102, 102);

/// A text overlay to draw above the grid lines.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugLabel {
    pub text: String,
    pub position: (f32, f32),
    pub color: Rgba,
    /// Paint layer; always above the layer the lines were drawn on.
    pub layer: i32,
}

/// Build the label for `owner`, or `None` outside design time or when the
/// config hides it. `base_layer` is the layer the grid lines use.
pub fn debug_label(
    config: &GridConfig,
    owner: Option<&str>,
    design_time: bool,
    base_layer: i32,
) -> Option<DebugLabel> {
    if !design_time || !config.show_debug_label() {
        return None;
    }
    let size = target_size(config);
    let owner = owner.unwrap_or("N/A");
    Some(DebugLabel {
        text: format!(
            "Owner: {owner}\nWxH: {:.1} x {:.1}",
            size.width, size.height
        ),
        position: LABEL_OFFSET,
        color: LABEL_COLOR,
        layer: base_layer.saturating_add(1),
    })
}
