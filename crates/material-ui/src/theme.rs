use material_engine::coords::Color;
use material_engine::gpu::{ShaderSource, TextureFilter, TextureWrap};

use crate::icon::ICON_CELL;
use crate::palette;

/// Construction-time configuration shared by every material.
///
/// Widgets copy what they need out of the theme when they are built, so a
/// theme can be dropped or swapped without affecting existing widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Color of drop shadows under raised materials.
    pub shadow_color: Color,

    pub material_vertex: ShaderSource,
    pub material_fragment: ShaderSource,
    pub shadow_vertex: ShaderSource,
    pub shadow_fragment: ShaderSource,

    /// Edge length of one icon cell in the atlas, in texture coordinates.
    pub icon_cell: f32,

    /// Sampling state applied when a material binds its texture.
    pub texture_filter: TextureFilter,
    pub texture_wrap: TextureWrap,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            shadow_color: palette::BLUE_GREY_900,
            material_vertex: ShaderSource::vertex(
                "material-vert.wgsl",
                include_str!("shaders/material-vert.wgsl"),
            ),
            material_fragment: ShaderSource::fragment(
                "material-frag.wgsl",
                include_str!("shaders/material-frag.wgsl"),
            ),
            shadow_vertex: ShaderSource::vertex(
                "material-shadow-vert.wgsl",
                include_str!("shaders/material-shadow-vert.wgsl"),
            ),
            shadow_fragment: ShaderSource::fragment(
                "material-shadow-frag.wgsl",
                include_str!("shaders/material-shadow-frag.wgsl"),
            ),
            icon_cell: ICON_CELL,
            texture_filter: TextureFilter::default(),
            texture_wrap: TextureWrap::default(),
        }
    }
}

impl Theme {
    pub fn with_shadow_color(mut self, color: Color) -> Self {
        self.shadow_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_shaders_declare_their_interface() {
        let theme = Theme::default();
        for name in ["world", "view", "proj", "color", "icon", "circle", "position", "tc0"] {
            assert!(theme.material_vertex.declares(name), "material-vert lacks `{name}`");
        }
        assert!(theme.material_fragment.declares("tex0"));
        for name in ["world", "view", "proj", "color", "position"] {
            assert!(theme.shadow_vertex.declares(name), "shadow-vert lacks `{name}`");
        }
    }
}
