use glam::{Vec2, vec2};

/// Atlas cell size, in texture coordinates, of the stock icon sheet.
pub const ICON_CELL: f32 = 0.0234375;

/// Key of an icon in an [`IconAtlas`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Icon(pub u32);

impl Icon {
    pub const MENU: Icon = Icon(0);
    pub const SEARCH: Icon = Icon(1);
    pub const MORE_VERT: Icon = Icon(2);
    pub const ADD: Icon = Icon(3);
    pub const SHARE: Icon = Icon(4);
    pub const SETTINGS: Icon = Icon(5);
}

/// Resolves icon keys to the texture-coordinate offset of their atlas cell.
pub trait IconAtlas {
    fn texcoords(&self, icon: Icon) -> Vec2;
}

/// Row-major grid of equally sized square cells, origin at the top-left of
/// the texture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridIconAtlas {
    cell: f32,
    columns: u32,
}

impl GridIconAtlas {
    /// `cell` is the edge length of one icon in texture coordinates.
    pub fn new(cell: f32) -> Self {
        debug_assert!(cell > 0.0 && cell <= 1.0, "invalid atlas cell {cell}");
        let columns = ((1.0 / cell).floor() as u32).max(1);
        Self { cell, columns }
    }

    #[inline]
    pub fn cell(&self) -> f32 {
        self.cell
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of icons the sheet holds.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.columns * self.columns
    }
}

impl Default for GridIconAtlas {
    fn default() -> Self {
        Self::new(ICON_CELL)
    }
}

impl IconAtlas for GridIconAtlas {
    fn texcoords(&self, icon: Icon) -> Vec2 {
        if icon.0 >= self.capacity() {
            log::warn!("{icon:?} is outside the {}-cell atlas; wrapping", self.capacity());
        }
        let index = icon.0 % self.capacity();
        let col = index % self.columns;
        let row = index / self.columns;
        vec2(col as f32 * self.cell, row as f32 * self.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_atlas_has_42_columns() {
        let atlas = GridIconAtlas::default();
        assert_eq!(atlas.columns(), 42);
        assert_eq!(atlas.texcoords(Icon(0)), Vec2::ZERO);
        assert_eq!(atlas.texcoords(Icon(1)), vec2(ICON_CELL, 0.0));
        assert_eq!(atlas.texcoords(Icon(42)), vec2(0.0, ICON_CELL));
    }

    #[test]
    fn offsets_stay_inside_the_texture() {
        let atlas = GridIconAtlas::new(0.25);
        for i in 0..atlas.capacity() {
            let uv = atlas.texcoords(Icon(i));
            assert!(uv.x + atlas.cell() <= 1.0 && uv.y + atlas.cell() <= 1.0, "{i}");
        }
    }
}
