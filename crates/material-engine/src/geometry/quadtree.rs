use crate::{Error, Result};

/// Deepest level a [`QuadKey`] can encode.
pub const MAX_QUAD_DEPTH: u32 = 15;

/// One of the four children of a quad-tree cell.
///
/// The discriminant is the two bits appended to the parent key: bit 0 selects
/// the right half, bit 1 the top half. Iteration order ([`Quadrant::ALL`]) is
/// part of the mesh contract because leaves are emitted in that order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    BottomLeft = 0b00,
    BottomRight = 0b01,
    TopLeft = 0b10,
    TopRight = 0b11,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
        Quadrant::TopLeft,
        Quadrant::TopRight,
    ];
}

/// Axis-aligned square in unit-square coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Packed quad-tree location code.
///
/// Layout: a sentinel `1` bit followed by two bits per level, most significant
/// level first. The root (the whole unit square) is `0b1`; its bottom-right
/// child is `0b101`. The sentinel position therefore encodes the depth, and a
/// key whose sentinel sits at an odd bit position does not decode to a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct QuadKey(u32);

impl QuadKey {
    /// The whole unit square.
    pub const ROOT: Self = Self(1);

    /// Validates a raw key.
    pub fn from_raw(raw: u32) -> Result<Self> {
        if raw == 0 || (31 - raw.leading_zeros()) % 2 != 0 {
            return Err(Error::MalformedQuadKey(raw));
        }
        Ok(Self(raw))
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn depth(self) -> u32 {
        (31 - self.0.leading_zeros()) / 2
    }

    /// Returns the child in `quadrant`, or `None` at [`MAX_QUAD_DEPTH`].
    #[inline]
    pub fn child(self, quadrant: Quadrant) -> Option<Self> {
        (self.depth() < MAX_QUAD_DEPTH).then(|| Self((self.0 << 2) | quadrant as u32))
    }

    /// Returns the four children in [`Quadrant::ALL`] order.
    pub fn children(self) -> Option<[Self; 4]> {
        (self.depth() < MAX_QUAD_DEPTH)
            .then(|| Quadrant::ALL.map(|q| Self((self.0 << 2) | q as u32)))
    }

    #[inline]
    pub fn parent(self) -> Option<Self> {
        (self.depth() > 0).then_some(Self(self.0 >> 2))
    }

    /// Decodes the key to its square within the unit square.
    ///
    /// All values are exact: cell sizes are powers of two no smaller than
    /// `2^-15`.
    pub fn cell(self) -> Cell {
        let depth = self.depth();
        let (mut ix, mut iy) = (0u32, 0u32);
        for level in (0..depth).rev() {
            let bits = (self.0 >> (2 * level)) & 0b11;
            ix = (ix << 1) | (bits & 0b01);
            iy = (iy << 1) | (bits >> 1);
        }

        let size = 1.0 / (1u32 << depth) as f32;
        Cell {
            x: ix as f32 * size,
            y: iy as f32 * size,
            size,
        }
    }
}

/// Number of leaves a split of `depth` levels produces, or `None` past
/// [`MAX_QUAD_DEPTH`].
#[inline]
pub const fn leaf_capacity(depth: u32) -> Option<usize> {
    if depth > MAX_QUAD_DEPTH {
        return None;
    }
    Some(1 << (2 * depth))
}

/// Appends the leaves `depth` levels below `key` to `out`.
///
/// Leaves are appended depth-first in [`Quadrant::ALL`] order. Reserve
/// [`leaf_capacity`] entries beforehand to avoid reallocation.
pub fn split(key: QuadKey, depth: u32, out: &mut Vec<QuadKey>) -> Result<()> {
    let requested = key.depth() + depth;
    if requested > MAX_QUAD_DEPTH {
        return Err(Error::DepthTooLarge {
            requested,
            max: MAX_QUAD_DEPTH,
        });
    }
    split_within_bounds(key, depth, out);
    Ok(())
}

fn split_within_bounds(key: QuadKey, remaining: u32, out: &mut Vec<QuadKey>) {
    if remaining == 0 {
        out.push(key);
        return;
    }
    for quadrant in Quadrant::ALL {
        split_within_bounds(QuadKey((key.0 << 2) | quadrant as u32), remaining - 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(depth: u32) -> Vec<QuadKey> {
        let mut out = Vec::with_capacity(leaf_capacity(depth).unwrap_or_default());
        split(QuadKey::ROOT, depth, &mut out).unwrap();
        out
    }

    #[test]
    fn root_is_the_unit_square() {
        assert_eq!(QuadKey::ROOT.depth(), 0);
        assert_eq!(QuadKey::ROOT.cell(), Cell { x: 0.0, y: 0.0, size: 1.0 });
        assert_eq!(QuadKey::ROOT.parent(), None);
    }

    #[test]
    fn depth_one_split_order() {
        let cells: Vec<_> = leaves(1).into_iter().map(QuadKey::cell).collect();
        assert_eq!(
            cells,
            vec![
                Cell { x: 0.0, y: 0.0, size: 0.5 },
                Cell { x: 0.5, y: 0.0, size: 0.5 },
                Cell { x: 0.0, y: 0.5, size: 0.5 },
                Cell { x: 0.5, y: 0.5, size: 0.5 },
            ]
        );
    }

    #[test]
    fn leaf_count_is_four_to_the_depth() {
        for depth in 0..=6 {
            assert_eq!(leaves(depth).len(), 4usize.pow(depth));
        }
    }

    #[test]
    fn leaf_capacity_stops_at_the_depth_cap() {
        assert_eq!(leaf_capacity(0), Some(1));
        assert_eq!(leaf_capacity(MAX_QUAD_DEPTH), Some(1 << 30));
        for depth in [MAX_QUAD_DEPTH + 1, 31, 32, 40] {
            assert_eq!(leaf_capacity(depth), None, "depth {depth}");
        }
    }

    #[test]
    fn leaves_tile_the_unit_square() {
        for depth in 0..=5 {
            let n = 1u32 << depth;
            let mut seen = vec![false; (n * n) as usize];
            for key in leaves(depth) {
                let cell = key.cell();
                assert_eq!(cell.size, 1.0 / n as f32);
                let (ix, iy) = ((cell.x * n as f32) as u32, (cell.y * n as f32) as u32);
                // Grid-aligned and inside the square.
                assert_eq!(ix as f32 * cell.size, cell.x);
                assert_eq!(iy as f32 * cell.size, cell.y);
                let slot = &mut seen[(iy * n + ix) as usize];
                assert!(!*slot, "overlapping cell {cell:?}");
                *slot = true;
            }
            assert!(seen.iter().all(|&s| s), "gap at depth {depth}");
        }
    }

    #[test]
    fn children_tile_their_parent() {
        let parent = QuadKey::ROOT.child(Quadrant::TopRight).unwrap();
        let p = parent.cell();
        let children = parent.children().unwrap();
        let area: f32 = children.iter().map(|c| c.cell().size * c.cell().size).sum();
        assert_eq!(area, p.size * p.size);
        for child in children {
            let c = child.cell();
            assert_eq!(child.parent(), Some(parent));
            assert!(c.x >= p.x && c.x + c.size <= p.x + p.size);
            assert!(c.y >= p.y && c.y + c.size <= p.y + p.size);
        }
    }

    #[test]
    fn from_raw_rejects_malformed_keys() {
        assert_eq!(QuadKey::from_raw(0), Err(Error::MalformedQuadKey(0)));
        assert_eq!(QuadKey::from_raw(0b10), Err(Error::MalformedQuadKey(0b10)));
        assert_eq!(QuadKey::from_raw(0b101).map(QuadKey::depth), Ok(1));
    }

    #[test]
    fn deepest_key_has_no_children() {
        let mut key = QuadKey::ROOT;
        for _ in 0..MAX_QUAD_DEPTH {
            key = key.child(Quadrant::TopRight).unwrap();
        }
        assert_eq!(key.depth(), MAX_QUAD_DEPTH);
        assert_eq!(key.children(), None);
        let cell = key.cell();
        assert_eq!(cell.x + cell.size, 1.0);
    }

    #[test]
    fn split_rejects_overflowing_depth() {
        let mut out = Vec::new();
        let key = QuadKey::ROOT.child(Quadrant::BottomLeft).unwrap();
        assert_eq!(
            split(key, MAX_QUAD_DEPTH, &mut out),
            Err(Error::DepthTooLarge { requested: MAX_QUAD_DEPTH + 1, max: MAX_QUAD_DEPTH })
        );
        assert!(out.is_empty());
    }
}
