//! Procedural icon sheet matching the stock [`GridIconAtlas`] layout.

use material_ui::icon::{GridIconAtlas, Icon};

/// Edge length of the sheet in pixels. With the stock cell size each icon
/// gets 24×24 pixels.
pub const SHEET_SIZE: u32 = 1024;

/// Renders the stock icons into a `SHEET_SIZE`² RGBA8 image (white glyphs on
/// transparent).
pub fn icon_sheet(atlas: &GridIconAtlas) -> Vec<u8> {
    let mut pixels = vec![0u8; (SHEET_SIZE * SHEET_SIZE * 4) as usize];
    let cell_px = (atlas.cell() * SHEET_SIZE as f32) as u32;

    let icons = [
        Icon::MENU,
        Icon::SEARCH,
        Icon::MORE_VERT,
        Icon::ADD,
        Icon::SHARE,
        Icon::SETTINGS,
    ];
    for icon in icons {
        let col = icon.0 % atlas.columns();
        let row = icon.0 / atlas.columns();
        let (x0, y0) = (col * cell_px, row * cell_px);

        for y in 0..cell_px {
            for x in 0..cell_px {
                // Cell-local coordinates in [-1, 1].
                let u = (x as f32 + 0.5) / cell_px as f32 * 2.0 - 1.0;
                let v = (y as f32 + 0.5) / cell_px as f32 * 2.0 - 1.0;
                if covers(icon, u, v) {
                    let i = (((y0 + y) * SHEET_SIZE + x0 + x) * 4) as usize;
                    pixels[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
    }
    pixels
}

/// Coverage test of one glyph. Glyphs are symmetric about the horizontal
/// axis, so the flipped v of the box UVs does not matter.
fn covers(icon: Icon, u: f32, v: f32) -> bool {
    let r = (u * u + v * v).sqrt();
    match icon {
        Icon::MENU => u.abs() < 0.6 && [-0.4, 0.0, 0.4].iter().any(|c| (v - c).abs() < 0.08),
        Icon::SEARCH => (0.3..0.45).contains(&r),
        Icon::MORE_VERT => [-0.45, 0.0, 0.45]
            .iter()
            .any(|c| (u * u + (v - c).powi(2)).sqrt() < 0.12),
        Icon::ADD => (u.abs() < 0.08 && v.abs() < 0.55) || (v.abs() < 0.08 && u.abs() < 0.55),
        Icon::SHARE => [(-0.4, 0.0), (0.35, -0.4), (0.35, 0.4)]
            .iter()
            .any(|(cx, cy)| ((u - cx).powi(2) + (v - cy).powi(2)).sqrt() < 0.14),
        Icon::SETTINGS => (0.2..0.5).contains(&r) && (u.abs() > 0.12 || r > 0.3),
        _ => false,
    }
}
