//! Material color constants.

use material_engine::coords::Color;

pub const WHITE: Color = Color::from_hex(0xFFFFFF);
pub const BLACK: Color = Color::from_hex(0x000000);

pub const GREY_100: Color = Color::from_hex(0xF5F5F5);
pub const GREY_300: Color = Color::from_hex(0xE0E0E0);

pub const BLUE_GREY_50: Color = Color::from_hex(0xECEFF1);
pub const BLUE_GREY_500: Color = Color::from_hex(0x607D8B);
pub const BLUE_GREY_900: Color = Color::from_hex(0x263238);

pub const BLUE_500: Color = Color::from_hex(0x2196F3);
pub const BLUE_700: Color = Color::from_hex(0x1976D2);

pub const PINK_A200: Color = Color::from_hex(0xFF4081);
pub const TEAL_500: Color = Color::from_hex(0x009688);
