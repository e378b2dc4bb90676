//! Material UI: widgets built from sheets of material.
//!
//! Every widget owns one [`Material`], a unit box scaled by its world
//! transform and drawn in up to two passes (drop shadow, then fill). Widgets
//! draw through [`material_engine::gpu::GpuContext`], so they can be tested
//! against the in-memory recorder and rendered with wgpu unchanged.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use material_ui::prelude::*;
//!
//! let theme = Theme::default();
//! let mut gpu = CommandRecorder::new();
//!
//! let mut fab = Button::new(&mut gpu, palette::PINK_A200, &theme)?
//!     .on_press(|| log::info!("pressed"));
//! fab.material_mut().set_bounds(Rect::new(700.0, 500.0, 56.0, 56.0));
//! fab.material_mut().set_circle(true);
//!
//! // Every frame:
//! gpu.begin_frame();
//! fab.draw(&mut gpu, &view, &proj);
//! renderer.render(&ctx, &mut target, &gpu);
//! ```

pub mod backdrop;
pub mod behavior;
pub mod icon;
pub mod material;
pub mod palette;
pub mod theme;
pub mod units;
pub mod widgets;

pub use behavior::Behavior;
pub use material::Material;
pub use theme::Theme;

/// Everything needed to build a widget tree.
pub mod prelude {
    pub use crate::backdrop::{Backdrop, BackdropShape};
    pub use crate::behavior::Behavior;
    pub use crate::icon::{GridIconAtlas, ICON_CELL, Icon, IconAtlas};
    pub use crate::material::Material;
    pub use crate::palette;
    pub use crate::theme::Theme;
    pub use crate::units::Dp;
    pub use crate::widgets::MaterialWidget;
    pub use crate::widgets::{button::Button, nav_drawer::NavDrawer, toolbar::Toolbar};

    pub use material_engine::coords::{Color, Rect};
    pub use material_engine::gpu::{CommandRecorder, GpuContext, TextureId};
}
