//! Widgets composed over a single [`Material`].

pub mod button;
pub mod nav_drawer;
pub mod toolbar;

use glam::Mat4;
use material_engine::gpu::GpuContext;

use crate::material::Material;

/// A widget whose visuals are one material plus, optionally, children.
///
/// The default `draw` draws only the widget's own material; containers
/// override it to draw their children after themselves.
pub trait MaterialWidget {
    fn material(&self) -> &Material;

    fn material_mut(&mut self) -> &mut Material;

    fn draw(&self, gpu: &mut dyn GpuContext, view: &Mat4, proj: &Mat4) {
        self.material().draw(gpu, view, proj);
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        self.material().contains(x, y)
    }
}
