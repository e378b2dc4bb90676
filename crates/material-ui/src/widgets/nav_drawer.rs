use material_engine::Result;
use material_engine::coords::{Color, Rect};
use material_engine::gpu::GpuContext;

use crate::material::Material;
use crate::theme::Theme;
use crate::widgets::MaterialWidget;

/// Side sheet holding navigation destinations.
///
/// Open/closed is a visibility switch; there is no slide animation.
pub struct NavDrawer {
    material: Material,
    open: bool,
}

impl NavDrawer {
    pub fn new<G>(gpu: &mut G, color: Color, theme: &Theme) -> Result<Self>
    where
        G: GpuContext + ?Sized,
    {
        Ok(Self {
            material: Material::new(gpu, color, theme)?,
            open: false,
        })
    }

    /// Places the drawer along the left edge of `viewport`.
    pub fn dock_left(&mut self, viewport: Rect, width: f32) {
        let width = width.min(viewport.size.x);
        self.material
            .set_bounds(Rect::new(viewport.origin.x, viewport.origin.y, width, viewport.size.y));
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}

impl MaterialWidget for NavDrawer {
    fn material(&self) -> &Material {
        &self.material
    }

    fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    fn draw(&self, gpu: &mut dyn GpuContext, view: &glam::Mat4, proj: &glam::Mat4) {
        if self.open {
            self.material.draw(gpu, view, proj);
        }
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        self.open && self.material.contains(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use material_engine::gpu::CommandRecorder;

    #[test]
    fn closed_drawer_draws_nothing() {
        let mut gpu = CommandRecorder::new();
        let mut drawer = NavDrawer::new(&mut gpu, Color::white(), &Theme::default()).unwrap();
        drawer.dock_left(Rect::new(0.0, 0.0, 800.0, 600.0), 280.0);

        drawer.draw(&mut gpu, &Mat4::IDENTITY, &Mat4::IDENTITY);
        assert!(gpu.draws().is_empty());
        assert!(!drawer.contains(10.0, 10.0));

        drawer.toggle();
        drawer.draw(&mut gpu, &Mat4::IDENTITY, &Mat4::IDENTITY);
        assert_eq!(gpu.draws().len(), 2);
        assert!(drawer.contains(280.0, 600.0));
        assert!(!drawer.contains(281.0, 10.0));
    }
}
