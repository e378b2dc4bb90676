use material_engine::Result;
use material_engine::coords::Color;
use material_engine::gpu::GpuContext;

use crate::material::Material;
use crate::theme::Theme;
use crate::widgets::MaterialWidget;

/// A material that runs a callback when pressed.
///
/// # Example
/// ```rust,ignore
/// let fab = Button::new(&mut gpu, palette::PINK_A200, &theme)?
///     .on_press(|| log::info!("compose"));
/// ```
pub struct Button {
    material: Material,
    on_press: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new<G>(gpu: &mut G, color: Color, theme: &Theme) -> Result<Self>
    where
        G: GpuContext + ?Sized,
    {
        Ok(Self::from_material(Material::new(gpu, color, theme)?))
    }

    pub fn from_material(material: Material) -> Self {
        Self {
            material,
            on_press: None,
        }
    }

    /// Callback invoked when the button is pressed.
    pub fn on_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    /// Runs the callback. Returns false if none is set.
    pub fn press(&mut self) -> bool {
        match &mut self.on_press {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    /// Presses the button if `(x, y)` lies on it. Returns true if the point
    /// hit the button, whether or not a callback is set.
    pub fn press_at(&mut self, x: f32, y: f32) -> bool {
        if !self.material.contains(x, y) {
            return false;
        }
        self.press();
        true
    }
}

impl MaterialWidget for Button {
    fn material(&self) -> &Material {
        &self.material
    }

    fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("material", &self.material)
            .field("on_press", &self.on_press.is_some())
            .finish()
    }
}
