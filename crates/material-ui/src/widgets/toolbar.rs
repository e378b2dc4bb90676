use glam::Mat4;

use material_engine::Result;
use material_engine::coords::Color;
use material_engine::gpu::GpuContext;

use crate::behavior::Behavior;
use crate::material::Material;
use crate::theme::Theme;
use crate::widgets::MaterialWidget;
use crate::widgets::button::Button;

/// App bar: a material with an optional navigation button and a row of
/// action buttons.
///
/// Draw order is fixed: bar, navigation button, then actions in insertion
/// order. Later draws stack on top of earlier ones.
pub struct Toolbar {
    material: Material,
    nav: Option<Button>,
    actions: Vec<Button>,
}

impl Toolbar {
    pub fn new<G>(gpu: &mut G, color: Color, theme: &Theme) -> Result<Self>
    where
        G: GpuContext + ?Sized,
    {
        Ok(Self {
            material: Material::new(gpu, color, theme)?,
            nav: None,
            actions: Vec::new(),
        })
    }

    pub fn set_nav(&mut self, nav: Button) {
        self.nav = Some(nav);
    }

    pub fn nav(&self) -> Option<&Button> {
        self.nav.as_ref()
    }

    pub fn nav_mut(&mut self) -> Option<&mut Button> {
        self.nav.as_mut()
    }

    /// Appends an action. Actions sit on the bar, so they are made flat.
    pub fn add_action(&mut self, mut action: Button) {
        action.material_mut().set_behavior(Behavior::Flat);
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Button] {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut [Button] {
        &mut self.actions
    }

    /// Presses the topmost child button under `(x, y)`.
    pub fn press_at(&mut self, x: f32, y: f32) -> bool {
        self.actions
            .iter_mut()
            .rev()
            .chain(self.nav.as_mut())
            .any(|btn| btn.press_at(x, y))
    }
}

impl MaterialWidget for Toolbar {
    fn material(&self) -> &Material {
        &self.material
    }

    fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    fn draw(&self, gpu: &mut dyn GpuContext, view: &Mat4, proj: &Mat4) {
        self.material.draw(gpu, view, proj);
        if let Some(nav) = &self.nav {
            nav.draw(gpu, view, proj);
        }
        for action in &self.actions {
            action.draw(gpu, view, proj);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use material_engine::coords::Rect;
    use material_engine::gpu::{CommandRecorder, UniformValue};

    fn button(gpu: &mut CommandRecorder, theme: &Theme, x: f32) -> Button {
        let mut b = Button::new(gpu, Color::white(), theme).unwrap();
        b.material_mut().set_bounds(Rect::new(x, 0.0, 48.0, 48.0));
        b
    }

    #[test]
    fn actions_are_flattened() {
        let mut gpu = CommandRecorder::new();
        let theme = Theme::default();
        let mut bar = Toolbar::new(&mut gpu, Color::white(), &theme).unwrap();

        let action = button(&mut gpu, &theme, 0.0);
        assert_eq!(action.material().behavior(), Behavior::Raised);
        bar.add_action(action);
        assert_eq!(bar.actions()[0].material().behavior(), Behavior::Flat);
    }

    #[test]
    fn draws_bar_then_nav_then_actions() {
        let mut gpu = CommandRecorder::new();
        let theme = Theme::default();
        let mut bar = Toolbar::new(&mut gpu, Color::white(), &theme).unwrap();
        bar.material_mut().set_behavior(Behavior::Default);
        bar.material_mut().set_color(Color::new(1.0, 0.0, 0.0, 1.0));

        let mut nav = button(&mut gpu, &theme, 0.0);
        nav.material_mut().set_behavior(Behavior::Default);
        nav.material_mut().set_color(Color::new(0.0, 1.0, 0.0, 1.0));
        bar.set_nav(nav);

        for (i, x) in [100.0, 200.0].into_iter().enumerate() {
            let mut a = button(&mut gpu, &theme, x);
            a.material_mut().set_color(Color::new(0.0, 0.0, 1.0, i as f32));
            bar.add_action(a);
        }

        bar.draw(&mut gpu, &Mat4::IDENTITY, &Mat4::IDENTITY);
        let colors: Vec<_> = gpu
            .draws()
            .iter()
            .map(|d| d.uniform("color").and_then(UniformValue::as_vec4).unwrap())
            .collect();
        assert_eq!(
            colors,
            [
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ]
        );
    }

    #[test]
    fn press_routes_to_the_hit_button() {
        let mut gpu = CommandRecorder::new();
        let theme = Theme::default();
        let mut bar = Toolbar::new(&mut gpu, Color::white(), &theme).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        bar.set_nav(button(&mut gpu, &theme, 0.0).on_press(move || l.borrow_mut().push("nav")));
        let l = log.clone();
        let search = button(&mut gpu, &theme, 100.0)
            .on_press(move || l.borrow_mut().push("search"));
        bar.add_action(search);

        assert!(bar.press_at(10.0, 10.0));
        assert!(bar.press_at(120.0, 10.0));
        assert!(!bar.press_at(70.0, 10.0));
        assert_eq!(*log.borrow(), ["nav", "search"]);
    }
}
