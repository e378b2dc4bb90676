use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use glam::{Mat4, Vec2};

use material_ui::prelude::*;

use crate::config::StudioConfig;

/// Texture unit the icon sheet is registered under.
pub const ICON_SHEET: TextureId = TextureId::new(0);

const TOOLBAR_HEIGHT: Dp = Dp(56.0);
const ICON_BUTTON: Dp = Dp(48.0);
const FAB_SIZE: Dp = Dp(56.0);
const MARGIN: Dp = Dp(16.0);
const DRAWER_WIDTH: Dp = Dp(280.0);

/// Things the user asked for through a button press.
///
/// Button callbacks only queue actions; the scene applies them after the
/// press has been routed, when it is free to mutate its widgets.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Action {
    ToggleDrawer,
    Search,
    More,
    Compose,
}

type ActionQueue = Rc<RefCell<Vec<Action>>>;

fn queue_action(queue: &ActionQueue, action: Action) -> impl FnMut() + 'static {
    let queue = queue.clone();
    move || queue.borrow_mut().push(action)
}

/// Demo widget tree: a planar and a spherical backdrop, a toolbar with a
/// navigation button and two actions, a floating action button and a
/// navigation drawer.
pub struct Scene {
    plane: Backdrop,
    sphere: Backdrop,
    toolbar: Toolbar,
    fab: Button,
    drawer: NavDrawer,
    actions: ActionQueue,
}

impl Scene {
    pub fn new(gpu: &mut dyn GpuContext, config: &StudioConfig, theme: &Theme) -> Result<Self> {
        let atlas = GridIconAtlas::new(theme.icon_cell);
        let actions: ActionQueue = Rc::default();

        let plane = Backdrop::new(
            gpu,
            BackdropShape::Plane { depth: config.plane_depth, flip_y: true },
            palette::BLUE_GREY_50,
            theme,
        )
        .context("failed to build planar backdrop")?;
        let sphere = Backdrop::new(
            gpu,
            BackdropShape::Sphere { depth: config.sphere_depth },
            palette::TEAL_500.with_alpha(0.35),
            theme,
        )
        .context("failed to build geodesic backdrop")?;
        for backdrop in [&plane, &sphere] {
            log::info!(
                "{:?}: {} vertices, {} triangles",
                backdrop.shape(),
                backdrop.mesh().vertex_count(),
                backdrop.mesh().indices.count / 3
            );
        }

        let mut toolbar =
            Toolbar::new(gpu, palette::BLUE_500, theme).context("failed to build toolbar")?;

        let mut nav = icon_button(gpu, theme, &atlas, Icon::MENU)?
            .on_press(queue_action(&actions, Action::ToggleDrawer));
        nav.material_mut().set_behavior(Behavior::Flat);
        toolbar.set_nav(nav);

        for (icon, action) in [(Icon::SEARCH, Action::Search), (Icon::MORE_VERT, Action::More)] {
            let button =
                icon_button(gpu, theme, &atlas, icon)?.on_press(queue_action(&actions, action));
            toolbar.add_action(button);
        }

        let mut fab = icon_button(gpu, theme, &atlas, Icon::ADD)?
            .on_press(queue_action(&actions, Action::Compose));
        fab.material_mut().set_color(palette::PINK_A200);
        fab.material_mut().set_circle(true);

        let drawer =
            NavDrawer::new(gpu, palette::WHITE, theme).context("failed to build nav drawer")?;

        Ok(Self {
            plane,
            sphere,
            toolbar,
            fab,
            drawer,
            actions,
        })
    }

    /// Places every widget for a window of `size` physical pixels.
    pub fn layout(&mut self, size: Vec2, scale_factor: f32) {
        let px = |dp: Dp| dp.to_px(scale_factor);
        let bar_h = px(TOOLBAR_HEIGHT);
        let inset = (bar_h - px(ICON_BUTTON)) / 2.0;
        let content = Rect::new(0.0, bar_h, size.x, (size.y - bar_h).max(0.0));

        self.plane.set_bounds(content, -20.0);
        let side = content.size.x.min(content.size.y) * 0.8;
        let sphere_box = Rect::new(
            content.origin.x + (content.size.x - side) / 2.0,
            content.origin.y + (content.size.y - side) / 2.0,
            side,
            side,
        );
        self.sphere.set_bounds(sphere_box, -10.0);

        self.toolbar
            .material_mut()
            .set_bounds(Rect::new(0.0, 0.0, size.x, bar_h));
        self.toolbar.material_mut().set_z(4.0);

        if let Some(nav) = self.toolbar.nav_mut() {
            let m = nav.material_mut();
            m.set_bounds(Rect::new(inset, inset, px(ICON_BUTTON), px(ICON_BUTTON)));
            m.set_z(5.0);
        }
        let mut x = size.x - inset;
        for action in self.toolbar.actions_mut().iter_mut().rev() {
            x -= px(ICON_BUTTON);
            let m = action.material_mut();
            m.set_bounds(Rect::new(x, inset, px(ICON_BUTTON), px(ICON_BUTTON)));
            m.set_z(5.0);
        }

        let fab = px(FAB_SIZE);
        let fab_m = self.fab.material_mut();
        fab_m.set_bounds(Rect::new(
            size.x - fab - px(MARGIN),
            size.y - fab - px(MARGIN),
            fab,
            fab,
        ));
        fab_m.set_z(6.0);

        self.drawer
            .dock_left(Rect::new(0.0, 0.0, size.x, size.y), px(DRAWER_WIDTH));
        self.drawer.material_mut().set_z(16.0);
    }

    /// Draws back to front: backdrops, toolbar, FAB, drawer.
    pub fn draw(&self, gpu: &mut dyn GpuContext, view: &Mat4, proj: &Mat4) {
        self.plane.draw(gpu, view, proj);
        self.sphere.draw(gpu, view, proj);
        self.toolbar.draw(gpu, view, proj);
        self.fab.draw(gpu, view, proj);
        self.drawer.draw(gpu, view, proj);
    }

    /// Routes a click to the topmost widget under `(x, y)`.
    pub fn click(&mut self, x: f32, y: f32) {
        if self.drawer.contains(x, y) {
            log::debug!("click on nav drawer at ({x}, {y})");
        } else if self.drawer.is_open() {
            // Clicking outside an open drawer dismisses it.
            self.drawer.set_open(false);
        } else if !self.fab.press_at(x, y) && !self.toolbar.press_at(x, y) {
            log::trace!("click at ({x}, {y}) hit nothing");
        }
        self.apply_actions();
    }

    fn apply_actions(&mut self) {
        let pending: Vec<Action> = self.actions.borrow_mut().drain(..).collect();
        for action in pending {
            match action {
                Action::ToggleDrawer => self.drawer.toggle(),
                Action::Search | Action::More | Action::Compose => log::info!("{action:?} pressed"),
            }
        }
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer.is_open()
    }
}

fn icon_button(
    gpu: &mut dyn GpuContext,
    theme: &Theme,
    atlas: &GridIconAtlas,
    icon: Icon,
) -> Result<Button> {
    let mut button = Button::new(gpu, palette::BLUE_700, theme)
        .with_context(|| format!("failed to build {icon:?} button"))?;
    let m = button.material_mut();
    m.set_texture(Some(ICON_SHEET));
    m.set_icon(icon, atlas);
    Ok(button)
}
