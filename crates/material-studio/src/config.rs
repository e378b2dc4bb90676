use material_engine::coords::Color;
use material_engine::device::GpuInit;
use material_engine::logging::LoggingConfig;
use material_ui::palette;
use winit::dpi::LogicalSize;

/// Startup configuration of the studio window.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub clear_color: Color,

    /// Subdivision depth of the geodesic backdrop.
    pub sphere_depth: u32,
    /// Quad-tree depth of the planar backdrop.
    pub plane_depth: u32,

    pub logging: LoggingConfig,
    pub gpu: GpuInit,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "material studio".to_string(),
            initial_size: LogicalSize::new(960.0, 640.0),
            clear_color: palette::GREY_100,
            sphere_depth: 3,
            plane_depth: 4,
            logging: LoggingConfig::default(),
            gpu: GpuInit::default(),
        }
    }
}
