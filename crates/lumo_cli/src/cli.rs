use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumo_core::PpmFormat;

/// Log levels exposed on the command line.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scene presets. Each preset pairs a scene with the
/// algorithm it was built to exercise.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenePreset {
    /// Grayscale depth visualization of a sphere in a corner
    Depth,
    /// Surface normals of a sphere in a corner mapped to RGB
    Normal,
    /// Single directional light over a corner scene
    DirectionalLight,
    /// Single point light with inverse-square falloff
    PointLight,
    /// Single spot light cone
    SpotLight,
    /// Red, green and blue spots overlapping on a floor
    RgbSpots,
    /// A 6x6 grid of point lights plus a directional fill
    GridLights,
    /// Whitted ray tracing: checkerboard floor, colored walls, two
    /// Phong spheres
    BoxedSpheres,
    /// Path tracing: Cornell-style room with a mirror and a glass
    /// sphere
    CornellBox,
}

/// PPM variants selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// ASCII PPM
    P3,
    /// Binary PPM
    P6,
}

impl From<OutputFormat> for PpmFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::P3 => PpmFormat::P3,
            OutputFormat::P6 => PpmFormat::P6,
        }
    }
}

#[derive(Parser)]
#[command(name = "lumo")]
#[command(about = "CPU renderer: depth/normal/light diagnostics, Whitted ray tracing and Monte Carlo path tracing")]
pub struct Args {
    /// Path-tracing samples per subpixel stratum (total spp is 4x this)
    #[arg(default_value = "10", help = "Samples per subpixel stratum")]
    pub samples: u32,

    /// Image width in pixels
    #[arg(default_value = "800", help = "Image width in pixels")]
    pub width: usize,

    /// Image height in pixels
    #[arg(default_value = "600", help = "Image height in pixels")]
    pub height: usize,

    /// Output file path
    #[arg(default_value = "Render.ppm", help = "Output PPM file path")]
    pub output: String,

    /// Scene preset to render
    #[arg(long, value_enum, default_value_t = ScenePreset::CornellBox)]
    pub scene: ScenePreset,

    /// Maximum mirror-reflection recursion for the ray tracer
    #[arg(long, default_value = "50", help = "Maximum reflection bounces")]
    pub bounces: u32,

    /// PPM output variant
    #[arg(long, value_enum, default_value_t = OutputFormat::P3)]
    pub format: OutputFormat,

    /// Gaussian-blur the output with the given kernel radius
    #[arg(long, help = "Post-process Gaussian blur radius in pixels")]
    pub blur: Option<usize>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,
}

/// Initialize the logger with the specified level.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
