//! Particle Field entry point
//!
//! In the browser this mounts the field on the hero canvas. Natively it runs
//! the simulation headless and logs a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;

    use particle_field::platform::web::{ParticleCanvas, initialize};

    /// Canvas the landing page reserves for the background
    const HERO_CANVAS: &str = "#hero-canvas";

    thread_local! {
        static HERO: RefCell<Option<ParticleCanvas>> = const { RefCell::new(None) };
    }

    pub fn run() {
        initialize();
        log::info!("Particle Field starting...");

        match ParticleCanvas::mount(HERO_CANVAS, None) {
            Ok(field) => HERO.with(|hero| *hero.borrow_mut() = Some(field)),
            // No canvas, no background; the page works without it
            Err(e) => log::warn!("Particle field not mounted: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use particle_field::renderer::RecordingSurface;
    use particle_field::sim::{Bounds, ParticleField};
    use particle_field::{FieldSettings, SettingsError};

    /// Assumed frame interval for pointer timestamps (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Debug)]
    pub struct Options {
        pub width: f64,
        pub height: f64,
        pub frames: u64,
        pub seed: u64,
        pub settings: Option<PathBuf>,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                width: 800.0,
                height: 600.0,
                frames: 600,
                seed: 1,
                settings: None,
            }
        }
    }

    const USAGE: &str = "usage: particle-field [--width W] [--height H] [--frames N] [--seed S] [--settings FILE]";

    pub fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
        let mut options = Options::default();
        while let Some(flag) = args.next() {
            let value = args
                .next()
                .ok_or_else(|| format!("missing value for {}\n{}", flag, USAGE))?;
            let bad = || format!("invalid value '{}' for {}", value, flag);
            match flag.as_str() {
                "--width" => options.width = value.parse().map_err(|_| bad())?,
                "--height" => options.height = value.parse().map_err(|_| bad())?,
                "--frames" => options.frames = value.parse().map_err(|_| bad())?,
                "--seed" => options.seed = value.parse().map_err(|_| bad())?,
                "--settings" => options.settings = Some(PathBuf::from(&value)),
                _ => return Err(format!("unknown flag {}\n{}", flag, USAGE)),
            }
        }
        Ok(options)
    }

    pub fn run(options: &Options) -> Result<(), SettingsError> {
        let settings = match &options.settings {
            Some(path) => FieldSettings::from_file(path)?,
            None => FieldSettings::default(),
        };

        let bounds = Bounds::new(options.width, options.height);
        let mut field = ParticleField::initialize(bounds, settings, options.seed);
        let mut surface = RecordingSurface::new(options.width, options.height);

        log::info!(
            "Running {} frames on {}x{} with {} particles",
            options.frames,
            options.width,
            options.height,
            field.len()
        );

        let mut peak_speed: f64 = 0.0;
        let mut links = 0;
        for frame in 0..options.frames {
            surface.reset();
            let now = frame as f64 * FRAME_MS;
            // Sweep a pointer across the middle so the repulsion path runs too
            let sweep = (frame as f64 / options.frames.max(1) as f64) * options.width;
            field.on_pointer_move(sweep, options.height / 2.0, now);
            links = field.frame(&mut surface, now);
            peak_speed = peak_speed.max(field.max_speed());
        }

        log::info!(
            "Done: {} particles, peak speed {:.4}, {} links in last frame",
            field.len(),
            peak_speed,
            links
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Particle Field (native) starting...");

    let options = match headless::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    if let Err(e) = headless::run(&options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
