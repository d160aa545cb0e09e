use std::env;

use anyhow::Context;
use glium::glutin::event_loop::EventLoop;

use skyview::config::{Config, SurfaceKind};
use skyview::display::{HeadlessSurface, WindowSurface};
use skyview::logging::init_logging;
use skyview::Renderer;

const CONFIG_ENV: &str = "SKYVIEW_CONFIG";

fn load_config() -> anyhow::Result<Config> {
    match env::var(CONFIG_ENV) {
        Ok(path) => Config::load(&path).with_context(|| format!("failed to load {}", path)),
        Err(_) => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    // the config carries the log filter, so it is read before logging starts
    let config = load_config()?;
    init_logging(config.log_filter.as_deref()).context("failed to initialize logging")?;

    if let Ok(path) = env::var(CONFIG_ENV) {
        log::info!("loaded config from {}", path);
    }
    log::debug!("config: {:?}", config);

    let renderer = Renderer::new(&config)?;
    let width = renderer.geometry().image_width;
    let height = renderer.geometry().image_height;

    match config.surface {
        SurfaceKind::Window => {
            let event_loop = EventLoop::new();
            let mut surface = WindowSurface::new(&event_loop, &config.title, width, height)?;

            renderer.render(&mut surface)?;
            surface.run(event_loop)
        }

        SurfaceKind::Headless => {
            let mut surface = HeadlessSurface::new(width, height);
            let presented = renderer.render(&mut surface)?;

            log::info!(
                "headless render finished in {}ms",
                presented.elapsed().as_millis()
            );
            Ok(())
        }
    }
}
