use std::time;

use pbr::ProgressBar;

use crate::camera::ViewportGeometry;
use crate::color::Gradient;
use crate::config::Config;
use crate::display::DisplaySurface;
use crate::error::RenderError;
use crate::framebuffer::FrameBuffer;

/// A frame that is still being rendered.
///
/// [`Renderer::render`] consumes it, so a renderer presents at most once.
pub struct Renderer {
    geometry: ViewportGeometry,
    gradient: Gradient,
    framebuffer: FrameBuffer,
    progress: bool,
}

/// A finished frame that has been presented.
pub struct Presented {
    framebuffer: FrameBuffer,
    elapsed: time::Duration,
}

impl Renderer {
    pub fn new(config: &Config) -> Result<Renderer, RenderError> {
        let geometry = ViewportGeometry::new(&config.camera)?;
        log::debug!("viewport geometry: {:?}", geometry);

        Ok(Renderer {
            framebuffer: FrameBuffer::new(geometry.image_width, geometry.image_height)?,
            gradient: Gradient::from(&config.gradient),
            geometry,
            progress: config.progress,
        })
    }

    pub fn geometry(&self) -> &ViewportGeometry {
        &self.geometry
    }

    /// Colors every pixel, then presents the buffer once.
    ///
    /// The first failing pixel aborts the whole frame.
    pub fn render<S: DisplaySurface + ?Sized>(
        mut self,
        surface: &mut S,
    ) -> Result<Presented, RenderError> {
        let width = self.geometry.image_width;
        let height = self.geometry.image_height;

        log::info!("rendering {}x{}", width, height);
        let timer = time::Instant::now();

        let mut progress_bar = if self.progress {
            let mut pb = ProgressBar::new(height as u64);
            pb.message("Scanlines ");
            Some(pb)
        } else {
            None
        };

        for y in 0..height {
            for x in 0..width {
                let ray = self.geometry.get_ray(x, y);
                let color = self.gradient.ray_color(&ray)?;
                self.framebuffer.write(x, y, color)?;
            }

            if let Some(pb) = progress_bar.as_mut() {
                pb.inc();
            }
        }

        if let Some(mut pb) = progress_bar {
            pb.finish();
        }

        let elapsed = timer.elapsed();
        log::info!(
            "rendered {} pixels in {}ms",
            width as u64 * height as u64,
            elapsed.as_millis()
        );

        self.framebuffer.present(surface)?;
        log::info!("presented {}x{} frame", width, height);

        Ok(Presented {
            framebuffer: self.framebuffer,
            elapsed,
        })
    }
}

impl Presented {
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn elapsed(&self) -> time::Duration {
        self.elapsed
    }

    pub fn into_framebuffer(self) -> FrameBuffer {
        self.framebuffer
    }
}

/// Builds a [`Renderer`] for `config` and runs it against `surface`.
pub fn render<S: DisplaySurface + ?Sized>(
    config: &Config,
    surface: &mut S,
) -> Result<Presented, RenderError> {
    Renderer::new(config)?.render(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::display::HeadlessSurface;

    fn quiet_config(image_width: u32, aspect_ratio: f64) -> Config {
        Config {
            camera: CameraConfig {
                image_width,
                aspect_ratio,
                ..CameraConfig::default()
            },
            progress: false,
            ..Config::default()
        }
    }

    #[test]
    fn renders_and_presents_once() {
        let config = quiet_config(16, 2.0);
        let mut surface = HeadlessSurface::new(16, 8);

        let presented = render(&config, &mut surface).unwrap();

        assert_eq!(surface.present_count(), 1);
        assert_eq!(surface.last_frame().unwrap(), presented.framebuffer().as_bytes());
    }

    #[test]
    fn every_pixel_is_written_opaque() {
        let config = quiet_config(8, 1.0);
        let mut surface = HeadlessSurface::new(8, 8);

        let framebuffer = render(&config, &mut surface).unwrap().into_framebuffer();

        for pixel in framebuffer.as_bytes().chunks_exact(4) {
            assert_eq!(pixel[3], 255);
            // default gradient always has a saturated blue channel
            assert_eq!(pixel[2], 255);
        }
    }

    #[test]
    fn image_is_mirrored_and_fades_vertically() {
        let config = quiet_config(9, 1.0);
        let mut surface = HeadlessSurface::new(9, 9);
        let fb = render(&config, &mut surface).unwrap().into_framebuffer();

        // symmetric about the vertical axis
        for y in 0..9 {
            assert_eq!(fb.read(0, y).unwrap(), fb.read(8, y).unwrap());
        }
        // the top row is bluer than the bottom row (red fades out going up)
        assert!(fb.read(4, 0).unwrap()[0] < fb.read(4, 8).unwrap()[0]);
    }

    #[test]
    fn mismatched_surface_aborts_the_render() {
        let config = quiet_config(16, 2.0);
        let mut surface = HeadlessSurface::new(16, 9);

        assert!(matches!(
            render(&config, &mut surface),
            Err(RenderError::InvalidDimension(_))
        ));
        assert_eq!(surface.present_count(), 0);
    }

    #[test]
    fn invalid_camera_fails_before_rendering() {
        let config = quiet_config(0, 2.0);
        assert!(Renderer::new(&config).is_err());
    }

    #[test]
    fn huge_derived_height_fails_without_allocating() {
        let config = quiet_config(400, 1e-9);
        assert!(matches!(
            Renderer::new(&config),
            Err(RenderError::InvalidDimension(_))
        ));
    }
}
