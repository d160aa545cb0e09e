use display_json::DebugAsJsonPretty;
use serde::Serialize;

use crate::config::CameraConfig;
use crate::error::RenderError;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// Image and viewport layout of a pinhole camera looking down -Z.
///
/// Derived once from a [`CameraConfig`] and never mutated afterwards. Pixel
/// `(x, y)` has its center at `pixel00_loc + x * pixel_delta_u + y * pixel_delta_v`.
#[derive(Copy, Clone, PartialEq, Serialize, DebugAsJsonPretty)]
pub struct ViewportGeometry {
    pub image_width: u32,
    pub image_height: u32,

    pub camera_center: Point3,
    pub pixel00_loc: Point3,
    pub pixel_delta_u: Vec3,
    pub pixel_delta_v: Vec3,
}

impl ViewportGeometry {
    pub fn new(config: &CameraConfig) -> Result<ViewportGeometry, RenderError> {
        config.validate()?;

        let image_width = config.image_width;
        let image_height = config.image_height()?;

        let viewport_height = config.viewport_height;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // image rows grow downwards, viewport y grows upwards
        let viewport_u = Vec3::new(viewport_width, 0.0, 0.0);
        let viewport_v = Vec3::new(0.0, -viewport_height, 0.0);

        let pixel_delta_u = viewport_u.div(image_width as f64)?;
        let pixel_delta_v = viewport_v.div(image_height as f64)?;

        let camera_center = config.camera_center;
        let viewport_upper_left = camera_center
            - Vec3::new(0.0, 0.0, config.focal_length)
            - viewport_u.div(2.0)?
            - viewport_v.div(2.0)?;

        Ok(ViewportGeometry {
            image_width,
            image_height,
            camera_center,
            pixel00_loc: viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v),
            pixel_delta_u,
            pixel_delta_v,
        })
    }

    pub fn pixel_center(&self, x: u32, y: u32) -> Point3 {
        self.pixel00_loc + (x as f64 * self.pixel_delta_u) + (y as f64 * self.pixel_delta_v)
    }

    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        Ray::new(
            self.camera_center,
            self.pixel_center(x, y) - self.camera_center,
        )
    }
}
