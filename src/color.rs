use crate::config::GradientConfig;
use crate::error::RenderError;
use crate::ray::Ray;
use crate::vec3::Color;

pub fn lerp<T>(a: T, b: T, val: f64) -> T
where
    T: std::ops::Mul<f64, Output = T>,
    T: std::ops::Add<T, Output = T>,
{
    (a * (1.0 - val)) + (b * val)
}

/// Scales a `[0, 1]` channel to a byte, clamping anything outside the range.
pub fn to_byte(channel: f64) -> u8 {
    // NaN survives clamp and casts to 0
    (channel * 255.999).round().clamp(0.0, 255.0) as u8
}

pub fn to_rgba8(color: Color, alpha: u8) -> [u8; 4] {
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), alpha]
}

/// Vertical sky gradient, blended on the ray direction's y component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gradient {
    pub bottom: Color,
    pub top: Color,
}

impl Gradient {
    pub fn new(bottom: Color, top: Color) -> Gradient {
        Gradient { bottom, top }
    }

    /// Only the direction matters; the ray origin is ignored.
    pub fn ray_color(&self, ray: &Ray) -> Result<Color, RenderError> {
        let unit_y = ray.dir.unit()?.y;

        Ok(lerp::<Color>(
            self.bottom,
            self.top,
            0.5 * (unit_y + 1.0), // map unit_y from [-1.0 -> 1.0] to [0.0 -> 1.0]
        ))
    }
}

impl From<&GradientConfig> for Gradient {
    fn from(config: &GradientConfig) -> Self {
        Gradient::new(config.bottom, config.top)
    }
}
