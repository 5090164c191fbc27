//! Orientation-agnostic accelerometer axis
//!
//! Browsers report acceleration in device coordinates, so the axis a
//! forward flick lands on depends on how the phone is rotated. This maps
//! every supported rotation onto one signed "primary axis" where a forward
//! flick is strongly negative and a pull back is strongly positive.

use glam::Vec3;

use crate::error::GameError;

/// Screen rotation reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Normal portrait (0°)
    #[default]
    Portrait,
    /// Landscape-left (90°)
    LandscapeLeft,
    /// Upside-down portrait (180°)
    PortraitFlipped,
    /// Landscape-right (270°, reported as -90° by some browsers)
    LandscapeRight,
}

impl Orientation {
    pub fn from_angle(degrees: i32) -> Result<Self, GameError> {
        match degrees {
            0 => Ok(Orientation::Portrait),
            90 => Ok(Orientation::LandscapeLeft),
            180 => Ok(Orientation::PortraitFlipped),
            270 | -90 => Ok(Orientation::LandscapeRight),
            other => Err(GameError::UnsupportedOrientation(other)),
        }
    }

    /// Primary-axis value of a gravity-inclusive sample
    #[inline]
    pub fn primary(&self, accel: Vec3) -> f32 {
        match self {
            Orientation::Portrait => accel.z,
            Orientation::LandscapeLeft => accel.x,
            Orientation::PortraitFlipped => -accel.z,
            Orientation::LandscapeRight => -accel.x,
        }
    }
}

/// Normalize one sample; unsupported angles fall back to portrait
pub fn primary_axis(accel: Vec3, angle: i32) -> f32 {
    let orientation = Orientation::from_angle(angle).unwrap_or_else(|e| {
        log::debug!("{e}, using portrait mapping");
        Orientation::Portrait
    });
    orientation.primary(accel)
}
