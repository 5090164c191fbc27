//! Scene layout
//!
//! Turns the per-frame game view into the pixel-space values the shader
//! draws: sky, scrolling water stripes, shore, fishing line, and a bobber or
//! hooked fish at the end of the line.

use bytemuck::{Pod, Zeroable};

use crate::consts::STRIPE_HEIGHT;
use crate::sim::Phase;

/// Shore band height (logical pixels)
const SHORE_HEIGHT: f32 = 40.0;
/// Gap kept between a full cast and the top edge (logical pixels)
const TOP_MARGIN: f32 = 20.0;
/// Line stroke width (logical pixels)
const LINE_WIDTH: f32 = 1.0;

/// What the renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub phase: Phase,
    /// Cast power (0-1): how far out the line reaches
    pub cast_progress: f32,
    /// Cosmetic water scroll (logical pixels)
    pub wave_offset: f32,
}

/// What sits at the end of the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Marker {
    None = 0,
    Bobber = 1,
    Fish = 2,
}

impl From<Phase> for Marker {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Idle => Marker::None,
            Phase::WaitingForBite => Marker::Bobber,
            Phase::FishOn => Marker::Fish,
        }
    }
}

// ============================================================================
// GPU DATA STRUCTURES (must match sdf_shader.wgsl)
// ============================================================================

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneGlobals {
    pub resolution: [f32; 2], // offset 0
    pub dpr: f32,             // offset 8
    pub wave_offset: f32,     // offset 12
    pub stripe_height: f32,   // offset 16
    pub shore_height: f32,    // offset 20
    pub line_x: f32,          // offset 24
    pub line_top: f32,        // offset 28
    pub line_bottom: f32,     // offset 32
    pub line_width: f32,      // offset 36
    pub marker: u32,          // offset 40
    pub _pad: u32,            // pad to 48 bytes
}

impl SceneGlobals {
    /// Lay out a frame on a `width` x `height` device-pixel surface
    pub fn layout(frame: &FrameState, width: f32, height: f32, dpr: f32) -> Self {
        let stripe_height = STRIPE_HEIGHT * dpr;
        let shore_height = SHORE_HEIGHT * dpr;
        let line_bottom = height - shore_height;
        let reach = (height - shore_height - TOP_MARGIN * dpr).max(0.0);
        let line_top = line_bottom - frame.cast_progress.clamp(0.0, 1.0) * reach;

        Self {
            resolution: [width, height],
            dpr,
            wave_offset: (frame.wave_offset * dpr).rem_euclid(stripe_height * 2.0),
            stripe_height,
            shore_height,
            line_x: width / 2.0,
            line_top,
            line_bottom,
            line_width: LINE_WIDTH * dpr,
            marker: Marker::from(frame.phase) as u32,
            _pad: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(phase: Phase, cast_progress: f32) -> FrameState {
        FrameState {
            phase,
            cast_progress,
            wave_offset: 0.0,
        }
    }

    #[test]
    fn test_globals_size_matches_shader() {
        assert_eq!(std::mem::size_of::<SceneGlobals>(), 48);
    }

    #[test]
    fn test_idle_line_has_zero_length() {
        let g = SceneGlobals::layout(&frame(Phase::Idle, 0.0), 400.0, 800.0, 1.0);
        assert_eq!(g.line_top, g.line_bottom);
        assert_eq!(g.line_bottom, 760.0);
        assert_eq!(g.marker, Marker::None as u32);
    }

    #[test]
    fn test_full_cast_reaches_top_margin() {
        let g = SceneGlobals::layout(&frame(Phase::WaitingForBite, 1.0), 400.0, 800.0, 2.0);
        assert_eq!(g.shore_height, 80.0);
        assert_eq!(g.line_top, 40.0);
        assert_eq!(g.line_x, 200.0);
        assert_eq!(g.marker, Marker::Bobber as u32);
    }

    #[test]
    fn test_fish_marker_when_hooked() {
        let g = SceneGlobals::layout(&frame(Phase::FishOn, 0.5), 400.0, 800.0, 1.0);
        assert_eq!(g.marker, Marker::Fish as u32);
        assert_eq!(g.line_top, 760.0 - 0.5 * 740.0);
    }

    #[test]
    fn test_wave_offset_scales_and_wraps() {
        let mut f = frame(Phase::Idle, 0.0);
        f.wave_offset = 7.0;
        let g = SceneGlobals::layout(&f, 100.0, 100.0, 2.0);
        // 14 device px wraps within a 24 px period
        assert_eq!(g.wave_offset, 14.0);
        f.wave_offset = 13.0;
        let g = SceneGlobals::layout(&f, 100.0, 100.0, 2.0);
        assert_eq!(g.wave_offset, 2.0);
    }

    #[test]
    fn test_tiny_surface_does_not_invert_line() {
        let g = SceneGlobals::layout(&frame(Phase::WaitingForBite, 1.0), 50.0, 30.0, 1.0);
        assert!(g.line_top <= g.line_bottom);
    }
}
