//! Scene rendering
//!
//! `scene` lays out a frame in pixel space; `sdf_pipeline` draws it with
//! signed distance fields in a single fragment shader pass.

pub mod scene;
pub mod sdf_pipeline;

pub use scene::{FrameState, Marker, SceneGlobals};
pub use sdf_pipeline::SceneRenderer;
