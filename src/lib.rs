//! Draw a single decoded image as a textured quad using OpenGL via [glow].
//!
//! This crate provides [`ImageRenderer`], which uploads one RGBA image as a
//! GL texture and draws it once as a two-triangle rectangle sized to the
//! image's pixel dimensions, placed at the surface's top-left corner. The
//! vertex shader converts pixel-space positions to clip space, so callers
//! work entirely in pixels.
//!
//! The windowing collaborator owns surface and context creation; this crate
//! receives a ready [`glow::Context`] wrapped in [`GlContext`], which also
//! handles capability-extension negotiation ([`ExtensionPolicy`]).
//!
//! # Errors
//!
//! Every failure — context wrapping, shader compilation, program linking,
//! missing attributes or uniforms, image decoding — is surfaced as a
//! [`RenderError`]; nothing is retried or silently dropped.
//!
//! # Safety
//!
//! Creating and using an [`ImageRenderer`] requires a valid, current OpenGL
//! context. All rendering methods are `unsafe` because they issue raw GL
//! calls.
//!
//! [glow]: https://docs.rs/glow

mod context;
mod error;
mod geometry;
mod render;
mod shaders;
mod types;

pub use context::{partition_extensions, ExtensionPolicy, GlContext};
pub use error::RenderError;
pub use geometry::{rectangle_vertices, TEX_COORDS};
pub use render::ImageRenderer;
pub use shaders::{ShaderStage, FRAGMENT_SRC, VERTEX_SRC};
pub use types::{ImageData, Vertex};
