//! The frame renderer: owns the GL objects for one image quad and issues
//! the single draw call.

use glow::{HasContext, PixelUnpackData};
use std::sync::Arc;

use crate::{
    context::GlContext,
    error::RenderError,
    geometry::{self, TEX_COORDS},
    shaders,
    types::ImageData,
};

/// GL internal format for RGBA8 textures, pre-cast to the `i32` that
/// `tex_image_2d` expects.
#[expect(clippy::cast_possible_wrap)]
const RGBA8_INTERNAL_FORMAT: i32 = glow::RGBA8 as i32;

/// Convert a `u32` to `i32` for GL API calls.
///
/// # Panics
///
/// Panics if `value > i32::MAX`. In practice, this is unreachable for
/// normal surface dimensions and image sizes.
fn gl_size(value: u32) -> i32 {
    i32::try_from(value).expect("dimension exceeds i32::MAX")
}

/// Resolved attribute locations for the quad program.
struct QuadAttributes {
    /// `a_position` — pixel-space vertex position.
    position: u32,
    /// `a_texCoord` — unit-square texture coordinate.
    tex_coord: u32,
}

/// Resolved uniform locations for the quad program.
struct QuadUniforms {
    /// `u_resolution` — surface size in pixels.
    resolution: glow::UniformLocation,
    /// `u_image` — texture unit index (always 0).
    image: glow::UniformLocation,
}

/// Renders one decoded image as a textured rectangle sized to the image's
/// pixel dimensions, placed at the surface's top-left corner.
///
/// Owns exactly one shader program, one vertex array, one position buffer,
/// one texcoord buffer, and (after the first draw) one texture. None of
/// these are pooled or recreated.
///
/// # Example
///
/// ```no_run
/// # use glow_image_quad::{ExtensionPolicy, GlContext, ImageData, ImageRenderer};
/// # use std::sync::Arc;
/// # fn example(gl: Arc<glow::Context>, png_bytes: &[u8]) -> Result<(), glow_image_quad::RenderError> {
/// // During setup (with a current GL context):
/// let context = GlContext::new(gl, &[], ExtensionPolicy::Require)?;
/// let mut renderer = unsafe { ImageRenderer::new(&context) }?;
///
/// // Once the image is decoded:
/// let image = ImageData::decode(png_bytes)?;
/// unsafe { renderer.draw(&image, [800, 600]) }?;
/// # Ok(())
/// # }
/// ```
pub struct ImageRenderer {
    /// The OpenGL context, shared via [`Arc`] so it can be stored alongside
    /// resources that reference it.
    gl: Arc<glow::Context>,

    /// Compiled shader program for the textured quad.
    program: glow::Program,
    /// Resolved uniform locations for [`program`](Self::program).
    uniforms: QuadUniforms,

    /// Vertex array object binding both attributes to their buffers.
    vao: glow::VertexArray,
    /// Vertex buffer for the pixel-space rectangle, rewritten to the
    /// image's dimensions at draw time.
    position_buffer: glow::Buffer,
    /// Vertex buffer for the fixed unit-square texture coordinates,
    /// written once at setup.
    texcoord_buffer: glow::Buffer,

    /// The uploaded image texture. `None` until the first draw.
    texture: Option<glow::Texture>,
}

impl ImageRenderer {
    /// Create the renderer: compile and link the quad program, resolve its
    /// attribute and uniform locations, and configure the vertex array.
    ///
    /// Both attributes read two-component 32-bit floats, tightly packed,
    /// starting at each buffer's beginning. The texture coordinates are
    /// uploaded here; the position buffer is filled at draw time.
    ///
    /// # Safety
    ///
    /// The context must be current and valid. The caller must ensure that
    /// [`destroy`](Self::destroy) is called before the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ShaderCompile`] / [`RenderError::ProgramLink`]
    /// for shader failures, [`RenderError::MissingAttribute`] /
    /// [`RenderError::MissingUniform`] when the program does not expose the
    /// expected interface, and [`RenderError::ContextCreation`] when a GL
    /// object cannot be allocated.
    pub unsafe fn new(context: &GlContext) -> Result<Self, RenderError> {
        let gl = Arc::clone(context.gl());

        let program = unsafe { shaders::compile_program(&gl, shaders::VERTEX_SRC, shaders::FRAGMENT_SRC) }?;

        let (attributes, uniforms) = unsafe { Self::resolve_locations(&gl, program) }?;

        let (vao, position_buffer, texcoord_buffer) = unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(RenderError::ContextCreation)?;
            let position_buffer = gl.create_buffer().map_err(RenderError::ContextCreation)?;
            let texcoord_buffer = gl.create_buffer().map_err(RenderError::ContextCreation)?;

            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(position_buffer));
            gl.enable_vertex_attrib_array(attributes.position);
            gl.vertex_attrib_pointer_f32(attributes.position, 2, glow::FLOAT, false, 0, 0);

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(texcoord_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&TEX_COORDS),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(attributes.tex_coord);
            gl.vertex_attrib_pointer_f32(attributes.tex_coord, 2, glow::FLOAT, false, 0, 0);

            gl.bind_vertex_array(None);

            (vao, position_buffer, texcoord_buffer)
        };

        tracing::debug!("image quad renderer ready");

        Ok(Self {
            gl,
            program,
            uniforms,
            vao,
            position_buffer,
            texcoord_buffer,
            texture: None,
        })
    }

    /// Resolve the program's attribute and uniform locations.
    ///
    /// A missing name means the shader source and this code disagree, which
    /// is a fatal configuration error rather than something to paper over.
    unsafe fn resolve_locations(
        gl: &glow::Context,
        program: glow::Program,
    ) -> Result<(QuadAttributes, QuadUniforms), RenderError> {
        let attributes = unsafe {
            QuadAttributes {
                position: gl
                    .get_attrib_location(program, "a_position")
                    .ok_or_else(|| RenderError::MissingAttribute("a_position".into()))?,
                tex_coord: gl
                    .get_attrib_location(program, "a_texCoord")
                    .ok_or_else(|| RenderError::MissingAttribute("a_texCoord".into()))?,
            }
        };

        let uniforms = unsafe {
            QuadUniforms {
                resolution: gl
                    .get_uniform_location(program, "u_resolution")
                    .ok_or_else(|| RenderError::MissingUniform("u_resolution".into()))?,
                image: gl
                    .get_uniform_location(program, "u_image")
                    .ok_or_else(|| RenderError::MissingUniform("u_image".into()))?,
            }
        };

        Ok((attributes, uniforms))
    }

    /// Draw the image once into the currently-bound framebuffer.
    ///
    /// Uploads the texture on first call, sets the viewport to the full
    /// surface, clears color and depth to transparent zero, sizes the
    /// position rectangle to the image's pixel dimensions at origin (0,0),
    /// and issues one six-vertex triangle-list draw call.
    ///
    /// `surface_size` is the surface's backing resolution in pixels; the
    /// windowing collaborator is responsible for matching it to the
    /// displayed size before calling.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// [`RenderError::ContextCreation`] if the texture object cannot be
    /// allocated.
    pub unsafe fn draw(
        &mut self,
        image: &ImageData,
        [width, height]: [u32; 2],
    ) -> Result<(), RenderError> {
        let texture = match self.texture {
            Some(texture) => texture,
            None => {
                let texture = unsafe { upload_texture(&self.gl, image) }?;
                self.texture = Some(texture);
                texture
            }
        };

        let gl = &self.gl;
        unsafe {
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            gl.viewport(0, 0, gl_size(width), gl_size(height));
            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vao));

            // Precision loss is acceptable: surface dimensions are small
            // relative to f32 mantissa range.
            #[expect(clippy::cast_precision_loss)]
            gl.uniform_2_f32(Some(&self.uniforms.resolution), width as f32, height as f32);
            gl.uniform_1_i32(Some(&self.uniforms.image), 0);

            // Size the rectangle to the image, placed at the origin.
            #[expect(clippy::cast_precision_loss)]
            geometry::set_rectangle(
                gl,
                self.position_buffer,
                0.0,
                0.0,
                image.width as f32,
                image.height as f32,
            );

            gl.draw_arrays(glow::TRIANGLES, 0, 6);

            gl.bind_vertex_array(None);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        tracing::debug!(
            image_width = image.width,
            image_height = image.height,
            surface_width = width,
            surface_height = height,
            "image quad drawn"
        );

        Ok(())
    }

    /// Clean up all GL resources owned by this renderer.
    ///
    /// # Safety
    ///
    /// Must be called with the same GL context that was used to create the
    /// renderer, and must be called exactly once.
    pub unsafe fn destroy(&self) {
        let gl = &self.gl;
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.position_buffer);
            gl.delete_buffer(self.texcoord_buffer);
            if let Some(texture) = self.texture {
                gl.delete_texture(texture);
            }
        }
    }
}

/// Upload the image's pixels as a single-level RGBA8 texture.
///
/// Sampling is fixed: clamp-to-edge on both axes, nearest-neighbor
/// filtering for both minification and magnification, no mipmaps.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// [`RenderError::ContextCreation`] if the texture cannot be allocated.
unsafe fn upload_texture(
    gl: &glow::Context,
    image: &ImageData,
) -> Result<glow::Texture, RenderError> {
    let texture = unsafe { gl.create_texture() }.map_err(RenderError::ContextCreation)?;

    // GL constant values are small enough that the cast is always safe.
    #[expect(clippy::cast_possible_wrap)]
    unsafe {
        gl.active_texture(glow::TEXTURE0);
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::NEAREST as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::NEAREST as i32,
        );

        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            RGBA8_INTERNAL_FORMAT,
            gl_size(image.width),
            gl_size(image.height),
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            PixelUnpackData::Slice(Some(&image.pixels)),
        );

        gl.bind_texture(glow::TEXTURE_2D, None);
    }

    tracing::debug!(image.width, image.height, "texture uploaded");
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_size_passes_ordinary_dimensions() {
        assert_eq!(gl_size(0), 0);
        assert_eq!(gl_size(4096), 4096);
    }

    #[test]
    #[should_panic(expected = "dimension exceeds i32::MAX")]
    fn gl_size_rejects_oversized_dimensions() {
        let _ = gl_size(u32::MAX);
    }
}
