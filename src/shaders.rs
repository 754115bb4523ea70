//! GLSL shader sources and compilation helpers.
//!
//! Shaders target GLSL 1.40 (OpenGL 3.1), which is widely supported on
//! desktop platforms.

use glow::HasContext;

use crate::error::RenderError;

/// Vertex shader for the image quad.
///
/// Positions arrive in pixel space with the origin at the top-left corner
/// of the surface; the shader converts them to clip space and flips Y. The
/// texture coordinate is passed through for interpolation.
///
/// # Uniforms
///
/// | Name           | Type   | Description              |
/// |----------------|--------|--------------------------|
/// | `u_resolution` | `vec2` | Surface size in pixels   |
pub const VERTEX_SRC: &str = r"#version 140

in vec2 a_position;
in vec2 a_texCoord;

// Surface resolution for the pixel -> clip space conversion
uniform vec2 u_resolution;

out vec2 v_texCoord;

void main() {
    // [0, resolution] -> [0, 1] -> [-1, 1], then flip Y so pixel
    // coordinates run top-down
    vec2 zeroToOne = a_position / u_resolution;
    vec2 clipSpace = zeroToOne * 2.0 - 1.0;
    gl_Position = vec4(clipSpace * vec2(1.0, -1.0), 0.0, 1.0);

    v_texCoord = a_texCoord;
}
";

/// Fragment shader for the image quad.
///
/// Samples the bound texture at the interpolated coordinate.
///
/// # Uniforms
///
/// | Name      | Type        | Description                    |
/// |-----------|-------------|--------------------------------|
/// | `u_image` | `sampler2D` | Texture unit holding the image |
pub const FRAGMENT_SRC: &str = r"#version 140

uniform sampler2D u_image;

in vec2 v_texCoord;

out vec4 outColor;

void main() {
    outColor = texture(u_image, v_texCoord);
}
";

/// A GPU shader stage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Runs once per vertex.
    Vertex,
    /// Runs once per rasterized fragment.
    Fragment,
}

impl ShaderStage {
    /// The GL enum value for this stage.
    #[must_use]
    pub fn gl_kind(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Compile a shader program from vertex and fragment source strings.
///
/// Both stages are compiled before the link call is issued, so a failed
/// compilation can never reach the linker. The compiled shader objects are
/// detached and deleted after successful linking, so only the program
/// handle needs to be cleaned up by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// [`RenderError::ShaderCompile`] or [`RenderError::ProgramLink`], each
/// carrying the driver's diagnostic text.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, RenderError> {
    let vs = unsafe { compile_shader(gl, ShaderStage::Vertex, vertex_src) }?;
    let fs = unsafe { compile_shader(gl, ShaderStage::Fragment, fragment_src) }?;

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(e) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(RenderError::ContextCreation(e));
            }
        };

        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(RenderError::ProgramLink(log));
        }

        // Shaders can be detached and deleted after successful linking.
        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        tracing::debug!("shader program linked");
        Ok(program)
    }
}

/// Compile a single shader stage from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// [`RenderError::ShaderCompile`] with the driver's info log on failure.
pub unsafe fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, RenderError> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_kind())
            .map_err(RenderError::ContextCreation)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(RenderError::ShaderCompile { stage, log });
        }

        Ok(shader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_maps_to_gl_kind() {
        assert_eq!(ShaderStage::Vertex.gl_kind(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_kind(), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn sources_declare_expected_interface() {
        for name in ["a_position", "a_texCoord", "u_resolution"] {
            assert!(VERTEX_SRC.contains(name), "vertex shader missing {name}");
        }
        assert!(FRAGMENT_SRC.contains("u_image"));
        assert!(FRAGMENT_SRC.contains("v_texCoord"));
    }
}
