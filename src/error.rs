//! Error taxonomy for the renderer.
//!
//! Every failure class is fatal to the draw attempt: nothing is retried,
//! nothing is recovered locally, and every error surfaces to the caller.

use crate::shaders::ShaderStage;

/// Errors produced while setting up GL state or drawing the image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A GL object (buffer, VAO, texture, shader, program) could not be
    /// created. Usually means the context is lost or invalid.
    #[error("GL resource creation failed: {0}")]
    ContextCreation(String),

    /// One or more requested GL extensions are not supported by the driver.
    ///
    /// Carries exactly the names that failed to register.
    #[error("these extensions could not be registered: {0:?}")]
    MissingExtensions(Vec<String>),

    /// A shader stage failed to compile. Carries the driver's info log.
    #[error("{stage} shader compile error: {log}")]
    ShaderCompile {
        /// Which stage failed.
        stage: ShaderStage,
        /// Compiler diagnostic text from the driver.
        log: String,
    },

    /// The shader program failed to link. Carries the driver's info log.
    #[error("program link error: {0}")]
    ProgramLink(String),

    /// An attribute named in the setup code is absent from the linked
    /// program. Indicates a mismatch between shader source and lookup code.
    #[error("attribute [{0}] is not found")]
    MissingAttribute(String),

    /// A uniform named in the setup code is absent from the linked program.
    #[error("uniform [{0}] is not found")]
    MissingUniform(String),

    /// The image bytes could not be decoded.
    #[error("image decode failed: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Raw pixel data does not match the declared dimensions.
    #[error("pixel data length {len} does not match {width}x{height} RGBA")]
    InvalidImageData {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Actual byte length supplied.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_extensions_lists_names() {
        let err = RenderError::MissingExtensions(vec!["GL_FAKE_ext".into()]);
        let msg = err.to_string();
        assert!(msg.contains("GL_FAKE_ext"));
        assert!(msg.contains("could not be registered"));
    }

    #[test]
    fn shader_compile_error_carries_stage_and_log() {
        let err = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fragment"));
        assert!(msg.contains("syntax error"));
    }

    #[test]
    fn invalid_image_data_reports_dimensions() {
        let err = RenderError::InvalidImageData {
            width: 4,
            height: 3,
            len: 7,
        };
        assert_eq!(
            err.to_string(),
            "pixel data length 7 does not match 4x3 RGBA"
        );
    }
}
