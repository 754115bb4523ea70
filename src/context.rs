//! Immutable wrapper around a [`glow::Context`] with extension negotiation.
//!
//! The windowing collaborator creates the native surface and GL context;
//! this module only records which of the requested capability extensions
//! the driver actually supports. The wrapper is constructed once and never
//! mutated afterwards.

use std::collections::BTreeSet;
use std::sync::Arc;

use glow::HasContext;

use crate::error::RenderError;

/// How to treat requested extensions the driver does not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// Any missing extension fails construction with
    /// [`RenderError::MissingExtensions`].
    Require,
    /// Construction succeeds; the caller checks [`GlContext::missing`]
    /// separately.
    Tolerate,
}

/// An acquired GL context plus the outcome of extension negotiation.
///
/// All fields are fixed at construction. The context itself is shared via
/// [`Arc`] so the renderer can hold it alongside the resources it creates.
pub struct GlContext {
    gl: Arc<glow::Context>,
    supported: BTreeSet<String>,
    registered: BTreeSet<String>,
    missing: Vec<String>,
}

impl GlContext {
    /// Wrap a context and attempt to register the requested extensions.
    ///
    /// # Errors
    ///
    /// With [`ExtensionPolicy::Require`], returns
    /// [`RenderError::MissingExtensions`] naming exactly the extensions the
    /// driver does not support.
    pub fn new(
        gl: Arc<glow::Context>,
        requested: &[&str],
        policy: ExtensionPolicy,
    ) -> Result<Self, RenderError> {
        let supported: BTreeSet<String> = gl.supported_extensions().iter().cloned().collect();
        let (registered, missing) = partition_extensions(requested, &supported);

        if !missing.is_empty() {
            if policy == ExtensionPolicy::Require {
                return Err(RenderError::MissingExtensions(missing));
            }
            tracing::debug!(?missing, "continuing without unsupported extensions");
        }

        Ok(Self {
            gl,
            supported,
            registered,
            missing,
        })
    }

    /// The underlying GL interface.
    #[must_use]
    pub fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    /// All extensions the driver reports as supported.
    #[must_use]
    pub fn supported(&self) -> &BTreeSet<String> {
        &self.supported
    }

    /// Whether a requested extension was successfully registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    /// Requested extensions the driver does not support. Empty unless the
    /// context was built with [`ExtensionPolicy::Tolerate`].
    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }
}

/// Split a requested extension list into (registered, missing) against the
/// driver's supported set. Order of `missing` follows the request order.
///
/// This is the negotiation step [`GlContext::new`] performs, exposed
/// separately so it can be exercised without a live driver.
#[must_use]
pub fn partition_extensions(
    requested: &[&str],
    supported: &BTreeSet<String>,
) -> (BTreeSet<String>, Vec<String>) {
    let mut registered = BTreeSet::new();
    let mut missing = Vec::new();
    for &name in requested {
        if supported.contains(name) {
            registered.insert(name.to_owned());
        } else {
            missing.push(name.to_owned());
        }
    }
    (registered, missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported() -> BTreeSet<String> {
        ["GL_ARB_debug_output", "GL_EXT_texture_filter_anisotropic"]
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn all_known_good_names_register() {
        let (registered, missing) = partition_extensions(
            &["GL_ARB_debug_output", "GL_EXT_texture_filter_anisotropic"],
            &supported(),
        );
        assert_eq!(registered.len(), 2);
        assert!(missing.is_empty());
    }

    #[test]
    fn missing_set_equals_exactly_the_bad_names() {
        let (registered, missing) = partition_extensions(
            &["GL_ARB_debug_output", "GL_FAKE_not_real", "GL_ALSO_fake"],
            &supported(),
        );
        assert!(registered.contains("GL_ARB_debug_output"));
        assert_eq!(missing, vec!["GL_FAKE_not_real", "GL_ALSO_fake"]);
    }

    #[test]
    fn empty_request_registers_nothing() {
        let (registered, missing) = partition_extensions(&[], &supported());
        assert!(registered.is_empty());
        assert!(missing.is_empty());
    }
}
