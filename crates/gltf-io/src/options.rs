use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::loader::BufferLoader;

/// Caller policy for one decode call.
///
/// ```
/// use gltf_io::DecodeOptions;
///
/// let options = DecodeOptions::new()
///     .allow_extension("KHR_materials_unlit")
///     .strict_enum_validation(false);
/// assert!(options.is_extension_allowed("KHR_materials_unlit"));
/// assert!(!options.is_strict());
/// ```
pub struct DecodeOptions {
    allowed_extensions: BTreeSet<String>,
    loader: Option<Box<dyn BufferLoader>>,
    strict_enum_validation: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            allowed_extensions: BTreeSet::new(),
            loader: None,
            strict_enum_validation: true,
            cancel: None,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `name` when it appears in `extensionsRequired`.
    pub fn allow_extension(mut self, name: impl Into<String>) -> Self {
        self.allowed_extensions.insert(name.into());
        self
    }

    pub fn allow_extensions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Installs the loader used for external buffer URIs.
    pub fn loader(mut self, loader: impl BufferLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// When `false`, out-of-domain enum codes are kept and reported as
    /// warnings instead of failing the decode.
    pub fn strict_enum_validation(mut self, strict: bool) -> Self {
        self.strict_enum_validation = strict;
        self
    }

    /// Shares a flag that aborts the decode with `Cancelled` once set.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn allowed_extensions(&self) -> &BTreeSet<String> {
        &self.allowed_extensions
    }

    pub fn is_extension_allowed(&self, name: &str) -> bool {
        self.allowed_extensions.contains(name)
    }

    pub fn is_strict(&self) -> bool {
        self.strict_enum_validation
    }

    pub fn has_loader(&self) -> bool {
        self.loader.is_some()
    }

    pub(crate) fn buffer_loader(&self) -> Option<&dyn BufferLoader> {
        self.loader.as_deref()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

impl fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("allowed_extensions", &self.allowed_extensions)
            .field("loader", &self.loader.as_ref().map(|_| "<loader>"))
            .field("strict_enum_validation", &self.strict_enum_validation)
            .field("cancel", &self.cancel)
            .finish()
    }
}
