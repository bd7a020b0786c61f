use std::fmt;

/// A non-fatal observation made while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// JSON path of the object the warning is about (empty for the root).
    pub path: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// A property the decoder does not recognize was skipped.
    UnknownProperty(String),
    /// An enum code outside its domain was kept as-is.
    UnknownEnumValue { field: &'static str, value: String },
    /// An entry of `extensionsRequired` is missing from `extensionsUsed`.
    UndeclaredRequiredExtension(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        match &self.kind {
            WarningKind::UnknownProperty(name) => {
                write!(f, "{}: skipped unknown property `{}`", path, name)
            }
            WarningKind::UnknownEnumValue { field, value } => {
                write!(f, "{}: kept unknown value {} for `{}`", path, value, field)
            }
            WarningKind::UndeclaredRequiredExtension(name) => write!(
                f,
                "{}: required extension `{}` is not listed in extensionsUsed",
                path, name
            ),
        }
    }
}
