//! Errors produced while decoding a glTF document.
//!
//! Every variant is fatal: a decode either yields a fully validated
//! [`Document`](crate::Document) or one of these errors, never both.

use std::fmt;
use std::io;

use gltf_core::EntityKind;
use thiserror::Error;

/// Position in the JSON text, as reported by the tokenizer (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Renders an optional location as a `" (line x, column y)"` suffix.
struct At<'a>(&'a Option<Location>);

impl fmt::Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(location) => write!(f, " ({})", location),
            None => Ok(()),
        }
    }
}

/// Renders a JSON path, using `<root>` for the top-level object.
struct Path<'a>(&'a str);

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(self.0)
        }
    }
}

/// Renders the entity holding a reference, e.g. `mesh 2`.
struct Owner<'a>(&'a Option<(EntityKind, usize)>);

impl fmt::Display for Owner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((kind, index)) => write!(f, "{} {}", kind, index),
            None => f.write_str("<root>"),
        }
    }
}

/// Errors that can occur when decoding glTF or GLB data.
#[derive(Error, Debug)]
pub enum GltfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON at {location}: {message}")]
    MalformedJson { location: Location, message: String },

    #[error("{}: missing required field `{field}`{}", Path(.path), At(.location))]
    MissingRequiredField {
        path: String,
        field: &'static str,
        location: Option<Location>,
    },

    #[error("{}: invalid value {value} for `{field}` ({domain}){}", Path(.path), At(.location))]
    InvalidEnumValue {
        path: String,
        field: &'static str,
        domain: &'static str,
        value: String,
        location: Option<Location>,
    },

    #[error("{}: {message}{}", Path(.path), At(.location))]
    InvalidFieldValue {
        path: String,
        message: String,
        location: Option<Location>,
    },

    #[error("{}: `{field}` refers to {target}[{value}], which does not exist", Owner(.owner))]
    DanglingReference {
        /// Referring entity, or `None` for the root object.
        owner: Option<(EntityKind, usize)>,
        field: String,
        target: &'static str,
        value: u32,
    },

    #[error("Node {node} is its own ancestor")]
    CyclicHierarchy { node: usize },

    #[error("Node {node} has more than one parent (nodes {first} and {second})")]
    MultipleParents {
        node: usize,
        first: usize,
        second: usize,
    },

    #[error("Required extension `{0}` is not supported")]
    UnsupportedExtension(String),

    #[error("Unsupported asset version `{0}`")]
    UnsupportedVersion(String),

    #[error("Invalid GLB: {0}")]
    InvalidContainerFormat(String),

    #[error("Buffer {index} ({source_name}) is unavailable: {reason}")]
    BufferUnavailable {
        index: usize,
        source_name: String,
        reason: String,
    },

    #[error("Decoding was cancelled")]
    Cancelled,
}

impl GltfError {
    /// Returns the JSON location attached to this error, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            GltfError::MalformedJson { location, .. } => Some(*location),
            GltfError::MissingRequiredField { location, .. }
            | GltfError::InvalidEnumValue { location, .. }
            | GltfError::InvalidFieldValue { location, .. } => *location,
            _ => None,
        }
    }

    /// Attaches a JSON location to a decode-time error that lacks one.
    pub(crate) fn with_location(mut self, at: Location) -> Self {
        match &mut self {
            GltfError::MissingRequiredField { location, .. }
            | GltfError::InvalidEnumValue { location, .. }
            | GltfError::InvalidFieldValue { location, .. } => {
                location.get_or_insert(at);
            }
            _ => {}
        }
        self
    }

    pub(crate) fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        GltfError::InvalidFieldValue {
            path: path.into(),
            message: message.into(),
            location: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GltfError>;
