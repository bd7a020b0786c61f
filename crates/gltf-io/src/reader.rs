//! Token stream reader.
//!
//! A thin adapter over `serde_json`'s streaming deserializer. Entity
//! decoders never see a JSON tree: they pull one property name at a time
//! from an [`ObjectReader`], decode the typed value they expect for it, and
//! hand anything they do not recognize to [`ObjectReader::skip`], which
//! consumes one value of arbitrary shape.
//!
//! Semantic failures (missing fields, bad enum codes) are raised from inside
//! serde visitors, so they are parked in the per-parse [`Context`] and the
//! visitor returns an opaque serde error. Once the tokenizer unwinds,
//! [`Context::into_error`] swaps the parked error back in and stamps it with
//! the tokenizer's line and column.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use gltf_core::{Attributes, Coded, CodedEnum, Extensions, Extras, Index};
use serde::de::{self, Deserialize, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::error::Category;

use crate::error::{GltfError, Location};
use crate::warning::{Warning, WarningKind};

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

fn render_path(segments: &[Segment], tail: Option<&str>) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    if let Some(key) = tail {
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(key);
    }
    out
}

/// Per-parse decoding state: policy, JSON path, warnings and the parked
/// failure, if any.
pub(crate) struct Context {
    strict_enums: bool,
    path: Vec<Segment>,
    warnings: Vec<Warning>,
    failure: Option<GltfError>,
    failure_path: Option<String>,
}

impl Context {
    pub fn new(strict_enums: bool) -> Self {
        Self {
            strict_enums,
            path: Vec::new(),
            warnings: Vec::new(),
            failure: None,
            failure_path: None,
        }
    }

    /// Current JSON path, e.g. `meshes[0].primitives[1]`.
    pub fn path(&self) -> String {
        render_path(&self.path, None)
    }

    pub fn warn(&mut self, kind: WarningKind) {
        let warning = Warning {
            path: self.path(),
            kind,
        };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Parks `err` and returns a serde error that aborts the tokenizer.
    fn fail<E: de::Error>(&mut self, err: GltfError) -> E {
        let unwinding = E::custom(&err);
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        unwinding
    }

    /// Remembers where a tokenizer error surfaced. The innermost reader
    /// records first and wins.
    fn note_error_path(&mut self, key: Option<&str>) {
        if self.failure_path.is_none() {
            self.failure_path = Some(render_path(&self.path, key));
        }
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    /// Converts a tokenizer error into the decoder's error type.
    pub fn into_error(self, err: serde_json::Error) -> GltfError {
        let location = Location {
            line: err.line(),
            column: err.column(),
        };
        if let Some(failure) = self.failure {
            return failure.with_location(location);
        }
        match err.classify() {
            Category::Io => GltfError::Io(err.into()),
            Category::Syntax | Category::Eof => GltfError::MalformedJson {
                location,
                message: bare_message(&err),
            },
            Category::Data => GltfError::InvalidFieldValue {
                path: self.failure_path.unwrap_or_default(),
                message: bare_message(&err),
                location: Some(location),
            },
        }
    }
}

/// The tokenizer's message without its trailing position.
fn bare_message(err: &serde_json::Error) -> String {
    let message = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match message.strip_suffix(&suffix) {
        Some(bare) => bare.to_string(),
        None => message,
    }
}

/// A glTF object that is decoded property by property.
pub(crate) trait DecodeObject: Sized {
    /// Shown by the tokenizer when the value is not an object.
    const EXPECTING: &'static str;

    /// Consumes property/value pairs until the end of the object.
    fn decode<'de, A: MapAccess<'de>>(obj: &mut ObjectReader<'de, '_, A>)
        -> Result<Self, A::Error>;
}

/// Cursor over the properties of one JSON object.
pub(crate) struct ObjectReader<'de, 'c, A> {
    map: A,
    ctx: &'c mut Context,
    key: Option<String>,
    marker: PhantomData<&'de ()>,
}

impl<'de, 'c, A: MapAccess<'de>> ObjectReader<'de, 'c, A> {
    /// Advances to the next property name, or `None` at the closing brace.
    pub fn next_property(&mut self) -> Result<Option<String>, A::Error> {
        self.key = self.map.next_key::<String>()?;
        Ok(self.key.clone())
    }

    /// Decodes the current property's value as a plain serde type.
    pub fn read<T: Deserialize<'de>>(&mut self) -> Result<T, A::Error> {
        match self.map.next_value() {
            Ok(value) => Ok(value),
            Err(err) => {
                self.ctx.note_error_path(self.key.as_deref());
                Err(err)
            }
        }
    }

    pub fn read_index<T>(&mut self) -> Result<Index<T>, A::Error> {
        self.read::<u32>().map(Index::new)
    }

    /// Reads a reference that may be absent; JSON `null` counts as absent.
    pub fn read_optional_index<T>(&mut self) -> Result<Option<Index<T>>, A::Error> {
        Ok(self.read::<Option<u32>>()?.map(Index::new))
    }

    pub fn read_indices<T>(&mut self) -> Result<Vec<Index<T>>, A::Error> {
        Ok(self.read::<Vec<u32>>()?.into_iter().map(Index::new).collect())
    }

    pub fn read_attributes(&mut self) -> Result<Attributes, A::Error> {
        self.read().map(to_attributes)
    }

    /// Reads a list of attribute maps, as used by morph targets.
    pub fn read_attribute_sets(&mut self) -> Result<Vec<Attributes>, A::Error> {
        let raw: Vec<BTreeMap<String, u32>> = self.read()?;
        Ok(raw.into_iter().map(to_attributes).collect())
    }

    pub fn read_extensions(&mut self) -> Result<Extensions, A::Error> {
        self.read()
    }

    pub fn read_extras(&mut self) -> Result<Extras, A::Error> {
        self.read::<serde_json::Value>().map(Some)
    }

    /// Decodes the current property's value as a nested glTF object.
    pub fn read_object<T: DecodeObject>(&mut self) -> Result<T, A::Error> {
        self.enter();
        let value = self.map.next_value_seed(ObjectSeed::<T>::new(&mut *self.ctx));
        self.leave(value.is_ok());
        value
    }

    /// Decodes the current property's value as an array of glTF objects.
    pub fn read_array<T: DecodeObject>(&mut self) -> Result<Vec<T>, A::Error> {
        self.enter();
        let value = self.map.next_value_seed(ArraySeed::<T>::new(&mut *self.ctx));
        self.leave(value.is_ok());
        value
    }

    /// Decodes a WebGL integer enum.
    ///
    /// Numbers that are not a `u32` (negative, fractional or too large) can
    /// never be a GL enum and are rejected regardless of the enum policy.
    pub fn read_gl_enum<E>(&mut self, field: &'static str) -> Result<Coded<E>, A::Error>
    where
        E: CodedEnum<Code = u32>,
    {
        let raw: serde_json::Number = self.read()?;
        match raw.as_u64().and_then(|code| u32::try_from(code).ok()) {
            Some(code) => self.check_enum(field, code),
            None => Err(self.fail_enum::<E>(field, raw.to_string())),
        }
    }

    /// Decodes a string enum.
    pub fn read_str_enum<E>(&mut self, field: &'static str) -> Result<Coded<E>, A::Error>
    where
        E: CodedEnum<Code = String>,
    {
        let code: String = self.read()?;
        self.check_enum(field, code)
    }

    fn check_enum<E: CodedEnum>(
        &mut self,
        field: &'static str,
        code: E::Code,
    ) -> Result<Coded<E>, A::Error> {
        if let Some(known) = E::from_code(&code) {
            return Ok(Coded::Known(known));
        }
        if self.ctx.strict_enums {
            return Err(self.fail_enum::<E>(field, code.to_string()));
        }
        self.ctx.warn(WarningKind::UnknownEnumValue {
            field,
            value: code.to_string(),
        });
        Ok(Coded::Unknown(code))
    }

    fn fail_enum<E: CodedEnum>(&mut self, field: &'static str, value: String) -> A::Error {
        let path = self.ctx.path();
        self.ctx.fail(GltfError::InvalidEnumValue {
            path,
            field,
            domain: E::DOMAIN,
            value,
            location: None,
        })
    }

    /// Skips the current property's value, whatever its shape.
    pub fn skip(&mut self) -> Result<(), A::Error> {
        if let Some(key) = self.key.clone() {
            self.ctx.warn(WarningKind::UnknownProperty(key));
        }
        self.read::<IgnoredAny>()?;
        Ok(())
    }

    /// Error for a required field that never appeared in this object.
    pub fn missing(&mut self, field: &'static str) -> A::Error {
        let path = self.ctx.path();
        self.ctx.fail(GltfError::MissingRequiredField {
            path,
            field,
            location: None,
        })
    }

    /// Error for a value that is well-formed JSON but not acceptable.
    pub fn invalid(&mut self, message: impl Into<String>) -> A::Error {
        let path = render_path(&self.ctx.path, self.key.as_deref());
        self.ctx.fail(GltfError::invalid(path, message))
    }

    fn enter(&mut self) {
        let key = self.key.clone().unwrap_or_default();
        self.ctx.path.push(Segment::Key(key));
    }

    fn leave(&mut self, ok: bool) {
        if ok {
            self.ctx.path.pop();
        } else {
            self.ctx.note_error_path(None);
        }
    }
}

fn to_attributes(raw: BTreeMap<String, u32>) -> Attributes {
    raw.into_iter()
        .map(|(semantic, index)| (semantic, Index::new(index)))
        .collect()
}

/// Seed decoding one [`DecodeObject`] with access to the parse context.
pub(crate) struct ObjectSeed<'c, T> {
    ctx: &'c mut Context,
    marker: PhantomData<fn() -> T>,
}

impl<'c, T> ObjectSeed<'c, T> {
    pub fn new(ctx: &'c mut Context) -> Self {
        Self {
            ctx,
            marker: PhantomData,
        }
    }
}

impl<'de, T: DecodeObject> DeserializeSeed<'de> for ObjectSeed<'_, T> {
    type Value = T;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<T, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de, T: DecodeObject> Visitor<'de> for ObjectSeed<'_, T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(T::EXPECTING)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
        let mut reader = ObjectReader {
            map,
            ctx: self.ctx,
            key: None,
            marker: PhantomData,
        };
        T::decode(&mut reader)
    }
}

/// Seed decoding a JSON array of [`DecodeObject`]s in source order.
struct ArraySeed<'c, T> {
    ctx: &'c mut Context,
    marker: PhantomData<fn() -> T>,
}

impl<'c, T> ArraySeed<'c, T> {
    fn new(ctx: &'c mut Context) -> Self {
        Self {
            ctx,
            marker: PhantomData,
        }
    }
}

impl<'de, T: DecodeObject> DeserializeSeed<'de> for ArraySeed<'_, T> {
    type Value = Vec<T>;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Vec<T>, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, T: DecodeObject> Visitor<'de> for ArraySeed<'_, T> {
    type Value = Vec<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an array of {}s", T::EXPECTING)
    }

    fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Vec<T>, S::Error> {
        let ctx = self.ctx;
        let mut items = Vec::new();
        loop {
            ctx.path.push(Segment::Index(items.len()));
            let next = seq.next_element_seed(ObjectSeed::<T>::new(&mut *ctx));
            let next = match next {
                Ok(next) => next,
                Err(err) => {
                    ctx.note_error_path(None);
                    return Err(err);
                }
            };
            ctx.path.pop();
            match next {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }
}

/// Decodes one top-level JSON object of type `T` from `json`.
///
/// Trailing non-whitespace input after the object is a syntax error.
pub(crate) fn decode_slice<T: DecodeObject>(
    json: &[u8],
    strict_enums: bool,
) -> Result<(T, Vec<Warning>), GltfError> {
    let mut ctx = Context::new(strict_enums);
    let mut deserializer = serde_json::Deserializer::from_slice(json);
    let result = ObjectSeed::<T>::new(&mut ctx)
        .deserialize(&mut deserializer)
        .and_then(|value| deserializer.end().map(|()| value));
    match result {
        Ok(value) => Ok((value, ctx.into_warnings())),
        Err(err) => Err(ctx.into_error(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal object used to exercise the reader in isolation.
    #[derive(Debug, Default)]
    struct Probe {
        count: u32,
        children: Vec<Probe>,
    }

    impl DecodeObject for Probe {
        const EXPECTING: &'static str = "a probe object";

        fn decode<'de, A: MapAccess<'de>>(
            obj: &mut ObjectReader<'de, '_, A>,
        ) -> Result<Self, A::Error> {
            let mut count = None;
            let mut children = Vec::new();
            while let Some(key) = obj.next_property()? {
                match key.as_str() {
                    "count" => count = Some(obj.read()?),
                    "children" => children = obj.read_array()?,
                    _ => obj.skip()?,
                }
            }
            let count = count.ok_or_else(|| obj.missing("count"))?;
            Ok(Probe { count, children })
        }
    }

    #[test]
    fn test_skips_values_of_any_shape() {
        let json = br#"{
            "a": {"deep": [1, {"x": [true, null, "s"]}]},
            "count": 3,
            "b": [[], {}, -1.5e3],
            "c": "text"
        }"#;
        let (probe, warnings) = decode_slice::<Probe>(json, true).unwrap();
        assert_eq!(probe.count, 3);
        let skipped: Vec<_> = warnings
            .iter()
            .map(|w| match &w.kind {
                WarningKind::UnknownProperty(name) => name.as_str(),
                other => panic!("unexpected warning {:?}", other),
            })
            .collect();
        assert_eq!(skipped, ["a", "b", "c"]);
    }

    #[test]
    fn test_missing_field_reports_path() {
        let json = br#"{"count": 1, "children": [{"count": 2}, {"other": 5}]}"#;
        let err = decode_slice::<Probe>(json, true).unwrap_err();
        match err {
            GltfError::MissingRequiredField { path, field, location } => {
                assert_eq!(path, "children[1]");
                assert_eq!(field, "count");
                assert!(location.is_some());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_is_invalid_field_value() {
        let json = br#"{"count": 1, "children": [{"count": "two"}]}"#;
        let err = decode_slice::<Probe>(json, true).unwrap_err();
        match err {
            GltfError::InvalidFieldValue { path, location, .. } => {
                assert_eq!(path, "children[0].count");
                assert_eq!(location.map(|l| l.line), Some(1));
            }
            other => panic!("unexpected error {:?}", other),
        }

        let json = br#"{"count": 1, "children": [7]}"#;
        let err = decode_slice::<Probe>(json, true).unwrap_err();
        match err {
            GltfError::InvalidFieldValue { path, message, .. } => {
                assert_eq!(path, "children[0]");
                assert!(message.contains("a probe object"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_syntax_errors_are_malformed_json() {
        for json in [
            &br#"{"count": 1,"#[..],
            &br#"{"count": 1} trailing"#[..],
            &br#"{"count": tru}"#[..],
            &b""[..],
        ] {
            match decode_slice::<Probe>(json, true) {
                Err(GltfError::MalformedJson { .. }) => {}
                other => panic!("expected malformed JSON, got {:?}", other.map(|(p, _)| p)),
            }
        }
    }

    #[test]
    fn test_render_path() {
        let segments = [
            Segment::Key("meshes".into()),
            Segment::Index(2),
            Segment::Key("primitives".into()),
            Segment::Index(0),
        ];
        assert_eq!(render_path(&segments, None), "meshes[2].primitives[0]");
        assert_eq!(
            render_path(&segments, Some("indices")),
            "meshes[2].primitives[0].indices"
        );
        assert_eq!(render_path(&[], Some("asset")), "asset");
    }
}
