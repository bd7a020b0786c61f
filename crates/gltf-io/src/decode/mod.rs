//! Entity decoders.
//!
//! One [`DecodeObject`](crate::reader::DecodeObject) implementation per
//! entity kind and per nested object type. Each decoder walks the object's
//! properties in source order, fills required fields into locals and
//! defaulted fields directly into the value, and skips everything it does
//! not recognize.

mod accessor;
mod animation;
mod asset;
mod buffer;
mod camera;
mod material;
mod mesh;
mod scene;
mod texture;

#[cfg(test)]
pub(crate) mod testing {
    use crate::error::GltfError;
    use crate::reader::{decode_slice, DecodeObject};
    use crate::warning::Warning;

    pub fn strict<T: DecodeObject>(json: &str) -> Result<T, GltfError> {
        decode_slice::<T>(json.as_bytes(), true).map(|(value, _)| value)
    }

    pub fn lenient<T: DecodeObject>(json: &str) -> Result<(T, Vec<Warning>), GltfError> {
        decode_slice::<T>(json.as_bytes(), false)
    }
}
