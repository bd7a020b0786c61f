use gltf_core::{Extensions, Image, NormalTexture, OcclusionTexture, Sampler, Texture, TextureInfo};
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Sampler {
    const EXPECTING: &'static str = "a sampler object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut sampler = Sampler::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "magFilter" => sampler.mag_filter = obj.read_gl_enum("magFilter")?,
                "minFilter" => sampler.min_filter = obj.read_gl_enum("minFilter")?,
                "wrapS" => sampler.wrap_s = obj.read_gl_enum("wrapS")?,
                "wrapT" => sampler.wrap_t = obj.read_gl_enum("wrapT")?,
                "name" => sampler.name = obj.read()?,
                "extensions" => sampler.extensions = obj.read_extensions()?,
                "extras" => sampler.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(sampler)
    }
}

impl DecodeObject for Image {
    const EXPECTING: &'static str = "an image object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut image = Image::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "uri" => image.uri = obj.read()?,
                "mimeType" => image.mime_type = obj.read()?,
                "bufferView" => image.buffer_view = obj.read_optional_index()?,
                "name" => image.name = obj.read()?,
                "extensions" => image.extensions = obj.read_extensions()?,
                "extras" => image.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(image)
    }
}

impl DecodeObject for Texture {
    const EXPECTING: &'static str = "a texture object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut texture = Texture::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "sampler" => texture.sampler = obj.read_optional_index()?,
                "source" => texture.source = obj.read_optional_index()?,
                "name" => texture.name = obj.read()?,
                "extensions" => texture.extensions = obj.read_extensions()?,
                "extras" => texture.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(texture)
    }
}

impl DecodeObject for TextureInfo {
    const EXPECTING: &'static str = "a texture info object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut index = None;
        let mut tex_coord = 0;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "index" => index = Some(obj.read_index()?),
                "texCoord" => tex_coord = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(TextureInfo {
            index: index.ok_or_else(|| obj.missing("index"))?,
            tex_coord,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for NormalTexture {
    const EXPECTING: &'static str = "a normal texture info object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut index = None;
        let mut tex_coord = 0;
        let mut scale = 1.0;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "index" => index = Some(obj.read_index()?),
                "texCoord" => tex_coord = obj.read()?,
                "scale" => scale = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(NormalTexture {
            index: index.ok_or_else(|| obj.missing("index"))?,
            tex_coord,
            scale,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for OcclusionTexture {
    const EXPECTING: &'static str = "an occlusion texture info object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut index = None;
        let mut tex_coord = 0;
        let mut strength = 1.0;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "index" => index = Some(obj.read_index()?),
                "texCoord" => tex_coord = obj.read()?,
                "strength" => strength = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(OcclusionTexture {
            index: index.ok_or_else(|| obj.missing("index"))?,
            tex_coord,
            strength,
            extensions,
            extras,
        })
    }
}
