use gltf_core::Asset;
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Asset {
    const EXPECTING: &'static str = "an asset object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut version = None;
        let mut asset = Asset::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "version" => version = Some(obj.read()?),
                "minVersion" => asset.min_version = obj.read()?,
                "generator" => asset.generator = obj.read()?,
                "copyright" => asset.copyright = obj.read()?,
                "extensions" => asset.extensions = obj.read_extensions()?,
                "extras" => asset.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        asset.version = version.ok_or_else(|| obj.missing("version"))?;
        Ok(asset)
    }
}
