use gltf_core::{Camera, Extensions, Orthographic, Perspective};
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Camera {
    const EXPECTING: &'static str = "a camera object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut camera_type = None;
        let mut perspective = None;
        let mut orthographic = None;
        let mut name = None;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "type" => camera_type = Some(obj.read_str_enum("type")?),
                "perspective" => perspective = Some(obj.read_object()?),
                "orthographic" => orthographic = Some(obj.read_object()?),
                "name" => name = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(Camera {
            camera_type: camera_type.ok_or_else(|| obj.missing("type"))?,
            perspective,
            orthographic,
            name,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for Perspective {
    const EXPECTING: &'static str = "a perspective projection object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut yfov = None;
        let mut znear = None;
        let mut aspect_ratio = None;
        let mut zfar = None;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "yfov" => yfov = Some(obj.read()?),
                "znear" => znear = Some(obj.read()?),
                "aspectRatio" => aspect_ratio = obj.read()?,
                "zfar" => zfar = obj.read()?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(Perspective {
            aspect_ratio,
            yfov: yfov.ok_or_else(|| obj.missing("yfov"))?,
            zfar,
            znear: znear.ok_or_else(|| obj.missing("znear"))?,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for Orthographic {
    const EXPECTING: &'static str = "an orthographic projection object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut xmag = None;
        let mut ymag = None;
        let mut zfar = None;
        let mut znear = None;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "xmag" => xmag = Some(obj.read()?),
                "ymag" => ymag = Some(obj.read()?),
                "zfar" => zfar = Some(obj.read()?),
                "znear" => znear = Some(obj.read()?),
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(Orthographic {
            xmag: xmag.ok_or_else(|| obj.missing("xmag"))?,
            ymag: ymag.ok_or_else(|| obj.missing("ymag"))?,
            zfar: zfar.ok_or_else(|| obj.missing("zfar"))?,
            znear: znear.ok_or_else(|| obj.missing("znear"))?,
            extensions,
            extras,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::testing::strict;
    use crate::error::GltfError;
    use gltf_core::CameraType;

    #[test]
    fn test_perspective_camera() {
        let camera: Camera = strict(
            r#"{"type": "perspective", "perspective": {"yfov": 0.8, "znear": 0.01, "aspectRatio": 1.5}}"#,
        )
        .unwrap();
        assert_eq!(camera.camera_type, CameraType::Perspective);
        let perspective = camera.perspective.unwrap();
        assert_eq!(perspective.yfov, 0.8);
        assert_eq!(perspective.aspect_ratio, Some(1.5));
        assert_eq!(perspective.zfar, None);
        assert!(camera.orthographic.is_none());
    }

    #[test]
    fn test_orthographic_requires_all_extents() {
        let err = strict::<Camera>(
            r#"{"type": "orthographic", "orthographic": {"xmag": 1, "ymag": 1, "znear": 0}}"#,
        )
        .unwrap_err();
        match err {
            GltfError::MissingRequiredField { path, field, .. } => {
                assert_eq!(path, "orthographic");
                assert_eq!(field, "zfar");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
