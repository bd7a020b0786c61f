use gltf_core::{
    Animation, AnimationSampler, Channel, Coded, Extensions, Interpolation, Target,
};
use serde::de::MapAccess;

use crate::reader::{DecodeObject, ObjectReader};

impl DecodeObject for Animation {
    const EXPECTING: &'static str = "an animation object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut channels = None;
        let mut samplers = None;
        let mut animation = Animation::default();
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "channels" => channels = Some(obj.read_array()?),
                "samplers" => samplers = Some(obj.read_array()?),
                "name" => animation.name = obj.read()?,
                "extensions" => animation.extensions = obj.read_extensions()?,
                "extras" => animation.extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        animation.channels = channels.ok_or_else(|| obj.missing("channels"))?;
        animation.samplers = samplers.ok_or_else(|| obj.missing("samplers"))?;
        Ok(animation)
    }
}

impl DecodeObject for Channel {
    const EXPECTING: &'static str = "an animation channel object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut sampler = None;
        let mut target = None;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "sampler" => sampler = Some(obj.read_index()?),
                "target" => target = Some(obj.read_object()?),
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(Channel {
            sampler: sampler.ok_or_else(|| obj.missing("sampler"))?,
            target: target.ok_or_else(|| obj.missing("target"))?,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for Target {
    const EXPECTING: &'static str = "an animation target object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut node = None;
        let mut path = None;
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "node" => node = obj.read_optional_index()?,
                "path" => path = Some(obj.read_str_enum("path")?),
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(Target {
            node,
            path: path.ok_or_else(|| obj.missing("path"))?,
            extensions,
            extras,
        })
    }
}

impl DecodeObject for AnimationSampler {
    const EXPECTING: &'static str = "an animation sampler object";

    fn decode<'de, A: MapAccess<'de>>(
        obj: &mut ObjectReader<'de, '_, A>,
    ) -> Result<Self, A::Error> {
        let mut input = None;
        let mut output = None;
        let mut interpolation: Coded<Interpolation> = Interpolation::Linear.into();
        let mut extensions = Extensions::new();
        let mut extras = None;
        while let Some(key) = obj.next_property()? {
            match key.as_str() {
                "input" => input = Some(obj.read_index()?),
                "output" => output = Some(obj.read_index()?),
                "interpolation" => interpolation = obj.read_str_enum("interpolation")?,
                "extensions" => extensions = obj.read_extensions()?,
                "extras" => extras = obj.read_extras()?,
                _ => obj.skip()?,
            }
        }
        Ok(AnimationSampler {
            input: input.ok_or_else(|| obj.missing("input"))?,
            interpolation,
            output: output.ok_or_else(|| obj.missing("output"))?,
            extensions,
            extras,
        })
    }
}
