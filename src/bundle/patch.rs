//! JSON overrides applied to a finished configuration.
//!
//! A patch is merged object-by-object into the serialized configuration. Every
//! key in the patch must already exist at the same place in the configuration,
//! so a misspelled key fails loudly instead of being ignored.

use crate::bundle::{BuildConfiguration, Variant};
use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use tracing::debug;

pub fn apply_patch(
    base: &BuildConfiguration,
    variant: Variant,
    patch: &Value,
) -> ConfigResult<BuildConfiguration> {
    let mut target = serde_json::to_value(base)
        .map_err(|source| ConfigError::InvalidOverride { variant, source })?;

    merge(&mut target, patch, variant, "")?;

    let patched: BuildConfiguration = serde_json::from_value(target)
        .map_err(|source| ConfigError::InvalidOverride { variant, source })?;

    debug!("Applied override to '{}': {}", variant, patch);
    Ok(patched)
}

fn merge(target: &mut Value, patch: &Value, variant: Variant, path: &str) -> ConfigResult<()> {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                let key_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let slot = target.get_mut(key).ok_or_else(|| ConfigError::UnknownKey {
                    variant,
                    path: key_path.clone(),
                })?;
                merge(slot, value, variant, &key_path)?;
            }
            Ok(())
        }
        (target, patch) => {
            *target = patch.clone();
            Ok(())
        }
    }
}
