//! Deep merging of configuration structures.

use serde_json::{Map, Value};

use crate::ConfigMap;

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Behaviour:
/// - When merging an object into a non-object target, the target becomes
///   `{}` first.
/// - Objects merge recursively: keys are added or overwritten and nested
///   objects are overlaid.
/// - Arrays and scalars replace `target` wholesale.
///
/// # Examples
///
/// ```rust
/// use appenv::merge_value;
/// use serde_json::json;
///
/// let mut acc = json!({"a": 1, "b": {"x": 1}});
/// merge_value(&mut acc, json!({"b": {"y": 2}, "c": 3}));
/// assert_eq!(acc, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
///
/// merge_value(&mut acc, json!({"b": [1, 2, 3]}));
/// assert_eq!(acc["b"], json!([1, 2, 3]));
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Object(map) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(target_map) = target {
                merge_maps(target_map, map);
            }
        }
        _ => *target = layer,
    }
}

/// Overlay the entries of `layer` onto `target`.
pub fn merge_maps(target: &mut ConfigMap, layer: ConfigMap) {
    for (key, value) in layer {
        match target.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

/// Left fold of configuration structures, later entries winning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges `structures` in order.
    ///
    /// A single structure is returned unchanged; an empty sequence yields an
    /// empty mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use appenv::{ConfigMap, ConfigMerger};
    /// use serde_json::json;
    ///
    /// let a: ConfigMap = serde_json::from_value(json!({"id": "x"}))?;
    /// let b: ConfigMap = serde_json::from_value(json!({"id": "y", "extra": 1}))?;
    /// let merged = ConfigMerger::merge([a, b]);
    /// assert_eq!(serde_json::Value::Object(merged), json!({"id": "y", "extra": 1}));
    /// # Ok::<_, serde_json::Error>(())
    /// ```
    #[must_use]
    pub fn merge<I>(structures: I) -> ConfigMap
    where
        I: IntoIterator<Item = ConfigMap>,
    {
        let mut iter = structures.into_iter();
        let Some(mut acc) = iter.next() else {
            return ConfigMap::new();
        };
        for layer in iter {
            merge_maps(&mut acc, layer);
        }
        acc
    }
}
