//! Named constants applied once per context, first writer wins.

use std::collections::BTreeMap;

use serde_json::Value;

/// Constant naming the active environment.
pub const APP_ENV: &str = "APP_ENV";
/// Constant holding the debug flag.
pub const APP_DEBUG: &str = "APP_DEBUG";
/// Environment reported when [`APP_ENV`] has never been defined.
pub const DEFAULT_ENVIRONMENT: &str = "prod";

/// Constant definitions keyed by name.
pub type ConstantMap = BTreeMap<String, Value>;

/// Constants defined so far in a bootstrap context.
///
/// A name can be defined once; later definitions are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantTable {
    defined: ConstantMap,
}

impl ConstantTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `name` unless it already exists.
    ///
    /// Returns `true` when the value was stored.
    pub fn define(&mut self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        if self.defined.contains_key(&name) {
            return false;
        }
        self.defined.insert(name, value);
        true
    }

    /// Whether `name` has been defined.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains_key(name)
    }

    /// Value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.defined.get(name)
    }

    /// Effective environment name, [`DEFAULT_ENVIRONMENT`] when undefined.
    #[must_use]
    pub fn environment(&self) -> &str {
        self.get(APP_ENV)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Whether [`APP_DEBUG`] is defined as `true`.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.get(APP_DEBUG).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Iterates over defined constants in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.defined.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of defined constants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defined.len()
    }

    /// Whether no constant has been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }
}

/// Applies constant definitions to a [`ConstantTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentBootstrapper;

impl EnvironmentBootstrapper {
    /// Defines every entry of `defs` not yet present in `table`.
    ///
    /// When the effective environment (from `defs`, else from `table`) is
    /// `dev` or `test` and `defs` does not set [`APP_DEBUG`], a debug flag of
    /// `true` is added to the definitions first. No environment name is
    /// injected when none is known.
    ///
    /// Returns the number of constants newly defined.
    ///
    /// # Examples
    ///
    /// ```
    /// use appenv::{APP_DEBUG, ConstantMap, ConstantTable, EnvironmentBootstrapper};
    /// use serde_json::json;
    ///
    /// let mut table = ConstantTable::new();
    /// let defs = ConstantMap::from([(String::from("APP_ENV"), json!("dev"))]);
    /// EnvironmentBootstrapper::apply(&defs, &mut table);
    /// assert_eq!(table.get(APP_DEBUG), Some(&json!(true)));
    /// ```
    pub fn apply(defs: &ConstantMap, table: &mut ConstantTable) -> usize {
        let environment = defs
            .get(APP_ENV)
            .or_else(|| table.get(APP_ENV))
            .and_then(Value::as_str);
        let infer_debug =
            matches!(environment, Some("dev" | "test")) && !defs.contains_key(APP_DEBUG);

        let inferred = infer_debug.then(|| (APP_DEBUG, Value::Bool(true)));
        let mut applied = 0;
        for (name, value) in defs
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .chain(inferred)
        {
            if table.define(name, value) {
                applied += 1;
            } else {
                tracing::debug!(constant = name, "constant already defined; keeping first value");
            }
        }
        applied
    }
}
