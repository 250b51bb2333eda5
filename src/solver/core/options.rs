//! Forwarding of solver-specific options.
//!
//! Callers pass options as a string-keyed [`SolverOptions`] map.  Each
//! adapter owns a typed settings struct and maps every key it knows onto
//! a struct field through [`SettingsTarget`].  Keys that do not name a
//! field are handled according to an [`UnknownOptionPolicy`].

use super::ParamError;
use crate::algebra::{float_const, FloatT};
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Value of a forwarded solver option
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{v}"),
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Float(v) => write!(f, "{v}"),
            OptionValue::Text(v) => write!(f, "\"{v}\""),
        }
    }
}

macro_rules! impl_option_from {
    ($ty:ty, $variant:ident, $conv:ty) => {
        impl From<$ty> for OptionValue {
            fn from(v: $ty) -> Self {
                OptionValue::$variant(<$conv>::from(v))
            }
        }
    };
}
impl_option_from!(bool, Bool, bool);
impl_option_from!(i32, Int, i64);
impl_option_from!(u32, Int, i64);
impl_option_from!(i64, Int, i64);
impl_option_from!(f32, Float, f64);
impl_option_from!(f64, Float, f64);
impl_option_from!(String, Text, String);
impl_option_from!(&str, Text, String);

impl OptionValue {
    /// Interpret as a boolean.  Integers 0 / 1 are accepted since some
    /// native interfaces encode flags that way.
    pub fn to_bool(&self, key: &str) -> Result<bool, ParamError> {
        match *self {
            OptionValue::Bool(v) => Ok(v),
            OptionValue::Int(0) => Ok(false),
            OptionValue::Int(1) => Ok(true),
            _ => Err(self.bad_value(key, "a boolean")),
        }
    }

    /// Interpret as an unsigned 32 bit integer
    pub fn to_u32(&self, key: &str) -> Result<u32, ParamError> {
        match *self {
            OptionValue::Int(v) => u32::try_from(v).map_err(|_| self.bad_value(key, "an integer >= 0")),
            _ => Err(self.bad_value(key, "an integer >= 0")),
        }
    }

    /// Interpret as a signed 32 bit integer
    pub fn to_i32(&self, key: &str) -> Result<i32, ParamError> {
        match *self {
            OptionValue::Int(v) => i32::try_from(v).map_err(|_| self.bad_value(key, "an integer")),
            _ => Err(self.bad_value(key, "an integer")),
        }
    }

    /// Interpret as a float.  Integers are promoted.
    pub fn to_f64(&self, key: &str) -> Result<f64, ParamError> {
        match *self {
            OptionValue::Float(v) => Ok(v),
            OptionValue::Int(v) => Ok(v as f64),
            _ => Err(self.bad_value(key, "a number")),
        }
    }

    /// Interpret as a solver float.  Integers are promoted.
    pub fn to_float<T: FloatT>(&self, key: &str) -> Result<T, ParamError> {
        self.to_f64(key).map(float_const)
    }

    /// Interpret as a string
    pub fn to_text(&self, key: &str) -> Result<String, ParamError> {
        match self {
            OptionValue::Text(v) => Ok(v.clone()),
            _ => Err(self.bad_value(key, "a string")),
        }
    }

    fn bad_value(&self, key: &str, expected: &'static str) -> ParamError {
        ParamError::BadOptionValue {
            key: key.to_string(),
            expected,
            value: self.to_string(),
        }
    }
}

/// What to do with a forwarded option key that the solver does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnknownOptionPolicy {
    /// fail with [`ParamError::UnknownOption`]
    Reject,
    /// skip the key and log a warning naming the key and value
    Warn,
}

/// Solver-specific options forwarded verbatim to an adapter.
///
/// __Example usage__ :
///
/// ```no_run
/// use qpbridge::solver::SolverOptions;
///
/// let options = SolverOptions::new()
///     .set("max_iter", 50)
///     .set("tol_gap_abs", 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverOptions {
    /// option values by name
    pub values: BTreeMap<String, OptionValue>,
    /// overrides the adapter's default handling of unknown keys
    pub unknown_policy: Option<UnknownOptionPolicy>,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an option
    pub fn set(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Override the adapter's default handling of unknown keys
    pub fn unknown_keys(mut self, policy: UnknownOptionPolicy) -> Self {
        self.unknown_policy = Some(policy);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay every option onto a typed settings target.
    ///
    /// Returns the keys that were skipped under the `Warn` policy.
    pub fn apply_to<S: SettingsTarget>(
        &self,
        settings: &mut S,
        default_policy: UnknownOptionPolicy,
    ) -> Result<Vec<String>, ParamError> {
        let policy = self.unknown_policy.unwrap_or(default_policy);
        let mut skipped = Vec::new();

        for (key, value) in &self.values {
            if settings.set_field(key, value)? {
                continue;
            }
            match policy {
                UnknownOptionPolicy::Reject => {
                    return Err(ParamError::UnknownOption {
                        solver: S::SOLVER,
                        key: key.clone(),
                        value: value.to_string(),
                    });
                }
                UnknownOptionPolicy::Warn => {
                    log::warn!(
                        "Received an undefined {} setting {} with value {}",
                        S::SOLVER,
                        key,
                        value
                    );
                    skipped.push(key.clone());
                }
            }
        }
        Ok(skipped)
    }
}

impl<K, V> FromIterator<(K, V)> for SolverOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values,
            unknown_policy: None,
        }
    }
}

/// Typed settings struct that forwarded options can be written into.
pub trait SettingsTarget {
    /// solver name used in diagnostics
    const SOLVER: &'static str;

    /// Assign `value` to the field named `key`.
    ///
    /// Returns `Ok(false)` if no such field exists, and an error if the
    /// field exists but the value has the wrong type.
    fn set_field(&mut self, key: &str, value: &OptionValue) -> Result<bool, ParamError>;
}

/// Implements [`SettingsTarget::set_field`] as a match over field names,
/// converting each value with the given `OptionValue` accessor.
macro_rules! settings_fields {
    ($self:ident, $key:ident, $value:ident; $($field:ident => $conv:ident),* $(,)?) => {
        match $key {
            $(
                stringify!($field) => {
                    $self.$field = $value.$conv($key)?;
                    Ok(true)
                }
            )*
            _ => Ok(false),
        }
    };
}
pub(crate) use settings_fields;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestSettings {
        max_iter: u32,
        eps: f64,
        verbose: bool,
    }

    impl SettingsTarget for TestSettings {
        const SOLVER: &'static str = "test";
        fn set_field(&mut self, key: &str, value: &OptionValue) -> Result<bool, ParamError> {
            settings_fields!(self, key, value;
                max_iter => to_u32,
                eps => to_float,
                verbose => to_bool,
            )
        }
    }

    #[test]
    fn test_apply_options() {
        let options = SolverOptions::new()
            .set("max_iter", 12)
            .set("eps", 1e-3)
            .set("verbose", true);

        let mut settings = TestSettings::default();
        let skipped = options
            .apply_to(&mut settings, UnknownOptionPolicy::Reject)
            .unwrap();
        assert!(skipped.is_empty());
        assert_eq!(settings.max_iter, 12);
        assert_eq!(settings.eps, 1e-3);
        assert!(settings.verbose);
    }

    #[test]
    fn test_unknown_options() {
        let options: SolverOptions = [("foo", 1.0)].into_iter().collect();
        let mut settings = TestSettings::default();

        let err = options
            .apply_to(&mut settings, UnknownOptionPolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, ParamError::UnknownOption { ref key, .. } if key == "foo"));

        let skipped = options
            .apply_to(&mut settings, UnknownOptionPolicy::Warn)
            .unwrap();
        assert_eq!(skipped, vec!["foo".to_string()]);

        // per-call override takes precedence over the adapter default
        let options = options.unknown_keys(UnknownOptionPolicy::Warn);
        assert!(options
            .apply_to(&mut settings, UnknownOptionPolicy::Reject)
            .is_ok());
    }

    #[test]
    fn test_bad_option_value() {
        let options = SolverOptions::new().set("max_iter", -3);
        let mut settings = TestSettings::default();
        let err = options
            .apply_to(&mut settings, UnknownOptionPolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, ParamError::BadOptionValue { .. }));

        // integers promote to floats, but not the other way round
        let options = SolverOptions::new().set("eps", 2).set("verbose", "yes");
        assert!(options
            .apply_to(&mut settings, UnknownOptionPolicy::Reject)
            .is_err());
        assert_eq!(settings.eps, 2.0);
    }
}
