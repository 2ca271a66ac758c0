//! Parameter type descriptors: a default value plus the string conversion
//! rules for one configuration field.
//!
//! Every variant guarantees `from_string(to_string(v)) == v` for valid `v`,
//! with one exception: [`Object`] is an identity passthrough that by contract
//! never appears in persisted text.

use crate::base::Base;
use crate::error::{ConfigError, Result};
use crate::literal;
use crate::value::Value;

/// One configuration field's type: default value and string conversion.
///
/// The `_brick` forms let a parameter consult the owning entity during
/// conversion; the defaults ignore it. Domain-specific parameters (socket
/// lookups etc.) override them.
pub trait Parameter {
    fn default_value(&self) -> Value;

    fn from_string(&self, text: &str) -> Result<Value>;

    fn to_string(&self, value: &Value) -> Result<String>;

    fn from_string_brick(&self, text: &str, _brick: &Base) -> Result<Value> {
        self.from_string(text)
    }

    fn to_string_brick(&self, value: &Value, _brick: &Base) -> Result<String> {
        self.to_string(value)
    }
}

/// Decimal integer parameter.
pub struct Integer {
    default: i64,
}

impl Integer {
    pub fn new(default: i64) -> Self {
        Self { default }
    }
}

impl Parameter for Integer {
    fn default_value(&self) -> Value {
        Value::Integer(self.default)
    }

    fn from_string(&self, text: &str) -> Result<Value> {
        text.trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| ConfigError::parse("integer", text))
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        Ok(value.expect_integer()?.to_string())
    }
}

/// Floating point parameter. The textual form is Rust's shortest
/// round-trip representation, not a display-rounded one.
pub struct Float {
    default: f64,
}

impl Float {
    pub fn new(default: f64) -> Self {
        Self { default }
    }
}

impl Parameter for Float {
    fn default_value(&self) -> Value {
        Value::Float(self.default)
    }

    fn from_string(&self, text: &str) -> Result<Value> {
        text.trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ConfigError::parse("float", text))
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        Ok(value.expect_float()?.to_string())
    }
}

/// Plain string parameter, identity conversion.
pub struct Str {
    default: String,
}

impl Str {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
        }
    }
}

impl Parameter for Str {
    fn default_value(&self) -> Value {
        Value::String(self.default.clone())
    }

    fn from_string(&self, text: &str) -> Result<Value> {
        Ok(Value::String(text.to_owned()))
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        Ok(value.expect_str()?.to_owned())
    }
}

/// Boolean parameter with the legacy asymmetric text form: any of
/// "true"/"*"/"yes" (case-insensitive) decodes to true, everything else to
/// false; true encodes to `*` and false to the empty string.
pub struct Boolean {
    default: bool,
}

impl Boolean {
    pub fn new(default: bool) -> Self {
        Self { default }
    }
}

impl Parameter for Boolean {
    fn default_value(&self) -> Value {
        Value::Bool(self.default)
    }

    fn from_string(&self, text: &str) -> Result<Value> {
        let truthy = matches!(text.to_lowercase().as_str(), "true" | "*" | "yes");
        Ok(Value::Bool(truthy))
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        let text = if value.expect_bool()? { "*" } else { "" };
        Ok(text.to_owned())
    }
}

/// A parameter that is never translated to or from persisted text; both
/// conversions are identity over the opaque payload.
pub struct Object {
    default: String,
}

impl Object {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
        }
    }
}

impl Parameter for Object {
    fn default_value(&self) -> Value {
        Value::Object(self.default.clone())
    }

    fn from_string(&self, text: &str) -> Result<Value> {
        Ok(Value::Object(text.to_owned()))
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        Ok(value.expect_object()?.to_owned())
    }
}

/// Homogeneous ordered sequence of a nested parameter type. The textual
/// form is a flat list literal parsed by [`crate::literal`], never
/// evaluated as code.
pub struct ListOf {
    element: Box<dyn Parameter>,
}

impl ListOf {
    pub fn new(element: impl Parameter + 'static) -> Self {
        Self {
            element: Box::new(element),
        }
    }
}

impl Parameter for ListOf {
    fn default_value(&self) -> Value {
        Value::List(Vec::new())
    }

    fn from_string(&self, text: &str) -> Result<Value> {
        let items = literal::parse_list(text)?
            .iter()
            .map(|s| self.element.from_string(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::List(items))
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        let texts = value
            .expect_list()?
            .iter()
            .map(|v| self.element.to_string(v))
            .collect::<Result<Vec<_>>>()?;
        Ok(literal::render_list(&texts))
    }
}

/// Integer constrained to an inclusive `[min, max]` range. Both conversion
/// directions enforce the range.
pub struct SpinInt {
    default: i64,
    min: i64,
    max: i64,
}

impl SpinInt {
    pub fn new(default: i64, min: i64, max: i64) -> Self {
        Self { default, min, max }
    }

    fn check(&self, v: i64) -> Result<i64> {
        if v < self.min || v > self.max {
            return Err(ConfigError::out_of_range(v, self.min, self.max));
        }
        Ok(v)
    }
}

impl Parameter for SpinInt {
    fn default_value(&self) -> Value {
        Value::Integer(self.default)
    }

    fn from_string(&self, text: &str) -> Result<Value> {
        let v = text
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::parse("integer", text))?;
        Ok(Value::Integer(self.check(v)?))
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        Ok(self.check(value.expect_integer()?)?.to_string())
    }
}

/// Float constrained to an inclusive `[min, max]` range.
pub struct SpinFloat {
    default: f64,
    min: f64,
    max: f64,
}

impl SpinFloat {
    pub fn new(default: f64, min: f64, max: f64) -> Self {
        Self { default, min, max }
    }

    fn check(&self, v: f64) -> Result<f64> {
        if !(self.min..=self.max).contains(&v) {
            return Err(ConfigError::out_of_range(v, self.min, self.max));
        }
        Ok(v)
    }
}

impl Parameter for SpinFloat {
    fn default_value(&self) -> Value {
        Value::Float(self.default)
    }

    fn from_string(&self, text: &str) -> Result<Value> {
        let v = text
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::parse("float", text))?;
        Ok(Value::Float(self.check(v)?))
    }

    fn to_string(&self, value: &Value) -> Result<String> {
        Ok(self.check(value.expect_float()?)?.to_string())
    }
}
