use crate::error::{ConfigError, Result};

/// A typed parameter value.
///
/// `Object` carries an opaque payload that by contract never goes through
/// string conversion; it exists so entity-aware parameters can stash
/// non-textual state in a config slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Object(String),
    List(Vec<Value>),
}

impl Value {
    /// Variant name, used in `WrongType` diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Object(_) => "object",
            Value::List(_) => "list",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub(crate) fn expect_integer(&self) -> Result<i64> {
        self.as_integer().ok_or_else(|| ConfigError::WrongType {
            expected: "integer",
            got: self.type_name(),
        })
    }

    pub(crate) fn expect_float(&self) -> Result<f64> {
        self.as_float().ok_or_else(|| ConfigError::WrongType {
            expected: "float",
            got: self.type_name(),
        })
    }

    pub(crate) fn expect_bool(&self) -> Result<bool> {
        self.as_bool().ok_or_else(|| ConfigError::WrongType {
            expected: "boolean",
            got: self.type_name(),
        })
    }

    pub(crate) fn expect_str(&self) -> Result<&str> {
        self.as_str().ok_or_else(|| ConfigError::WrongType {
            expected: "string",
            got: self.type_name(),
        })
    }

    pub(crate) fn expect_object(&self) -> Result<&str> {
        match self {
            Value::Object(s) => Ok(s),
            other => Err(ConfigError::WrongType {
                expected: "object",
                got: other.type_name(),
            }),
        }
    }

    pub(crate) fn expect_list(&self) -> Result<&[Value]> {
        self.as_list().ok_or_else(|| ConfigError::WrongType {
            expected: "list",
            got: self.type_name(),
        })
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}
