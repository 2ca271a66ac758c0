//! Declared-parameter table and the per-entity value container.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use crate::error::{ConfigError, Result};
use crate::param::Parameter;
use crate::value::Value;

/// Immutable name→parameter table for one entity type.
///
/// Built once through [`ParamSetBuilder`] and shared via `Arc`; it is never
/// mutated after construction. An entity type that refines another composes
/// by starting from the same builder function and adding or overriding
/// entries (latest registration wins).
pub struct ParamSet {
    params: BTreeMap<String, Box<dyn Parameter>>,
}

impl ParamSet {
    pub fn builder() -> ParamSetBuilder {
        ParamSetBuilder {
            params: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Parameter> {
        self.params.get(name).map(|p| p.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Declared parameters in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Parameter)> {
        self.params.iter().map(|(n, p)| (n.as_str(), p.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

pub struct ParamSetBuilder {
    params: BTreeMap<String, Box<dyn Parameter>>,
}

impl ParamSetBuilder {
    /// Declare a parameter. Re-declaring a name replaces the earlier entry,
    /// so refining types can override inherited defaults.
    pub fn param(mut self, name: impl Into<String>, param: impl Parameter + 'static) -> Self {
        self.params.insert(name.into(), Box::new(param));
        self
    }

    pub fn build(self) -> Arc<ParamSet> {
        Arc::new(ParamSet {
            params: self.params,
        })
    }
}

/// The typed value container owned by one entity, keyed by declared
/// parameter names and seeded from their defaults.
pub struct Config {
    params: Arc<ParamSet>,
    values: BTreeMap<String, Value>,
}

impl Config {
    /// Every declared key starts bound to its parameter's default (typed,
    /// not string).
    pub fn new(params: Arc<ParamSet>) -> Self {
        let values = params
            .iter()
            .map(|(name, p)| (name.to_owned(), p.default_value()))
            .collect();
        Self { params, values }
    }

    pub fn params(&self) -> &Arc<ParamSet> {
        &self.params
    }

    /// Store a typed value. Fails for undeclared names; range and type
    /// validation happen earlier, at string conversion time.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        if !self.params.contains(name) {
            return Err(ConfigError::UnknownParameter(name.to_owned()));
        }
        self.values.insert(name.to_owned(), value);
        Ok(())
    }

    /// The stored typed value, or `None` for undeclared names.
    pub fn typed_value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The stored value in its string-serialized form.
    pub fn string_value(&self, name: &str) -> Result<String> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.to_owned()))?;
        let param = self
            .params
            .get(name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.to_owned()))?;
        param.to_string(value)
    }

    /// Legacy string-typed get: the serialized current value, or `fallback`
    /// for names that were never declared.
    pub fn string_or(&self, name: &str, fallback: &str) -> Result<String> {
        if !self.params.contains(name) {
            return Ok(fallback.to_owned());
        }
        self.string_value(name)
    }

    /// Write every entry as a `name=value` line, keys in lexicographic
    /// order.
    pub fn dump<W: Write>(&self, w: &mut W) -> Result<()> {
        for (name, value) in &self.values {
            let param = self
                .params
                .get(name)
                .ok_or_else(|| ConfigError::UnknownParameter(name.clone()))?;
            writeln!(w, "{}={}", name, param.to_string(value)?)?;
        }
        Ok(())
    }
}
