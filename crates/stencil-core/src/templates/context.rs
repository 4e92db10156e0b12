//! Version-pin context for template rendering
//!
//! The pin table ships embedded (`versions.yaml`); the `versions` section of
//! stencil.yaml and `--set key=value` flags are layered on top.

use crate::config::loader::load_embedded_config;
use crate::config::StencilConfig;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tera::Context;

/// Named version pins handed to the templating engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VersionContext {
    values: BTreeMap<String, Value>,
}

impl VersionContext {
    /// Load the embedded pin table
    pub fn embedded() -> Result<Self> {
        let values = load_embedded_config::<BTreeMap<String, Value>>("versions.yaml")?;
        Ok(Self { values })
    }

    /// Embedded pins with the config's `versions` section merged over them
    pub fn resolve(config: &StencilConfig) -> Result<Self> {
        let mut context = Self::embedded()?;
        context
            .values
            .extend(config.versions.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(context)
    }

    /// Apply `key=value` overrides; `true`/`false` become booleans
    pub fn apply_overrides<S: AsRef<str>>(&mut self, overrides: &[S]) -> Result<()> {
        for input in overrides {
            let (key, value) = parse_override(input.as_ref())?;
            self.values.insert(key, value);
        }
        Ok(())
    }

    /// Insert or replace a single pin
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Look up a pin
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Look up a pin that must be a string
    pub fn require_str(&self, key: &str) -> Result<&str> {
        match self.values.get(key) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(Error::invalid_config(format!(
                "Version pin '{}' must be a string, found {}",
                key, other
            ))),
            None => Err(Error::invalid_config(format!(
                "Version pin '{}' is not defined",
                key
            ))),
        }
    }

    /// Iterate pins in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert to Tera context for template rendering
    pub fn to_tera_context(&self) -> Result<Context> {
        let context = Context::from_serialize(self)?;
        Ok(context)
    }
}

fn parse_override(input: &str) -> Result<(String, Value)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| Error::invalid_override(input))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::invalid_override(input));
    }

    let value = match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_string()),
    };

    Ok((key.to_string(), value))
}
