//! Template helpers available in every template
//!
//! - `substitute "name"` looks up `name` in the dictionary
//! - `counter n` produces the sequence `0, 1, ..., n-1`
//!
//! The helpers are bound to the dictionary of the current run when the
//! registry is built. Nothing is stored globally.

use crate::dictionary::Dictionary;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, ScopedJson,
};
use serde_json::Value;
use std::error;
use std::fmt;

/// Error when a value cannot be used as a count
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionError {
    /// The offending value
    pub value: Value,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot convert input to number: {}", self.value)
    }
}

impl error::Error for ConversionError {}

/// Look up `name` in the dictionary. Missing keys are `None`.
pub fn substitute<'d>(dictionary: &'d Dictionary, name: &str) -> Option<&'d Value> {
    dictionary.get(name)
}

/// Produce `0..n` from a non-negative integer, given as a number or a numeric string.
///
/// Non-negative floats are truncated.
pub fn counter(input: &Value) -> Result<Vec<u64>, ConversionError> {
    let fail = || ConversionError {
        value: input.clone(),
    };
    let n = match input {
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(u), _) => u,
            (None, Some(f)) if f.is_finite() && f >= 0.0 => f.trunc() as u64,
            _ => return Err(fail()),
        },
        Value::String(s) => s.parse::<u64>().map_err(|_| fail())?,
        _ => return Err(fail()),
    };
    Ok((0..n).collect())
}

/// `substitute` bound to a dictionary
pub struct SubstituteHelper<'d> {
    pub dictionary: &'d Dictionary,
}

impl HelperDef for SubstituteHelper<'_> {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let name = h
            .param(0)
            .and_then(|v| v.value().as_str())
            .ok_or_else(|| RenderError::new("substitute helper requires a string parameter"))?;
        let value = substitute(self.dictionary, name)
            .cloned()
            .unwrap_or(Value::Null);
        Ok(ScopedJson::Derived(value))
    }
}

/// `counter` as a template helper
pub struct CounterHelper;

impl HelperDef for CounterHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let input = h
            .param(0)
            .map(|v| v.value())
            .ok_or_else(|| RenderError::new("counter helper requires a parameter"))?;
        let sequence = counter(input).map_err(|e| RenderError::from_error("counter", e))?;
        Ok(ScopedJson::Derived(Value::from(sequence)))
    }
}

/// Register the helpers on a registry, bound to `dictionary`
pub fn register_helpers<'d>(registry: &mut Handlebars<'d>, dictionary: &'d Dictionary) {
    registry.register_helper("substitute", Box::new(SubstituteHelper { dictionary }));
    registry.register_helper("counter", Box::new(CounterHelper));
}
