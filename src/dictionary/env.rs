use super::Dictionary;
use crate::error::StemplateError;
use error_stack::{Report, Result};
use serde_json::{Map, Value};

/// How an environment variable is decomposed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvKind {
    /// The raw value
    String,
    /// The value split on `,`
    List,
    /// The value split on `,` into `key=value` pairs
    Map,
}

/// Import the variables in `names` into the dictionary.
///
/// An unset variable reads as the empty string.
pub fn import<L>(
    dictionary: &mut Dictionary,
    names: &[String],
    kind: EnvKind,
    lookup: &L,
) -> Result<(), StemplateError>
where
    L: Fn(&str) -> Option<String>,
{
    for name in names.iter().filter(|n| !n.is_empty()) {
        let raw = lookup(name).unwrap_or_default();
        log::debug!("importing environment variable {name} as {kind:?}");
        let value = decompose(name, &raw, kind)?;
        dictionary.insert(name.clone(), value);
    }
    Ok(())
}

fn decompose(name: &str, raw: &str, kind: EnvKind) -> Result<Value, StemplateError> {
    let value = match kind {
        EnvKind::String => Value::String(raw.to_string()),
        EnvKind::List => Value::Array(
            raw.split(',')
                .map(|item| Value::String(item.to_string()))
                .collect(),
        ),
        EnvKind::Map => {
            let mut map = Map::new();
            for segment in raw.split(',') {
                let (key, value) = segment.split_once('=').ok_or_else(|| {
                    Report::new(StemplateError::EnvFormat {
                        variable: name.to_string(),
                        segment: segment.to_string(),
                    })
                    .attach_printable("map entries must look like `key=value`")
                })?;
                map.insert(key.to_string(), Value::String(value.to_string()));
            }
            Value::Object(map)
        }
    };
    Ok(value)
}
