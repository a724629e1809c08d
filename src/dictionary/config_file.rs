use super::Dictionary;
use crate::error::StemplateError;
use error_stack::{IntoReport, Report, Result, ResultExt};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
    /// `KEY=value` lines
    Dotenv,
    /// Java properties, with `.` in keys nesting the value
    Properties,
}

impl ConfigFormat {
    /// Detect the format from the file extension.
    ///
    /// Unknown or missing extensions fall back to TOML.
    pub fn detect(path: &Path) -> Self {
        if path.file_name().and_then(|n| n.to_str()) == Some(".env") {
            return Self::Dotenv;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            Some("env") | Some("dotenv") => Self::Dotenv,
            Some("properties") | Some("props") | Some("prop") => Self::Properties,
            _ => {
                log::debug!(
                    "unrecognized config extension for {}, falling back to toml",
                    path.display()
                );
                Self::Toml
            }
        }
    }

    /// Parse a document in this format
    pub fn parse(self, path: &Path, content: &str) -> Result<Value, StemplateError> {
        let value = match self {
            Self::Json => serde_json::from_str::<Value>(content)
                .into_report()
                .change_context_lazy(|| StemplateError::config_format(path))?,
            Self::Toml => toml::from_str::<Value>(content)
                .into_report()
                .change_context_lazy(|| StemplateError::config_format(path))?,
            Self::Yaml => serde_yaml::from_str::<Value>(content)
                .into_report()
                .change_context_lazy(|| StemplateError::config_format(path))?,
            Self::Dotenv => {
                let mut map = Map::new();
                for entry in dotenvy::from_read_iter(content.as_bytes()) {
                    let (key, value) = entry
                        .into_report()
                        .change_context_lazy(|| StemplateError::config_format(path))?;
                    map.insert(key, Value::String(value));
                }
                Value::Object(map)
            }
            Self::Properties => {
                let properties = java_properties::read(content.as_bytes())
                    .into_report()
                    .change_context_lazy(|| StemplateError::config_format(path))?;
                let mut entries = properties.into_iter().collect::<Vec<_>>();
                entries.sort();
                let mut map = Map::new();
                for (key, value) in entries {
                    insert_nested(&mut map, &key, value);
                }
                Value::Object(map)
            }
        };
        Ok(value)
    }
}

/// Insert `value` at the `.` separated `key`, creating maps on the way
fn insert_nested(map: &mut Map<String, Value>, key: &str, value: String) {
    match key.split_once('.') {
        None => {
            map.insert(key.to_string(), Value::String(value));
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child) = child {
                insert_nested(child, rest, value);
            }
        }
    }
}

/// Read a config file into a dictionary.
///
/// Keys are lowercased at every level.
pub fn load_config_file(path: &Path) -> Result<Dictionary, StemplateError> {
    let content = fs::read_to_string(path)
        .into_report()
        .change_context_lazy(|| StemplateError::filesystem(path))
        .attach_printable("cannot read config file")?;
    let format = ConfigFormat::detect(path);
    log::info!("loading config file {} as {format:?}", path.display());
    let value = format
        .parse(path, &content)
        .attach_printable_lazy(|| format!("config file is not valid {format:?}"))?;
    match lowercase_keys(value) {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Dictionary::new()),
        other => Err(Report::new(StemplateError::config_format(path)).attach_printable(format!(
            "the config file must contain a mapping at the top level, found: {other}"
        ))),
    }
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod ut {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect() {
        assert_eq!(ConfigFormat::Json, ConfigFormat::detect(Path::new("a.json")));
        assert_eq!(ConfigFormat::Yaml, ConfigFormat::detect(Path::new("a.YML")));
        assert_eq!(ConfigFormat::Yaml, ConfigFormat::detect(Path::new("a.yaml")));
        assert_eq!(ConfigFormat::Toml, ConfigFormat::detect(Path::new("a.toml")));
        assert_eq!(ConfigFormat::Toml, ConfigFormat::detect(Path::new("a.conf")));
        assert_eq!(ConfigFormat::Toml, ConfigFormat::detect(Path::new("config")));
        assert_eq!(ConfigFormat::Dotenv, ConfigFormat::detect(Path::new("a.env")));
        assert_eq!(ConfigFormat::Dotenv, ConfigFormat::detect(Path::new("dir/.env")));
        assert_eq!(
            ConfigFormat::Properties,
            ConfigFormat::detect(Path::new("a.properties"))
        );
    }

    #[test]
    fn test_parse_dotenv() {
        let value = ConfigFormat::Dotenv
            .parse(Path::new("x.env"), "# comment\nUSER=guest\nGREETING=\"hi there\"\n")
            .unwrap();
        assert_eq!(json!({"USER": "guest", "GREETING": "hi there"}), value);
    }

    #[test]
    fn test_parse_properties() {
        let value = ConfigFormat::Properties
            .parse(
                Path::new("x.properties"),
                "user = guest\nserver.port=8080\nserver.host: a\n",
            )
            .unwrap();
        assert_eq!(
            json!({"user": "guest", "server": {"port": "8080", "host": "a"}}),
            value
        );
    }

    #[test]
    fn test_parse_each_format() {
        let p = Path::new("x");
        let expected = json!({"user": "guest", "count": 3});
        assert_eq!(
            expected,
            ConfigFormat::Json
                .parse(p, r#"{"user": "guest", "count": 3}"#)
                .unwrap()
        );
        assert_eq!(
            expected,
            ConfigFormat::Toml.parse(p, "user = \"guest\"\ncount = 3\n").unwrap()
        );
        assert_eq!(
            expected,
            ConfigFormat::Yaml.parse(p, "user: guest\ncount: 3\n").unwrap()
        );
    }

    #[test]
    fn test_parse_error() {
        let err = ConfigFormat::Json.parse(Path::new("bad.json"), "{").unwrap_err();
        assert_eq!(
            &StemplateError::ConfigFormat("bad.json".to_string()),
            err.current_context()
        );
    }

    #[test]
    fn test_lowercase_keys() {
        let value = json!({"Server": {"Port": 80, "Hosts": [{"Name": "a"}]}});
        assert_eq!(
            json!({"server": {"port": 80, "hosts": [{"name": "a"}]}}),
            lowercase_keys(value)
        );
    }
}
