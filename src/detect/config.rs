//! Application config scraping
//!
//! `application.properties` is parsed line-by-line; `application.yml` is
//! parsed with serde_yaml and flattened into the same dotted-key form, so
//! downstream lookups (`server.port`, `quarkus.http.port`) work the same
//! for either format.

use crate::detect::Framework;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::HashMap;

/// Port keys, checked in this order
const PORT_KEYS: &[&str] = &["server.port", "quarkus.http.port", "micronaut.server.port"];

pub(crate) fn scrape_properties(content: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            props.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    props
}

pub(crate) fn scrape_yaml(content: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();
    // Config files may hold multiple `---` documents (Spring profiles);
    // later documents are profile overrides, first key wins here.
    for doc in serde_yaml::Deserializer::from_str(content) {
        if let Ok(value) = Value::deserialize(doc) {
            flatten(&value, String::new(), &mut props);
        }
    }
    props
}

fn flatten(value: &Value, prefix: String, out: &mut HashMap<String, String>) {
    match value {
        Value::Mapping(map) => {
            for (key, val) in map {
                if let Some(key) = key.as_str() {
                    let dotted = if prefix.is_empty() {
                        key.to_string()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    flatten(val, dotted, out);
                }
            }
        }
        Value::Null => {}
        Value::String(s) => {
            out.entry(prefix).or_insert_with(|| s.clone());
        }
        Value::Bool(b) => {
            out.entry(prefix).or_insert_with(|| b.to_string());
        }
        Value::Number(n) => {
            out.entry(prefix).or_insert_with(|| n.to_string());
        }
        Value::Sequence(seq) => {
            let joined: Vec<String> = seq
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            out.entry(prefix).or_insert_with(|| joined.join(","));
        }
        Value::Tagged(tagged) => flatten(&tagged.value, prefix, out),
    }
}

/// Strong framework signal from config keys. Spring is deliberately not
/// decided here: `spring.*` keys overlap with generic Boot configuration,
/// so they count only as a weak fallback (see [`spring_keys_present`]).
pub(crate) fn framework_from_keys(props: &HashMap<String, String>) -> Option<Framework> {
    let has_prefix = |prefix: &str| {
        props
            .keys()
            .any(|k| k == prefix || k.starts_with(&format!("{}.", prefix)))
    };

    if has_prefix("quarkus") {
        Some(Framework::Quarkus)
    } else if has_prefix("micronaut") {
        Some(Framework::Micronaut)
    } else {
        None
    }
}

/// Weak Spring signal, applied only after every other evidence source
/// has come up empty
pub(crate) fn spring_keys_present(props: &HashMap<String, String>) -> bool {
    props.keys().any(|k| k.starts_with("spring."))
}

pub(crate) fn port_from(props: &HashMap<String, String>) -> Option<String> {
    PORT_KEYS
        .iter()
        .find_map(|key| props.get(*key).cloned())
        .filter(|port| !port.is_empty())
}
