//! Dotted-path resolution over JSON value trees.
//!
//! A path such as `server.tls.port` names the key `port` inside the object
//! at `server.tls`. Every segment but the last must resolve to an object;
//! arrays and scalars are leaves. The empty path is the document root.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{DocumentError, Result};
use crate::value::{parse_literal, TypeTag};

/// An ordered list of object keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DottedPath {
    segments: Vec<String>,
}

impl DottedPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split `text` on `.`. The empty string is the root.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::root();
        }
        Self {
            segments: text.split('.').map(String::from).collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Split into the parent path and the final key, or `None` for the root.
    pub fn split_last(&self) -> Option<(DottedPath, &str)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            DottedPath {
                segments: parent.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Extend this path with `relative`, which is itself a dotted path.
    pub fn join(&self, relative: &DottedPath) -> DottedPath {
        let mut segments = self.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        DottedPath { segments }
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for DottedPath {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// A key of an object together with the type of its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: String,
    pub tag: Option<TypeTag>,
}

/// Resolve `path` against `tree`.
pub fn get<'a>(tree: &'a Value, path: &DottedPath) -> Result<&'a Value> {
    let mut cursor = tree;
    for segment in path.segments() {
        cursor = match cursor {
            Value::Object(map) => map
                .get(segment.as_str())
                .ok_or_else(|| DocumentError::PathNotFound(segment.clone()))?,
            _ => return Err(DocumentError::PathNotFound(segment.clone())),
        };
    }
    Ok(cursor)
}

fn get_mut<'a>(tree: &'a mut Value, path: &DottedPath) -> Result<&'a mut Value> {
    let mut cursor = tree;
    for segment in path.segments() {
        cursor = match cursor {
            Value::Object(map) => map
                .get_mut(segment.as_str())
                .ok_or_else(|| DocumentError::PathNotFound(segment.clone()))?,
            _ => return Err(DocumentError::PathNotFound(segment.clone())),
        };
    }
    Ok(cursor)
}

/// The object that holds the final key of `path`, plus that key.
fn parent_object<'a, 'p>(
    tree: &'a mut Value,
    path: &'p DottedPath,
) -> Result<(&'a mut Map<String, Value>, &'p str)> {
    let (parent, key) = path.split_last().ok_or(DocumentError::TopLevel)?;
    match get_mut(tree, &parent)? {
        Value::Object(map) => Ok((map, key)),
        _ => Err(DocumentError::PathNotFound(key.to_string())),
    }
}

/// Set the value at `path` from a raw literal.
///
/// The parent object must already exist; missing intermediate objects are
/// not created. `raw` is parsed with [`parse_literal`].
pub fn set(tree: &mut Value, path: &DottedPath, raw: &str) -> Result<()> {
    set_value(tree, path, parse_literal(raw))
}

/// Set an already-parsed value at `path`.
pub fn set_value(tree: &mut Value, path: &DottedPath, value: Value) -> Result<()> {
    let (parent, key) = parent_object(tree, path)?;
    parent.insert(key.to_string(), value);
    Ok(())
}

/// Remove the key named by `path`, returning its value.
pub fn delete(tree: &mut Value, path: &DottedPath) -> Result<Value> {
    let (parent, key) = parent_object(tree, path)?;
    parent
        .shift_remove(key)
        .ok_or_else(|| DocumentError::PathNotFound(key.to_string()))
}

/// List the keys of the object at `path` in document order.
///
/// Anything other than an object has no browsable keys.
pub fn keys_of(tree: &Value, path: &DottedPath) -> Result<Vec<KeyEntry>> {
    Ok(match get(tree, path)? {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| KeyEntry {
                key: key.clone(),
                tag: TypeTag::of(value),
            })
            .collect(),
        _ => Vec::new(),
    })
}
