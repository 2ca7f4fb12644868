//! # dotjson-document
//!
//! The document model behind the dotjson shell: a JSON value tree addressed
//! by dot-separated property paths.
//!
//! - [`path`] resolves and mutates nodes by [`DottedPath`].
//! - [`value`] holds the type tagging, literal parsing and rendering helpers.
//! - [`session`] owns one loaded document, its source file and view state.
//!
//! ```
//! use dotjson_document::{path, DottedPath};
//! use serde_json::json;
//!
//! let mut tree = json!({"server": {"port": 80}});
//! path::set(&mut tree, &DottedPath::parse("server.port"), "8080").unwrap();
//! assert_eq!(path::get(&tree, &DottedPath::parse("server.port")).unwrap(), &json!(8080));
//! ```

pub mod error;
pub mod path;
pub mod session;
pub mod value;

pub use error::{DocumentError, Result};
pub use path::{DottedPath, KeyEntry};
pub use session::DocumentSession;
pub use value::TypeTag;
