//! Nested configuration trees with dotted-path access.
//!
//! A [`Tree`] is an insertion-ordered mapping from keys to [`Value`]s, where
//! a value is a scalar, a sequence, or another tree. Trees can be addressed
//! one key at a time like a map, or through dotted paths such as
//! `server.tls.cert`.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use tiers::tree::{merge, Tree};
//!
//! let serde_json::Value::Object(defaults) = json!({"a": {"x": 1, "y": 2}}) else {
//!     unreachable!()
//! };
//! let mut tree = Tree::from_mapping(&defaults);
//!
//! let mut file = Tree::new();
//! file.set_path("a.x", 3).unwrap();
//! merge(&mut tree, file);
//!
//! assert_eq!(tree.get_path("a.x").unwrap().as_i64(), Some(3));
//! assert_eq!(tree.get_path("a.y").unwrap().as_i64(), Some(2));
//! assert_eq!(tree.to_mapping(), json!({"a": {"x": 3, "y": 2}}).as_object().unwrap().clone());
//! ```

pub mod merger;
mod node;
pub mod path;
mod value;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use merger::{merge, TreeMerger};
pub use node::Tree;
pub use path::DottedPath;
pub use value::Value;
