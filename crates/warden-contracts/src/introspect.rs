//! Introspection contract types.
//!
//! A class introspector reports the callable surface of a script as plain
//! data; the permission tree is built from these declarations plus the
//! profile metadata an annotation reader attaches to each one.

use serde::{Deserialize, Serialize};

/// One method declared by a class, as reported by a class introspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// The method name, unique within its class.
    pub name: String,
    /// Number of arguments the method declares.
    pub arity: usize,
}

impl MethodDecl {
    /// Construct a declaration from any string-like name.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }
}
