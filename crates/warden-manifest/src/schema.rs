//! Manifest schema types and TOML parsing.
//!
//! One manifest file describes one callable object: its class name and the
//! methods it exposes, each with the profiles allowed to invoke it. The
//! manifest sits in the scanned tree at the position the object should
//! occupy, so its permission metadata lives next to what it protects.

use std::path::Path;

use serde::{Deserialize, Serialize};

use warden_contracts::error::{WardenError, WardenResult};

/// The TOML document describing one callable object.
///
/// Example:
/// ```toml
/// class = "Invoices"
///
/// [[methods]]
/// name = "send"
/// profiles = ["finance"]
/// arity = 2
/// returns = { status = "sent" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectManifest {
    /// Class name the manifest describes. When absent, the manifest matches
    /// whatever class name the discovery pipeline derives from the file.
    pub class: Option<String>,

    /// The methods the object exposes.
    #[serde(default)]
    pub methods: Vec<MethodManifest>,
}

/// One method entry in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodManifest {
    /// Method name, unique within the manifest.
    pub name: String,

    /// Profiles allowed to invoke the method. A method with no profiles
    /// exists in the tree but nobody may invoke it.
    #[serde(default)]
    pub profiles: Vec<String>,

    /// Number of arguments the method accepts.
    #[serde(default)]
    pub arity: usize,

    /// Static payload returned on invocation. Absent means null.
    pub returns: Option<serde_json::Value>,
}

impl ObjectManifest {
    /// Parse `s` as a TOML object manifest.
    ///
    /// Returns `WardenError::Config` if the TOML is malformed or does not
    /// match the manifest schema.
    pub fn from_toml_str(s: &str) -> WardenResult<Self> {
        toml::from_str(s).map_err(|e| WardenError::Config {
            reason: format!("failed to parse object manifest: {}", e),
        })
    }

    /// Read the file at `path` and parse it as an object manifest.
    pub fn from_file(path: &Path) -> WardenResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WardenError::Config {
            reason: format!("failed to read manifest '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Find a method entry by name.
    pub fn method(&self, name: &str) -> Option<&MethodManifest> {
        self.methods.iter().find(|m| m.name == name)
    }
}
