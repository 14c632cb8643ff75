//! csbind_rules: The generator rules file.
//!
//! Rules decide which symbols of the parsed API are candidates for binding
//! and which C++ types have a hand-written mapping to the target language.

mod filter;

pub use filter::{wildcard_to_regex, SymbolFilter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed rules file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid wildcard '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A hand-written mapping of one C++ type to the C and C# sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMap {
    #[serde(rename = "type")]
    pub cpp_type: String,
    #[serde(rename = "ctype", default)]
    pub c_type: String,
    #[serde(rename = "cstype", default)]
    pub cs_type: String,
    #[serde(rename = "ptype", default = "default_pinvoke_type")]
    pub pinvoke_type: String,
    #[serde(default)]
    pub is_value_type: bool,
}

fn default_pinvoke_type() -> String {
    "IntPtr".to_string()
}

impl TypeMap {
    fn normalized(mut self) -> Self {
        if self.c_type.is_empty() {
            self.c_type = self.cpp_type.clone();
        }
        if self.cs_type.is_empty() {
            self.cs_type = self.pinvoke_type.clone();
        }
        self
    }
}

/// Include/exclude wildcard lists as written in the rules file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolRules {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// The rules file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    pub symbols: Option<SymbolRules>,
    #[serde(default)]
    pub typemaps: Vec<TypeMap>,
    pub smart_pointers: Option<Vec<String>>,
}

/// Loaded and compiled generator rules.
#[derive(Debug, Clone)]
pub struct GeneratorRules {
    pub symbols: SymbolFilter,
    /// Type maps keyed by C++ spelling, in file order.
    pub type_maps: IndexMap<String, TypeMap>,
    /// Templates whose first argument is the wrapped class.
    pub smart_pointers: Vec<String>,
}

impl GeneratorRules {
    pub fn from_file(file: RulesFile) -> Result<Self, RulesError> {
        let symbols = match file.symbols {
            Some(rules) => SymbolFilter::new(&rules.include, &rules.exclude)?,
            None => SymbolFilter::allow_all(),
        };

        let mut type_maps = IndexMap::with_capacity(file.typemaps.len());
        for map in file.typemaps {
            let map = map.normalized();
            type_maps.insert(map.cpp_type.clone(), map);
        }

        let smart_pointers = file
            .smart_pointers
            .unwrap_or_else(|| vec!["SharedPtr".to_string(), "WeakPtr".to_string()]);

        Ok(Self { symbols, type_maps, smart_pointers })
    }

    /// Parse rules from JSON text.
    pub fn from_json(content: &str) -> Result<Self, RulesError> {
        let file: RulesFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    /// Read and parse a rules file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn type_map(&self, cpp_type: &str) -> Option<&TypeMap> {
        self.type_maps.get(cpp_type)
    }

    pub fn is_smart_pointer(&self, template: &str) -> bool {
        self.smart_pointers.iter().any(|t| t == template)
    }
}

impl Default for GeneratorRules {
    fn default() -> Self {
        Self {
            symbols: SymbolFilter::allow_all(),
            type_maps: IndexMap::new(),
            smart_pointers: vec!["SharedPtr".to_string(), "WeakPtr".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = r#"{
        "symbols": { "include": ["Urho3D::**"], "exclude": ["Urho3D::Detail::**"] },
        "typemaps": [
            { "type": "Urho3D::String", "ptype": "string", "ctype": "const char*" },
            { "type": "Urho3D::StringHash", "ptype": "uint", "cstype": "StringHash", "is_value_type": true },
            { "type": "Urho3D::Variant" }
        ]
    }"#;

    #[test]
    fn test_typemap_defaults() {
        let rules = GeneratorRules::from_json(RULES).unwrap();

        let string = rules.type_map("Urho3D::String").unwrap();
        assert_eq!(string.c_type, "const char*");
        assert_eq!(string.cs_type, "string");
        assert!(!string.is_value_type);

        let hash = rules.type_map("Urho3D::StringHash").unwrap();
        assert_eq!(hash.c_type, "Urho3D::StringHash");
        assert_eq!(hash.cs_type, "StringHash");
        assert!(hash.is_value_type);

        let variant = rules.type_map("Urho3D::Variant").unwrap();
        assert_eq!(variant.pinvoke_type, "IntPtr");
        assert_eq!(variant.cs_type, "IntPtr");

        assert!(rules.type_map("Urho3D::Node").is_none());
    }

    #[test]
    fn test_typemaps_keep_file_order() {
        let rules = GeneratorRules::from_json(RULES).unwrap();
        let keys: Vec<_> = rules.type_maps.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Urho3D::String", "Urho3D::StringHash", "Urho3D::Variant"]);
    }

    #[test]
    fn test_default_smart_pointers() {
        let rules = GeneratorRules::from_json(RULES).unwrap();
        assert!(rules.is_smart_pointer("SharedPtr"));
        assert!(rules.is_smart_pointer("WeakPtr"));
        assert!(!rules.is_smart_pointer("Vector"));
    }

    #[test]
    fn test_custom_smart_pointers() {
        let rules = GeneratorRules::from_json(r#"{ "smart_pointers": ["std::shared_ptr"] }"#).unwrap();
        assert!(rules.is_smart_pointer("std::shared_ptr"));
        assert!(!rules.is_smart_pointer("SharedPtr"));
    }

    #[test]
    fn test_missing_symbols_section_allows_all() {
        let rules = GeneratorRules::from_json("{}").unwrap();
        assert!(rules.symbols.is_included("Anything::At::All"));
    }

    #[test]
    fn test_malformed_rules() {
        assert!(matches!(GeneratorRules::from_json("{ \"typemaps\": 3 }"), Err(RulesError::Json(_))));
    }
}
