//! Source origin types.
//!
//! A declaration parsed from a header remembers where it came from. Nodes
//! synthesized by the generator itself have no origin.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line and column inside a header file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

/// The source construct a declaration was produced from.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SourceOrigin {
    /// Header path as reported by the front end.
    pub file: String,
    /// Position of the declaration, when the front end reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl SourceOrigin {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            location: None,
        }
    }

    pub fn at(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            location: Some(SourceLocation::new(line, column)),
        }
    }
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file)?;
        if let Some(location) = self.location {
            write!(f, "({})", location)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let origin = SourceOrigin::at("Scene/Node.h", 42, 5);
        assert_eq!(origin.to_string(), "Scene/Node.h(42,5)");
    }

    #[test]
    fn test_display_without_location() {
        let origin = SourceOrigin::new("Scene/Node.h");
        assert_eq!(origin.to_string(), "Scene/Node.h");
    }

    #[test]
    fn test_location_ordering() {
        assert!(SourceLocation::new(3, 9) < SourceLocation::new(4, 1));
        assert!(SourceLocation::new(4, 1) < SourceLocation::new(4, 2));
    }
}
