//! Wildcard include/exclude filtering of symbol names.

use crate::RulesError;
use regex::Regex;

/// Convert a wildcard into an anchored regular expression. `*` matches any
/// run of characters except `/`, `**` matches anything. Everything else is
/// literal.
pub fn wildcard_to_regex(wildcard: &str) -> String {
    let mut pattern = String::with_capacity(wildcard.len() + 8);
    pattern.push('^');
    let mut chars = wildcard.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            if chars.peek() == Some(&'*') {
                chars.next();
                pattern.push_str(".*");
            } else {
                pattern.push_str("[^/]*");
            }
        } else {
            let mut buf = [0u8; 4];
            pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        }
    }
    pattern.push('$');
    pattern
}

fn compile(wildcards: &[String]) -> Result<Vec<Regex>, RulesError> {
    wildcards
        .iter()
        .map(|w| {
            Regex::new(&wildcard_to_regex(w)).map_err(|source| RulesError::Pattern { pattern: w.clone(), source })
        })
        .collect()
}

/// A value is included when it matches an include pattern and no exclude
/// pattern.
#[derive(Debug, Clone)]
pub struct SymbolFilter {
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
    include_all: bool,
}

impl SymbolFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, RulesError> {
        Ok(Self {
            includes: compile(include)?,
            excludes: compile(exclude)?,
            include_all: false,
        })
    }

    /// A filter that includes every value.
    pub fn allow_all() -> Self {
        Self {
            includes: Vec::new(),
            excludes: Vec::new(),
            include_all: true,
        }
    }

    pub fn is_included(&self, value: &str) -> bool {
        let included = self.include_all || self.includes.iter().any(|re| re.is_match(value));
        included && !self.excludes.iter().any(|re| re.is_match(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &[&str], exclude: &[&str]) -> SymbolFilter {
        let include: Vec<String> = include.iter().map(|s| s.to_string()).collect();
        let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
        SymbolFilter::new(&include, &exclude).unwrap()
    }

    #[test]
    fn test_wildcard_translation() {
        assert_eq!(wildcard_to_regex("Urho3D::*"), r"^Urho3D::[^/]*$");
        assert_eq!(wildcard_to_regex("Graphics/**"), r"^Graphics/.*$");
        assert_eq!(wildcard_to_regex("a.b(c)"), r"^a\.b\(c\)$");
    }

    #[test]
    fn test_single_star_stops_at_slash() {
        let f = filter(&["Graphics/*.h"], &[]);
        assert!(f.is_included("Graphics/Texture.h"));
        assert!(!f.is_included("Graphics/OpenGL/Texture.h"));
    }

    #[test]
    fn test_double_star_matches_anything() {
        let f = filter(&["Graphics/**.h"], &[]);
        assert!(f.is_included("Graphics/OpenGL/Texture.h"));
    }

    #[test]
    fn test_exclude_wins() {
        let f = filter(&["Urho3D::**"], &["Urho3D::Detail::**", "*Impl"]);
        assert!(f.is_included("Urho3D::Node"));
        assert!(!f.is_included("Urho3D::Detail::Allocator"));
        assert!(!f.is_included("Urho3D::GraphicsImpl"));
        assert!(!f.is_included("Bullet::btVector3"));
    }

    #[test]
    fn test_empty_include_matches_nothing() {
        let f = filter(&[], &[]);
        assert!(!f.is_included("Urho3D::Node"));
    }

    #[test]
    fn test_patterns_are_anchored() {
        let f = filter(&["Node"], &[]);
        assert!(f.is_included("Node"));
        assert!(!f.is_included("Urho3D::Node"));
    }
}
