//! C++ type descriptors.
//!
//! These mirror the type kinds a libclang-based front end reports. They are
//! plain values; nothing here knows which types the target language can
//! represent.

use serde::{Deserialize, Serialize};
use std::fmt;

bitflags::bitflags! {
    /// cv-qualifiers of a `CppType::CvQualified`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CvQualifiers: u8 {
        const CONST    = 1 << 0;
        const VOLATILE = 1 << 1;
    }
}

impl CvQualifiers {
    fn spelling(self) -> &'static str {
        match (self.contains(Self::CONST), self.contains(Self::VOLATILE)) {
            (true, true) => "const volatile",
            (true, false) => "const",
            (false, true) => "volatile",
            (false, false) => "",
        }
    }
}

/// Builtin (fundamental) C++ types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinKind {
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "unsigned char")]
    UChar,
    #[serde(rename = "unsigned short")]
    UShort,
    #[serde(rename = "unsigned int")]
    UInt,
    #[serde(rename = "unsigned long")]
    ULong,
    #[serde(rename = "unsigned long long")]
    ULongLong,
    #[serde(rename = "unsigned __int128")]
    UInt128,
    #[serde(rename = "signed char")]
    SChar,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "long long")]
    LongLong,
    #[serde(rename = "__int128")]
    Int128,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "long double")]
    LongDouble,
    #[serde(rename = "__float128")]
    Float128,
    #[serde(rename = "char")]
    Char,
    #[serde(rename = "wchar_t")]
    WChar,
    #[serde(rename = "char16_t")]
    Char16,
    #[serde(rename = "char32_t")]
    Char32,
    #[serde(rename = "std::nullptr_t")]
    Nullptr,
}

impl BuiltinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::UChar => "unsigned char",
            BuiltinKind::UShort => "unsigned short",
            BuiltinKind::UInt => "unsigned int",
            BuiltinKind::ULong => "unsigned long",
            BuiltinKind::ULongLong => "unsigned long long",
            BuiltinKind::UInt128 => "unsigned __int128",
            BuiltinKind::SChar => "signed char",
            BuiltinKind::Short => "short",
            BuiltinKind::Int => "int",
            BuiltinKind::Long => "long",
            BuiltinKind::LongLong => "long long",
            BuiltinKind::Int128 => "__int128",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::LongDouble => "long double",
            BuiltinKind::Float128 => "__float128",
            BuiltinKind::Char => "char",
            BuiltinKind::WChar => "wchar_t",
            BuiltinKind::Char16 => "char16_t",
            BuiltinKind::Char32 => "char32_t",
            BuiltinKind::Nullptr => "std::nullptr_t",
        }
    }

    /// Whether values of this builtin cross the P/Invoke boundary without
    /// a custom marshaller.
    pub fn is_pinvokable(self) -> bool {
        matches!(
            self,
            BuiltinKind::Void
                | BuiltinKind::Bool
                | BuiltinKind::UChar
                | BuiltinKind::UShort
                | BuiltinKind::UInt
                | BuiltinKind::ULong
                | BuiltinKind::ULongLong
                | BuiltinKind::SChar
                | BuiltinKind::Short
                | BuiltinKind::Int
                | BuiltinKind::Long
                | BuiltinKind::LongLong
                | BuiltinKind::Float
                | BuiltinKind::Double
                | BuiltinKind::Char
                | BuiltinKind::Nullptr
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    LValue,
    RValue,
}

/// A C++ type as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CppType {
    Builtin(BuiltinKind),
    /// A class, struct, enum or typedef, by qualified name.
    UserDefined(String),
    CvQualified {
        cv: CvQualifiers,
        inner: Box<CppType>,
    },
    Pointer(Box<CppType>),
    Reference {
        kind: ReferenceKind,
        inner: Box<CppType>,
    },
    TemplateInstantiation {
        template: String,
        #[serde(default)]
        arguments: Vec<CppType>,
    },
    Array {
        element: Box<CppType>,
        #[serde(default)]
        size: Option<u64>,
    },
    /// A type the front end could not describe, kept as its spelling.
    Unexposed(String),
}

impl CppType {
    pub fn builtin(kind: BuiltinKind) -> Self {
        CppType::Builtin(kind)
    }

    pub fn user(name: impl Into<String>) -> Self {
        CppType::UserDefined(name.into())
    }

    pub fn pointer_to(inner: CppType) -> Self {
        CppType::Pointer(Box::new(inner))
    }

    pub fn reference_to(inner: CppType) -> Self {
        CppType::Reference {
            kind: ReferenceKind::LValue,
            inner: Box::new(inner),
        }
    }

    pub fn const_of(inner: CppType) -> Self {
        CppType::CvQualified {
            cv: CvQualifiers::CONST,
            inner: Box::new(inner),
        }
    }

    pub fn template(template: impl Into<String>, arguments: Vec<CppType>) -> Self {
        CppType::TemplateInstantiation {
            template: template.into(),
            arguments,
        }
    }

    /// The type with cv-qualifiers, pointers and references stripped.
    pub fn base_type(&self) -> &CppType {
        match self {
            CppType::CvQualified { inner, .. }
            | CppType::Pointer(inner)
            | CppType::Reference { inner, .. } => inner.base_type(),
            _ => self,
        }
    }

    /// Spelling of the underlying type, e.g. `Urho3D::Node` for `const Urho3D::Node*`.
    pub fn type_name(&self) -> String {
        self.base_type().to_string()
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, CppType::Builtin(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, CppType::Builtin(BuiltinKind::Void))
    }
}

impl fmt::Display for CppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CppType::Builtin(kind) => f.write_str(kind.as_str()),
            CppType::UserDefined(name) | CppType::Unexposed(name) => f.write_str(name),
            // `T* const` binds the qualifier to the pointer itself.
            CppType::CvQualified { cv, inner } if matches!(**inner, CppType::Pointer(_)) => {
                write!(f, "{} {}", inner, cv.spelling())
            }
            CppType::CvQualified { cv, inner } => write!(f, "{} {}", cv.spelling(), inner),
            CppType::Pointer(inner) => write!(f, "{}*", inner),
            CppType::Reference { kind: ReferenceKind::LValue, inner } => write!(f, "{}&", inner),
            CppType::Reference { kind: ReferenceKind::RValue, inner } => write!(f, "{}&&", inner),
            CppType::TemplateInstantiation { template, arguments } => {
                write!(f, "{}<", template)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            CppType::Array { element, size: Some(size) } => write!(f, "{}[{}]", element, size),
            CppType::Array { element, size: None } => write!(f, "{}[]", element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_spellings() {
        let node = CppType::user("Urho3D::Node");
        assert_eq!(CppType::const_of(CppType::reference_to(node.clone())).to_string(), "const Urho3D::Node&");
        assert_eq!(CppType::pointer_to(CppType::const_of(node.clone())).to_string(), "const Urho3D::Node*");
        assert_eq!(
            CppType::CvQualified { cv: CvQualifiers::CONST, inner: Box::new(CppType::pointer_to(node.clone())) }
                .to_string(),
            "Urho3D::Node* const"
        );
        assert_eq!(
            CppType::template("HashMap", vec![CppType::builtin(BuiltinKind::Int), node]).to_string(),
            "HashMap<int, Urho3D::Node>"
        );
        assert_eq!(
            CppType::Array { element: Box::new(CppType::builtin(BuiltinKind::Float)), size: Some(4) }.to_string(),
            "float[4]"
        );
        assert_eq!(
            CppType::Reference { kind: ReferenceKind::RValue, inner: Box::new(CppType::user("String")) }.to_string(),
            "String&&"
        );
    }

    #[test]
    fn test_base_type_strips_qualifiers() {
        let ty = CppType::const_of(CppType::pointer_to(CppType::reference_to(CppType::user("Urho3D::Scene"))));
        assert_eq!(ty.base_type(), &CppType::user("Urho3D::Scene"));
        assert_eq!(ty.type_name(), "Urho3D::Scene");
    }

    #[test]
    fn test_base_type_keeps_templates() {
        let ty = CppType::reference_to(CppType::template("SharedPtr", vec![CppType::user("Urho3D::Node")]));
        assert_eq!(ty.type_name(), "SharedPtr<Urho3D::Node>");
    }

    #[test]
    fn test_pinvokable_builtins() {
        assert!(BuiltinKind::Int.is_pinvokable());
        assert!(BuiltinKind::Void.is_pinvokable());
        assert!(BuiltinKind::Nullptr.is_pinvokable());
        assert!(!BuiltinKind::WChar.is_pinvokable());
        assert!(!BuiltinKind::LongDouble.is_pinvokable());
        assert!(!BuiltinKind::Int128.is_pinvokable());
    }

    #[test]
    fn test_json_shape() {
        let ty: CppType = serde_json::from_str(
            r#"{"pointer": {"cv_qualified": {"cv": "CONST", "inner": {"builtin": "char"}}}}"#,
        )
        .unwrap();
        assert_eq!(ty.to_string(), "const char*");
    }
}
