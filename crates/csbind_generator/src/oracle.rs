//! Type acceptability queries.

use csbind_ast::CppType;

/// Decides whether a C++ type can cross the binding boundary.
pub trait TypeOracle {
    fn is_acceptable_type(&self, ty: &CppType) -> bool;
}
