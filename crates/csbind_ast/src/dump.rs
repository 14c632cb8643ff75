//! JSON form of the declaration tree.
//!
//! The C++ front end writes the parsed API as nested declarations; the
//! generator rebuilds the arena from it and can write the annotated tree
//! back out once passes have run.

use crate::decl::{DeclId, DeclKind, DeclarationTree, Function, FunctionKind, Parameter, Variable};
use crate::types::CppType;
use csbind_core::source::SourceOrigin;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("failed to read declaration tree: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed declaration tree: {0}")]
    Json(#[from] serde_json::Error),
    #[error("function '{symbol}' has no return type")]
    MissingReturnType { symbol: String },
}

/// The top-level document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeDump {
    #[serde(default)]
    pub declarations: Vec<DeclDump>,
}

/// One declaration and its children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclDump {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: DumpKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceOrigin>,
    /// Set when an earlier stage already excluded the declaration.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignored: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeclDump>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DumpKind {
    Namespace,
    Class,
    Enum,
    EnumValue,
    TypeAlias,
    ClassTemplate,
    FunctionTemplate,
    Function {
        #[serde(default)]
        return_type: Option<CppType>,
        #[serde(default)]
        parameters: Vec<Parameter>,
    },
    MemberFunction {
        #[serde(default)]
        return_type: Option<CppType>,
        #[serde(default)]
        parameters: Vec<Parameter>,
    },
    Constructor {
        #[serde(default)]
        parameters: Vec<Parameter>,
    },
    Destructor,
    Variable {
        #[serde(rename = "type")]
        ty: CppType,
    },
    MemberVariable {
        #[serde(rename = "type")]
        ty: CppType,
    },
    Unexposed,
}

impl DumpKind {
    fn into_decl_kind(self, symbol: impl FnOnce() -> String) -> Result<DeclKind, TreeError> {
        let kind = match self {
            DumpKind::Namespace => DeclKind::Namespace,
            DumpKind::Class => DeclKind::Class,
            DumpKind::Enum => DeclKind::Enum,
            DumpKind::EnumValue => DeclKind::EnumValue,
            DumpKind::TypeAlias => DeclKind::TypeAlias,
            DumpKind::ClassTemplate => DeclKind::ClassTemplate,
            DumpKind::FunctionTemplate => DeclKind::FunctionTemplate,
            DumpKind::Function { return_type, parameters } => {
                let return_type = return_type.ok_or_else(|| TreeError::MissingReturnType { symbol: symbol() })?;
                DeclKind::Function(Function::free(return_type, parameters))
            }
            DumpKind::MemberFunction { return_type, parameters } => {
                let return_type = return_type.ok_or_else(|| TreeError::MissingReturnType { symbol: symbol() })?;
                DeclKind::Function(Function::member(return_type, parameters))
            }
            DumpKind::Constructor { parameters } => DeclKind::Function(Function::constructor(parameters)),
            DumpKind::Destructor => DeclKind::Function(Function::destructor()),
            DumpKind::Variable { ty } => DeclKind::Variable(Variable { ty, member: false }),
            DumpKind::MemberVariable { ty } => DeclKind::Variable(Variable { ty, member: true }),
            DumpKind::Unexposed => DeclKind::Unexposed,
        };
        Ok(kind)
    }

    fn from_decl_kind(kind: &DeclKind) -> Option<Self> {
        let dump = match kind {
            DeclKind::Root => return None,
            DeclKind::Namespace => DumpKind::Namespace,
            DeclKind::Class => DumpKind::Class,
            DeclKind::Enum => DumpKind::Enum,
            DeclKind::EnumValue => DumpKind::EnumValue,
            DeclKind::TypeAlias => DumpKind::TypeAlias,
            DeclKind::ClassTemplate => DumpKind::ClassTemplate,
            DeclKind::FunctionTemplate => DumpKind::FunctionTemplate,
            DeclKind::Function(f) => {
                let parameters = f.parameters.clone();
                match f.kind() {
                    FunctionKind::Free => DumpKind::Function { return_type: f.return_type().cloned(), parameters },
                    FunctionKind::Member => {
                        DumpKind::MemberFunction { return_type: f.return_type().cloned(), parameters }
                    }
                    FunctionKind::Constructor => DumpKind::Constructor { parameters },
                    FunctionKind::Destructor => DumpKind::Destructor,
                }
            }
            DeclKind::Variable(v) if v.member => DumpKind::MemberVariable { ty: v.ty.clone() },
            DeclKind::Variable(v) => DumpKind::Variable { ty: v.ty.clone() },
            DeclKind::Unexposed => DumpKind::Unexposed,
        };
        Some(dump)
    }
}

impl DeclarationTree {
    /// Rebuild a tree from its dump. Top-level declarations become children
    /// of the root.
    pub fn from_dump(dump: TreeDump) -> Result<Self, TreeError> {
        let mut tree = DeclarationTree::new();
        let root = tree.root();
        for decl in dump.declarations {
            tree.add_dump(root, decl)?;
        }
        Ok(tree)
    }

    fn add_dump(&mut self, parent: DeclId, dump: DeclDump) -> Result<(), TreeError> {
        let DeclDump { name, kind, source, ignored, children } = dump;
        let kind = kind.into_decl_kind(|| self.qualify(parent, &name))?;
        let id = self.add(parent, name, kind, source);
        if ignored {
            self.get_mut(id).ignore();
        }
        for child in children {
            self.add_dump(id, child)?;
        }
        Ok(())
    }

    /// The dump of this tree, ignore flags included.
    pub fn to_dump(&self) -> TreeDump {
        TreeDump {
            declarations: self.get(self.root()).children.iter().filter_map(|&id| self.dump_decl(id)).collect(),
        }
    }

    fn dump_decl(&self, id: DeclId) -> Option<DeclDump> {
        let decl = self.get(id);
        Some(DeclDump {
            name: decl.name.clone(),
            kind: DumpKind::from_decl_kind(&decl.kind)?,
            source: decl.source.clone(),
            ignored: decl.is_ignored(),
            children: decl.children.iter().filter_map(|&child| self.dump_decl(child)).collect(),
        })
    }
}

/// Parse a declaration tree from JSON text.
pub fn parse_tree(content: &str) -> Result<DeclarationTree, TreeError> {
    let dump: TreeDump = serde_json::from_str(content)?;
    DeclarationTree::from_dump(dump)
}

/// Read and parse a declaration tree file.
pub fn load_tree_file(path: impl AsRef<Path>) -> Result<DeclarationTree, TreeError> {
    let content = std::fs::read_to_string(path)?;
    parse_tree(&content)
}

/// Serialize a tree, ignore flags included, as pretty-printed JSON.
pub fn write_tree(tree: &DeclarationTree) -> Result<String, TreeError> {
    Ok(serde_json::to_string_pretty(&tree.to_dump())?)
}
