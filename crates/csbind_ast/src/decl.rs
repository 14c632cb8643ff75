//! Declaration nodes and the arena that owns them.

use crate::types::CppType;
use csbind_core::source::SourceOrigin;
use serde::{Deserialize, Serialize};

/// Declaration ID for referencing nodes of a [`DeclarationTree`] by index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DeclId(pub u32);

impl DeclId {
    /// The synthetic root every tree starts with.
    pub const ROOT: DeclId = DeclId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Free,
    Member,
    Constructor,
    Destructor,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: CppType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: CppType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// A free function, member function, constructor or destructor.
///
/// Free and member functions always carry a return type; constructors and
/// destructors never do. The constructors below are the only way to build
/// one, so the pairing cannot be broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    kind: FunctionKind,
    return_type: Option<CppType>,
    pub parameters: Vec<Parameter>,
}

impl Function {
    pub fn free(return_type: CppType, parameters: Vec<Parameter>) -> Self {
        Self { kind: FunctionKind::Free, return_type: Some(return_type), parameters }
    }

    pub fn member(return_type: CppType, parameters: Vec<Parameter>) -> Self {
        Self { kind: FunctionKind::Member, return_type: Some(return_type), parameters }
    }

    pub fn constructor(parameters: Vec<Parameter>) -> Self {
        Self { kind: FunctionKind::Constructor, return_type: None, parameters }
    }

    pub fn destructor() -> Self {
        Self { kind: FunctionKind::Destructor, return_type: None, parameters: Vec::new() }
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// The declared return type; `None` for constructors and destructors.
    pub fn return_type(&self) -> Option<&CppType> {
        self.return_type.as_ref()
    }

    pub fn is_special_member(&self) -> bool {
        matches!(self.kind, FunctionKind::Constructor | FunctionKind::Destructor)
    }
}

/// A global, static or member variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub ty: CppType,
    pub member: bool,
}

/// The shape of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    /// The synthetic tree root.
    Root,
    Namespace,
    Class,
    Enum,
    EnumValue,
    TypeAlias,
    ClassTemplate,
    FunctionTemplate,
    Function(Function),
    Variable(Variable),
    Unexposed,
}

impl DeclKind {
    /// Containers get separate enter and exit visits during a walk.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            DeclKind::Root
                | DeclKind::Namespace
                | DeclKind::Class
                | DeclKind::Enum
                | DeclKind::ClassTemplate
                | DeclKind::FunctionTemplate
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeclKind::Root => "root",
            DeclKind::Namespace => "namespace",
            DeclKind::Class => "class",
            DeclKind::Enum => "enum",
            DeclKind::EnumValue => "enum value",
            DeclKind::TypeAlias => "type alias",
            DeclKind::ClassTemplate => "class template",
            DeclKind::FunctionTemplate => "function template",
            DeclKind::Function(f) => match f.kind() {
                FunctionKind::Free => "function",
                FunctionKind::Member => "member function",
                FunctionKind::Constructor => "constructor",
                FunctionKind::Destructor => "destructor",
            },
            DeclKind::Variable(v) if v.member => "member variable",
            DeclKind::Variable(_) => "variable",
            DeclKind::Unexposed => "unexposed",
        }
    }
}

/// A node of the declaration tree.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub id: DeclId,
    pub kind: DeclKind,
    /// Unqualified name. Empty for anonymous declarations.
    pub name: String,
    /// Fully qualified name (`Outer::Inner::name`). Empty for anonymous
    /// declarations and the root.
    pub symbol_name: String,
    /// `None` for declarations the generator synthesized itself.
    pub source: Option<SourceOrigin>,
    pub parent: Option<DeclId>,
    pub children: Vec<DeclId>,
    ignored: bool,
}

impl Declaration {
    /// Whether some pass decided this declaration cannot be bound.
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Exclude the declaration from binding. The flag is never cleared
    /// again. Returns `true` if the declaration was not ignored before.
    pub fn ignore(&mut self) -> bool {
        !std::mem::replace(&mut self.ignored, true)
    }
}

/// The declaration arena. Every tree has a synthetic root at [`DeclId::ROOT`].
#[derive(Debug, Clone)]
pub struct DeclarationTree {
    decls: Vec<Declaration>,
}

impl DeclarationTree {
    pub fn new() -> Self {
        let root = Declaration {
            id: DeclId::ROOT,
            kind: DeclKind::Root,
            name: String::new(),
            symbol_name: String::new(),
            source: None,
            parent: None,
            children: Vec::new(),
            ignored: false,
        };
        Self { decls: vec![root] }
    }

    #[inline]
    pub fn root(&self) -> DeclId {
        DeclId::ROOT
    }

    /// Qualified name a child called `name` of `parent` gets. Anonymous
    /// scopes are transparent, as in C++.
    pub fn qualify(&self, parent: DeclId, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        let mut scope = Some(parent);
        while let Some(id) = scope {
            let decl = self.get(id);
            if !decl.symbol_name.is_empty() {
                return format!("{}::{}", decl.symbol_name, name);
            }
            scope = decl.parent;
        }
        name.to_string()
    }

    /// Append a declaration as the last child of `parent`.
    pub fn add(
        &mut self,
        parent: DeclId,
        name: impl Into<String>,
        kind: DeclKind,
        source: Option<SourceOrigin>,
    ) -> DeclId {
        let name = name.into();
        let id = DeclId(self.decls.len() as u32);
        let symbol_name = self.qualify(parent, &name);
        self.decls.push(Declaration {
            id,
            kind,
            name,
            symbol_name,
            source,
            parent: Some(parent),
            children: Vec::new(),
            ignored: false,
        });
        self.decls[parent.index()].children.push(id);
        id
    }

    /// Get a declaration by its ID.
    pub fn get(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    /// Get a mutable reference to a declaration by its ID.
    pub fn get_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.index()]
    }

    /// Declarations in insertion order, root first.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    /// Declarations some pass has ignored, in insertion order.
    pub fn ignored(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter().filter(|d| d.is_ignored())
    }

    /// First declaration with the given qualified name.
    pub fn find(&self, symbol_name: &str) -> Option<DeclId> {
        self.decls
            .iter()
            .skip(1)
            .find(|d| d.symbol_name == symbol_name)
            .map(|d| d.id)
    }

    /// Name used when reporting a declaration. Anonymous declarations show
    /// up as `<anonymous class>` and the like inside their named scope.
    pub fn display_name(&self, id: DeclId) -> String {
        let decl = self.get(id);
        if !decl.symbol_name.is_empty() {
            return decl.symbol_name.clone();
        }
        let placeholder = format!("<anonymous {}>", decl.kind.label());
        match decl.parent {
            Some(parent) => self.qualify(parent, &placeholder),
            None => placeholder,
        }
    }

    /// Number of declarations, the root included.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.len() == 1
    }
}

impl Default for DeclarationTree {
    fn default() -> Self {
        Self::new()
    }
}
