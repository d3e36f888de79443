//! Variable symbols and the type tags the lowerer needs to know about.

use std::fmt;
use std::rc::Rc;

/// The type tags the lowerer needs to reason about.
///
/// `Other` carries through any type the binder produced that isn't `Int` or
/// `Bool` (structs, arrays, whatever the surrounding language has) without
/// the lowerer needing to understand it — it never synthesizes expressions
/// of such a type, it only ever passes existing ones along unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
    Other(Rc<str>),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

struct VariableSymbolData {
    name: String,
    is_read_only: bool,
    ty: Type,
}

/// A resolved variable symbol.
///
/// Equality and hashing are by *identity* (the underlying `Rc` pointer),
/// not by name: two synthesized symbols with the same textual name (e.g.
/// `upperBound` from two sibling `for` loops flattened into the same block)
/// must remain distinguishable, the same way the binder's own symbol table
/// distinguishes shadowed declarations by definition id rather than by name.
#[derive(Clone)]
pub struct VariableSymbol(Rc<VariableSymbolData>);

impl VariableSymbol {
    pub fn new(name: impl Into<String>, is_read_only: bool, ty: Type) -> Self {
        Self(Rc::new(VariableSymbolData {
            name: name.into(),
            is_read_only,
            ty,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// An opaque identity for this symbol, stable for its lifetime and
    /// distinct from every other symbol's, even ones sharing its name.
    /// Useful to callers (interpreters, codegen backends) that want to key
    /// a side table by symbol without depending on `Rc` internals.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub const fn is_read_only(&self) -> bool {
        self.0.is_read_only
    }

    pub const fn ty(&self) -> &Type {
        &self.0.ty
    }
}

impl fmt::Debug for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableSymbol")
            .field("name", &self.0.name)
            .field("is_read_only", &self.0.is_read_only)
            .field("ty", &self.0.ty)
            .field("id", &Rc::as_ptr(&self.0))
            .finish()
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariableSymbol {}

impl std::hash::Hash for VariableSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}
