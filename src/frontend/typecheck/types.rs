//! 类型表示
//!
//! Static types of the expression language. `Dyn` is assignable to and from
//! every type, which keeps values of unknown shape checkable.

use std::fmt;

/// Static type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Bool,
    Int,
    Uint,
    Double,
    String,
    List(Box<Type>),
    Map(Box<Type>, Box<Type>),
    Dyn,
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn map(
        key: Type,
        value: Type,
    ) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }

    /// Whether a value of type `other` may be passed where `self` is expected
    pub fn is_assignable_from(
        &self,
        other: &Type,
    ) -> bool {
        match (self, other) {
            (Type::Dyn, _) | (_, Type::Dyn) => true,
            (Type::List(a), Type::List(b)) => a.is_assignable_from(b),
            (Type::Map(ka, va), Type::Map(kb, vb)) => {
                ka.is_assignable_from(kb) && va.is_assignable_from(vb)
            }
            (a, b) => a == b,
        }
    }

    /// Most specific type covering both, `Dyn` when they disagree
    pub fn join(
        &self,
        other: &Type,
    ) -> Type {
        match (self, other) {
            (a, b) if a == b => a.clone(),
            (Type::List(a), Type::List(b)) => Type::list(a.join(b)),
            (Type::Map(ka, va), Type::Map(kb, vb)) => Type::map(ka.join(kb), va.join(vb)),
            _ => Type::Dyn,
        }
    }

    /// Join over a sequence; `Dyn` when empty
    pub fn join_all<'a>(types: impl IntoIterator<Item = &'a Type>) -> Type {
        let mut iter = types.into_iter();
        let Some(first) = iter.next() else {
            return Type::Dyn;
        };
        iter.fold(first.clone(), |acc, t| acc.join(t))
    }

    /// Types usable as map keys
    pub fn is_valid_map_key(&self) -> bool {
        matches!(
            self,
            Type::Bool | Type::Int | Type::Uint | Type::String | Type::Dyn
        )
    }
}

impl fmt::Display for Type {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Type::Null => write!(f, "null_type"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Uint => write!(f, "uint"),
            Type::Double => write!(f, "double"),
            Type::String => write!(f, "string"),
            Type::List(elem) => write!(f, "list({})", elem),
            Type::Map(key, value) => write!(f, "map({}, {})", key, value),
            Type::Dyn => write!(f, "dyn"),
        }
    }
}
