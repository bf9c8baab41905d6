//! Type tags carried by type declarations.
//!
//! Theta has three primitive value types (`Number`, `String`, `Boolean`),
//! function types, and user-defined type names (capsule types and enum
//! aliases). A [`DataType`] is only the *tag*; parameter signatures for
//! function types live in the type-declaration node that carries the tag.

use std::fmt::{self, Display, Formatter};

/// The type tag of a type declaration.
///
/// `Display` renders the canonical source spelling, which is also the
/// serialization used when deriving qualified function identifiers — two
/// logically equal types must render to byte-identical strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// The `Number` primitive (Theta numbers are a single numeric type).
    Number,
    /// The `String` primitive.
    String,
    /// The `Boolean` primitive.
    Boolean,
    /// A function type; parameter types are held by the owning declaration.
    Function,
    /// A user-defined type name, e.g. a capsule type or an enum alias.
    Named(std::string::String),
}

impl DataType {
    /// Resolve a source-level type name to its tag.
    ///
    /// Unknown names become [`DataType::Named`]; whether such a name is
    /// meaningful is the type checker's concern, not ours.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Number" => DataType::Number,
            "String" => DataType::String,
            "Boolean" => DataType::Boolean,
            "Function" => DataType::Function,
            _ => DataType::Named(name.to_string()),
        }
    }

    /// Whether this tag names one of the primitive value types.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            DataType::Number | DataType::String | DataType::Boolean
        )
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Number => write!(f, "Number"),
            DataType::String => write!(f, "String"),
            DataType::Boolean => write!(f, "Boolean"),
            DataType::Function => write!(f, "Function"),
            DataType::Named(name) => write!(f, "{name}"),
        }
    }
}
