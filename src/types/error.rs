use core::fmt;

/// Outermost constructor of a type, used to describe unification failures
/// without rendering potentially huge types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// The unit type.
    Unit,
    /// A sum type.
    Sum,
    /// A product type.
    Product,
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Unit => write!(f, "unit"),
            TypeShape::Sum => write!(f, "sum"),
            TypeShape::Product => write!(f, "product"),
        }
    }
}

/// Failure raised while inferring the types of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Two incompatible type constructors had to be equal.
    #[error("node {node}: cannot unify {left} with {right}")]
    Unify {
        /// Index of the node whose constraint failed.
        node: usize,
        /// Constructor already bound on one side.
        left: TypeShape,
        /// Constructor required by the constraint.
        right: TypeShape,
    },
    /// A type would have to contain itself.
    #[error("node {node}: infinite type")]
    OccursCheck {
        /// Index of the node whose type is recursive.
        node: usize,
    },
}
