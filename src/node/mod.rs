//! Expression DAG representation.
//!
//! An [`Expression`] stores its nodes in canonical order: the left-to-right
//! post-order traversal from the root, visiting each shared node once. Child
//! references always point backwards and the root is the last node, so every
//! whole-expression computation in this crate is a single forward pass.

mod builder;
mod expression;
mod kind;

pub use builder::ExpressionBuilder;
pub use expression::Expression;
pub use kind::{Combinator, NodeId, NodeTag};
