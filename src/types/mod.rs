//! Simplicity types and type inference.
//!
//! Types are built from the unit type with sums and products. Every [`Type`]
//! is immutable and reference counted; the bit width and type Merkle root are
//! computed once when the type is constructed, so large shared types never
//! need a recursive walk.

mod error;
mod inference;

use core::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::hash::{tagged_iv, Digest256, Midstate};

pub use error::{TypeError, TypeShape};
pub use inference::infer_arrows;

struct TypeTags {
    unit: Digest256,
    sum: Midstate,
    product: Midstate,
}

static TYPE_TAGS: Lazy<TypeTags> = Lazy::new(|| TypeTags {
    unit: tagged_iv("Type", "unit").finish(),
    sum: tagged_iv("Type", "sum"),
    product: tagged_iv("Type", "prod"),
});

static UNIT: Lazy<Type> = Lazy::new(|| Type::from_kind(TypeKind::Unit));

static WORD_256: Lazy<Type> = Lazy::new(|| {
    let bit = Type::sum(Type::unit(), Type::unit());
    (0..8).fold(bit, |word, _| Type::product(word.clone(), word))
});

/// Structure of a type.
#[derive(Clone)]
pub enum TypeKind {
    /// The unit type `1`.
    Unit,
    /// The sum `A + B`.
    Sum(Type, Type),
    /// The product `A × B`.
    Product(Type, Type),
}

struct TypeInner {
    kind: TypeKind,
    bit_width: u64,
    tmr: Digest256,
}

impl Drop for TypeInner {
    // Deep chains of uniquely owned types would otherwise be freed recursively.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let TypeKind::Sum(left, right) | TypeKind::Product(left, right) =
            core::mem::replace(&mut self.kind, TypeKind::Unit)
        {
            pending.push(left);
            pending.push(right);
        }
        while let Some(ty) = pending.pop() {
            if let Ok(mut inner) = Arc::try_unwrap(ty.0) {
                if let TypeKind::Sum(left, right) | TypeKind::Product(left, right) =
                    core::mem::replace(&mut inner.kind, TypeKind::Unit)
                {
                    pending.push(left);
                    pending.push(right);
                }
            }
        }
    }
}

/// A finalized Simplicity type.
///
/// Equality compares type Merkle roots.
#[derive(Clone)]
pub struct Type(Arc<TypeInner>);

impl Type {
    fn from_kind(kind: TypeKind) -> Self {
        let (bit_width, tmr) = match &kind {
            TypeKind::Unit => (0, TYPE_TAGS.unit),
            TypeKind::Sum(left, right) => (
                1u64.saturating_add(left.bit_width().max(right.bit_width())),
                TYPE_TAGS.sum.update(left.tmr(), right.tmr()).finish(),
            ),
            TypeKind::Product(left, right) => (
                left.bit_width().saturating_add(right.bit_width()),
                TYPE_TAGS.product.update(left.tmr(), right.tmr()).finish(),
            ),
        };
        Type(Arc::new(TypeInner {
            kind,
            bit_width,
            tmr,
        }))
    }

    /// The unit type `1`.
    pub fn unit() -> Self {
        UNIT.clone()
    }

    /// The sum type `left + right`.
    pub fn sum(left: Type, right: Type) -> Self {
        Self::from_kind(TypeKind::Sum(left, right))
    }

    /// The product type `left × right`.
    pub fn product(left: Type, right: Type) -> Self {
        Self::from_kind(TypeKind::Product(left, right))
    }

    /// The two-valued type `2 = 1 + 1`.
    pub fn bit() -> Self {
        Self::sum(Self::unit(), Self::unit())
    }

    /// The 256-bit word type `2^256`.
    pub fn word256() -> Self {
        WORD_256.clone()
    }

    /// Returns the structure of the type.
    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    /// Returns the shape of the outermost constructor.
    pub fn shape(&self) -> TypeShape {
        match self.kind() {
            TypeKind::Unit => TypeShape::Unit,
            TypeKind::Sum(..) => TypeShape::Sum,
            TypeKind::Product(..) => TypeShape::Product,
        }
    }

    /// Number of bits a value of this type occupies on the machine.
    ///
    /// Saturates at `u64::MAX` for absurdly large types.
    pub fn bit_width(&self) -> u64 {
        self.0.bit_width
    }

    /// Type Merkle root.
    pub fn tmr(&self) -> Digest256 {
        self.0.tmr
    }

    /// Splits a sum type into its branches.
    pub fn as_sum(&self) -> Option<(&Type, &Type)> {
        match self.kind() {
            TypeKind::Sum(left, right) => Some((left, right)),
            _ => None,
        }
    }

    /// Splits a product type into its components.
    pub fn as_product(&self) -> Option<(&Type, &Type)> {
        match self.kind() {
            TypeKind::Product(left, right) => Some((left, right)),
            _ => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.tmr() == other.tmr()
    }
}

impl Eq for Type {}

enum Token<'a> {
    Type(&'a Type),
    Text(&'static str),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Token::Type(self)];
        while let Some(token) = stack.pop() {
            match token {
                Token::Text(text) => f.write_str(text)?,
                Token::Type(ty) => match ty.kind() {
                    TypeKind::Unit => f.write_str("1")?,
                    TypeKind::Sum(left, right) | TypeKind::Product(left, right) => {
                        let op = if ty.shape() == TypeShape::Sum {
                            " + "
                        } else {
                            " × "
                        };
                        stack.push(Token::Text(")"));
                        stack.push(Token::Type(right));
                        stack.push(Token::Text(op));
                        stack.push(Token::Type(left));
                        stack.push(Token::Text("("));
                    }
                },
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

/// Source and target type of a typed node, written `source ⊢ target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrow {
    /// Input type.
    pub source: Type,
    /// Output type.
    pub target: Type,
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ⊢ {}", self.source, self.target)
    }
}
