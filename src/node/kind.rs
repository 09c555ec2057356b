use core::fmt;

use crate::hash::Digest256;

/// Position of a node inside an expression or builder arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw node index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw node index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A combinator node with references to its children.
///
/// `AssertL(s, h)` and `AssertR(h, t)` are cases whose hidden branch `h` has
/// been pruned; they serialize with the `case` code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// `iden : A ⊢ A`.
    Iden,
    /// `unit : A ⊢ 1`.
    Unit,
    /// `injl t : A ⊢ B + C` for `t : A ⊢ B`.
    InjL(NodeId),
    /// `injr t : A ⊢ B + C` for `t : A ⊢ C`.
    InjR(NodeId),
    /// `take t : A × B ⊢ C` for `t : A ⊢ C`.
    Take(NodeId),
    /// `drop t : A × B ⊢ C` for `t : B ⊢ C`.
    Drop(NodeId),
    /// `comp s t : A ⊢ C` for `s : A ⊢ B` and `t : B ⊢ C`.
    Comp(NodeId, NodeId),
    /// `case s t : (A + B) × C ⊢ D` with both branches present.
    Case(NodeId, NodeId),
    /// Case keeping the left branch; the right child is hidden.
    AssertL(NodeId, NodeId),
    /// Case keeping the right branch; the left child is hidden.
    AssertR(NodeId, NodeId),
    /// `pair s t : A ⊢ B × C` for `s : A ⊢ B` and `t : A ⊢ C`.
    Pair(NodeId, NodeId),
    /// `disconnect s t : A ⊢ B × D` for `s : 2^256 × A ⊢ B × C` and
    /// `t : C ⊢ D`.
    Disconnect(NodeId, NodeId),
    /// A value supplied at redemption time.
    Witness,
    /// Pruned branch identified by its commitment root.
    Hidden(Digest256),
}

/// Discriminant of a [`Combinator`], used for tags and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeTag {
    /// [`Combinator::Iden`].
    Iden,
    /// [`Combinator::Unit`].
    Unit,
    /// [`Combinator::InjL`].
    InjL,
    /// [`Combinator::InjR`].
    InjR,
    /// [`Combinator::Take`].
    Take,
    /// [`Combinator::Drop`].
    Drop,
    /// [`Combinator::Comp`].
    Comp,
    /// [`Combinator::Case`].
    Case,
    /// [`Combinator::AssertL`].
    AssertL,
    /// [`Combinator::AssertR`].
    AssertR,
    /// [`Combinator::Pair`].
    Pair,
    /// [`Combinator::Disconnect`].
    Disconnect,
    /// [`Combinator::Witness`].
    Witness,
    /// [`Combinator::Hidden`].
    Hidden,
}

impl NodeTag {
    /// Every tag, in declaration order.
    pub const ALL: [NodeTag; 14] = [
        NodeTag::Iden,
        NodeTag::Unit,
        NodeTag::InjL,
        NodeTag::InjR,
        NodeTag::Take,
        NodeTag::Drop,
        NodeTag::Comp,
        NodeTag::Case,
        NodeTag::AssertL,
        NodeTag::AssertR,
        NodeTag::Pair,
        NodeTag::Disconnect,
        NodeTag::Witness,
        NodeTag::Hidden,
    ];

    /// Lowercase name used in hash tags.
    pub const fn name(self) -> &'static str {
        match self {
            NodeTag::Iden => "iden",
            NodeTag::Unit => "unit",
            NodeTag::InjL => "injl",
            NodeTag::InjR => "injr",
            NodeTag::Take => "take",
            NodeTag::Drop => "drop",
            NodeTag::Comp => "comp",
            NodeTag::Case => "case",
            NodeTag::AssertL => "assertl",
            NodeTag::AssertR => "assertr",
            NodeTag::Pair => "pair",
            NodeTag::Disconnect => "disconnect",
            NodeTag::Witness => "witness",
            NodeTag::Hidden => "hidden",
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Combinator {
    /// Returns the discriminant.
    pub const fn tag(&self) -> NodeTag {
        match self {
            Combinator::Iden => NodeTag::Iden,
            Combinator::Unit => NodeTag::Unit,
            Combinator::InjL(_) => NodeTag::InjL,
            Combinator::InjR(_) => NodeTag::InjR,
            Combinator::Take(_) => NodeTag::Take,
            Combinator::Drop(_) => NodeTag::Drop,
            Combinator::Comp(..) => NodeTag::Comp,
            Combinator::Case(..) => NodeTag::Case,
            Combinator::AssertL(..) => NodeTag::AssertL,
            Combinator::AssertR(..) => NodeTag::AssertR,
            Combinator::Pair(..) => NodeTag::Pair,
            Combinator::Disconnect(..) => NodeTag::Disconnect,
            Combinator::Witness => NodeTag::Witness,
            Combinator::Hidden(_) => NodeTag::Hidden,
        }
    }

    /// Children in left-to-right order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        let (left, right) = match *self {
            Combinator::Iden | Combinator::Unit | Combinator::Witness | Combinator::Hidden(_) => {
                (None, None)
            }
            Combinator::InjL(child)
            | Combinator::InjR(child)
            | Combinator::Take(child)
            | Combinator::Drop(child) => (Some(child), None),
            Combinator::Comp(left, right)
            | Combinator::Case(left, right)
            | Combinator::AssertL(left, right)
            | Combinator::AssertR(left, right)
            | Combinator::Pair(left, right)
            | Combinator::Disconnect(left, right) => (Some(left), Some(right)),
        };
        left.into_iter().chain(right)
    }

    /// Rewrites every child reference with `f`.
    pub fn map_children(&self, mut f: impl FnMut(NodeId) -> NodeId) -> Combinator {
        match *self {
            Combinator::InjL(child) => Combinator::InjL(f(child)),
            Combinator::InjR(child) => Combinator::InjR(f(child)),
            Combinator::Take(child) => Combinator::Take(f(child)),
            Combinator::Drop(child) => Combinator::Drop(f(child)),
            Combinator::Comp(left, right) => Combinator::Comp(f(left), f(right)),
            Combinator::Case(left, right) => Combinator::Case(f(left), f(right)),
            Combinator::AssertL(left, right) => Combinator::AssertL(f(left), f(right)),
            Combinator::AssertR(left, right) => Combinator::AssertR(f(left), f(right)),
            Combinator::Pair(left, right) => Combinator::Pair(f(left), f(right)),
            Combinator::Disconnect(left, right) => Combinator::Disconnect(f(left), f(right)),
            other => other,
        }
    }

    /// Returns `true` for pruned branches.
    pub const fn is_hidden(&self) -> bool {
        matches!(self, Combinator::Hidden(_))
    }
}
