//! Static resource bounds of an expression.
//!
//! Cost is measured in milli weight units: every combinator pays a fixed
//! overhead of [`OVERHEAD`] plus the bits it copies on the bit machine.
//! Alongside cost, [`NodeBounds`] tracks the extra cells and frames a node
//! needs beyond its input and output. All arithmetic saturates, and every
//! rule only adds non-negative terms or takes a maximum, so replacing a
//! subexpression with a costlier one never lowers the total.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::DecodeResult;
use crate::node::{Combinator, Expression};
use crate::types::Type;

/// Fixed per-combinator cost in milli weight units.
pub const OVERHEAD: u32 = 100;

/// Execution cost in milli weight units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cost(u32);

impl Cost {
    /// Zero cost.
    pub const ZERO: Cost = Cost(0);

    /// Wraps a raw milli weight amount.
    pub const fn from_milli_weight(milli: u32) -> Self {
        Cost(milli)
    }

    /// Raw milli weight amount.
    pub const fn milli_weight(self) -> u32 {
        self.0
    }

    /// Weight units, rounded up.
    pub const fn weight(self) -> u32 {
        self.0 / 1000 + (self.0 % 1000 != 0) as u32
    }

    fn plus(self, milli: u64) -> Cost {
        let milli = u32::try_from(milli).unwrap_or(u32::MAX);
        Cost(self.0.saturating_add(milli))
    }

    fn then(self, other: Cost) -> Cost {
        Cost(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mWU", self.0)
    }
}

/// Resource bounds of a node and everything below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeBounds {
    /// Execution cost.
    pub cost: Cost,
    /// Cells allocated beyond the input and output frames.
    pub extra_cells: u64,
    /// Frames allocated beyond the input and output frames.
    pub extra_frames: u64,
}

impl NodeBounds {
    fn max_of(left: &NodeBounds, right: &NodeBounds) -> (u64, u64) {
        (
            left.extra_cells.max(right.extra_cells),
            left.extra_frames.max(right.extra_frames),
        )
    }
}

fn width(ty: &Type) -> u64 {
    ty.bit_width()
}

/// Bounds of every node, in node order. Hidden nodes are free.
pub fn node_bounds(expr: &Expression) -> DecodeResult<Vec<NodeBounds>> {
    let mut bounds: Vec<NodeBounds> = Vec::with_capacity(expr.len());
    for (id, node, _) in expr.iter() {
        let base = Cost(OVERHEAD);
        let bound = match *node {
            Combinator::Hidden(_) => NodeBounds::default(),
            Combinator::Iden => NodeBounds {
                cost: base.plus(width(&expr.typed_arrow(id)?.source)),
                ..NodeBounds::default()
            },
            Combinator::Unit => NodeBounds {
                cost: base,
                ..NodeBounds::default()
            },
            Combinator::Witness => NodeBounds {
                cost: base.plus(width(&expr.typed_arrow(id)?.target)),
                ..NodeBounds::default()
            },
            Combinator::InjL(child)
            | Combinator::InjR(child)
            | Combinator::Take(child)
            | Combinator::Drop(child) => {
                let child = bounds[child.index()];
                NodeBounds {
                    cost: base.then(child.cost),
                    ..child
                }
            }
            Combinator::Comp(left, right) => {
                let middle = width(&expr.typed_arrow(left)?.target);
                let (l, r) = (bounds[left.index()], bounds[right.index()]);
                let (cells, frames) = NodeBounds::max_of(&l, &r);
                NodeBounds {
                    cost: base.plus(middle).then(l.cost).then(r.cost),
                    extra_cells: middle.saturating_add(cells),
                    extra_frames: frames.saturating_add(1),
                }
            }
            Combinator::Pair(left, right) => {
                let (l, r) = (bounds[left.index()], bounds[right.index()]);
                let (extra_cells, extra_frames) = NodeBounds::max_of(&l, &r);
                NodeBounds {
                    cost: base.then(l.cost).then(r.cost),
                    extra_cells,
                    extra_frames,
                }
            }
            Combinator::Case(left, right)
            | Combinator::AssertL(left, right)
            | Combinator::AssertR(left, right) => {
                let (l, r) = (bounds[left.index()], bounds[right.index()]);
                let (extra_cells, extra_frames) = NodeBounds::max_of(&l, &r);
                NodeBounds {
                    cost: base.then(l.cost.max(r.cost)),
                    extra_cells,
                    extra_frames,
                }
            }
            Combinator::Disconnect(left, right) => {
                let left_arrow = expr.typed_arrow(left)?;
                let copied = width(&left_arrow.source).saturating_add(width(&left_arrow.target));
                let (l, r) = (bounds[left.index()], bounds[right.index()]);
                let (cells, frames) = NodeBounds::max_of(&l, &r);
                NodeBounds {
                    cost: base.plus(copied).then(l.cost).then(r.cost),
                    extra_cells: copied.saturating_add(cells),
                    extra_frames: frames.saturating_add(2),
                }
            }
        };
        bounds.push(bound);
    }
    Ok(bounds)
}

/// Bounds of the whole expression.
pub fn bounds(expr: &Expression) -> DecodeResult<NodeBounds> {
    Ok(node_bounds(expr)?.last().copied().unwrap_or_default())
}

/// Cost of the whole expression.
pub fn cost(expr: &Expression) -> DecodeResult<Cost> {
    Ok(bounds(expr)?.cost)
}
