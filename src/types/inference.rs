use tracing::{debug, trace};

use super::{Arrow, Type, TypeError, TypeShape};
use crate::node::Combinator;

type VarId = usize;

#[derive(Debug, Clone, Copy)]
enum Bound {
    Free,
    Unit,
    Sum(VarId, VarId),
    Product(VarId, VarId),
}

impl Bound {
    fn shape(self) -> TypeShape {
        match self {
            Bound::Free | Bound::Unit => TypeShape::Unit,
            Bound::Sum(..) => TypeShape::Sum,
            Bound::Product(..) => TypeShape::Product,
        }
    }
}

/// Union-find over type variables.
///
/// Every operation is iterative: unification keeps an explicit worklist and
/// `find` compresses paths in a second loop.
struct Unifier {
    parent: Vec<VarId>,
    rank: Vec<u8>,
    bound: Vec<Bound>,
    word256: Option<VarId>,
}

impl Unifier {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
            bound: Vec::with_capacity(capacity),
            word256: None,
        }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn var(&mut self, bound: Bound) -> VarId {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        self.bound.push(bound);
        id
    }

    fn fresh(&mut self) -> VarId {
        self.var(Bound::Free)
    }

    fn find(&mut self, var: VarId) -> VarId {
        let mut root = var;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = var;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn link(&mut self, a: VarId, b: VarId, bound: Bound) {
        let (root, child) = if self.rank[a] < self.rank[b] {
            (b, a)
        } else {
            (a, b)
        };
        if self.rank[root] == self.rank[child] {
            self.rank[root] = self.rank[root].saturating_add(1);
        }
        self.parent[child] = root;
        self.bound[root] = bound;
    }

    fn unify(&mut self, a: VarId, b: VarId, node: usize) -> Result<(), TypeError> {
        let mut work = vec![(a, b)];
        while let Some((a, b)) = work.pop() {
            let (a, b) = (self.find(a), self.find(b));
            if a == b {
                continue;
            }
            let merged = match (self.bound[a], self.bound[b]) {
                (Bound::Free, other) | (other, Bound::Free) => other,
                (Bound::Unit, Bound::Unit) => Bound::Unit,
                (Bound::Sum(l1, r1), Bound::Sum(l2, r2))
                | (Bound::Product(l1, r1), Bound::Product(l2, r2)) => {
                    work.push((r1, r2));
                    work.push((l1, l2));
                    self.bound[a]
                }
                (left, right) => {
                    return Err(TypeError::Unify {
                        node,
                        left: left.shape(),
                        right: right.shape(),
                    })
                }
            };
            self.link(a, b, merged);
        }
        Ok(())
    }

    fn bind(&mut self, var: VarId, bound: Bound, node: usize) -> Result<(), TypeError> {
        let shaped = self.var(bound);
        self.unify(var, shaped, node)
    }

    fn word256(&mut self) -> VarId {
        if let Some(word) = self.word256 {
            return word;
        }
        let unit = self.var(Bound::Unit);
        let mut word = self.var(Bound::Sum(unit, unit));
        for _ in 0..8 {
            word = self.var(Bound::Product(word, word));
        }
        self.word256 = Some(word);
        word
    }

    /// Adds the typing constraints of node `index`; `vars` already holds the
    /// source and target variables of the node and all of its children.
    fn constrain(
        &mut self,
        index: usize,
        node: &Combinator,
        vars: &[(VarId, VarId)],
    ) -> Result<(), TypeError> {
        let (source, target) = vars[index];
        match *node {
            Combinator::Iden => self.unify(source, target, index),
            Combinator::Unit => self.bind(target, Bound::Unit, index),
            Combinator::InjL(child) | Combinator::InjR(child) => {
                let (child_source, child_target) = vars[child.index()];
                self.unify(source, child_source, index)?;
                let other = self.fresh();
                let sum = if matches!(node, Combinator::InjL(_)) {
                    Bound::Sum(child_target, other)
                } else {
                    Bound::Sum(other, child_target)
                };
                self.bind(target, sum, index)
            }
            Combinator::Take(child) | Combinator::Drop(child) => {
                let (child_source, child_target) = vars[child.index()];
                let other = self.fresh();
                let product = if matches!(node, Combinator::Take(_)) {
                    Bound::Product(child_source, other)
                } else {
                    Bound::Product(other, child_source)
                };
                self.bind(source, product, index)?;
                self.unify(target, child_target, index)
            }
            Combinator::Comp(left, right) => {
                let (left_source, left_target) = vars[left.index()];
                let (right_source, right_target) = vars[right.index()];
                self.unify(source, left_source, index)?;
                self.unify(left_target, right_source, index)?;
                self.unify(target, right_target, index)
            }
            Combinator::Pair(left, right) => {
                let (left_source, left_target) = vars[left.index()];
                let (right_source, right_target) = vars[right.index()];
                self.unify(source, left_source, index)?;
                self.unify(source, right_source, index)?;
                self.bind(target, Bound::Product(left_target, right_target), index)
            }
            Combinator::Case(left, right)
            | Combinator::AssertL(left, right)
            | Combinator::AssertR(left, right) => {
                let a = self.fresh();
                let b = self.fresh();
                let c = self.fresh();
                let sum = self.var(Bound::Sum(a, b));
                self.bind(source, Bound::Product(sum, c), index)?;
                if !matches!(node, Combinator::AssertR(..)) {
                    let (left_source, left_target) = vars[left.index()];
                    self.bind(left_source, Bound::Product(a, c), index)?;
                    self.unify(target, left_target, index)?;
                }
                if !matches!(node, Combinator::AssertL(..)) {
                    let (right_source, right_target) = vars[right.index()];
                    self.bind(right_source, Bound::Product(b, c), index)?;
                    self.unify(target, right_target, index)?;
                }
                Ok(())
            }
            Combinator::Disconnect(left, right) => {
                let (left_source, left_target) = vars[left.index()];
                let (right_source, right_target) = vars[right.index()];
                let word = self.word256();
                self.bind(left_source, Bound::Product(word, source), index)?;
                let b = self.fresh();
                self.bind(left_target, Bound::Product(b, right_source), index)?;
                self.bind(target, Bound::Product(b, right_target), index)
            }
            Combinator::Witness | Combinator::Hidden(_) => Ok(()),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Converts solved variables into [`Type`]s, sharing one `Type` per
/// equivalence class. Free variables become the unit type.
struct Finalizer {
    types: Vec<Option<Type>>,
    marks: Vec<Mark>,
}

impl Finalizer {
    fn new(vars: usize) -> Self {
        Self {
            types: vec![None; vars],
            marks: vec![Mark::Unvisited; vars],
        }
    }

    fn finalize(&mut self, uf: &mut Unifier, var: VarId, node: usize) -> Result<Type, TypeError> {
        let root = uf.find(var);
        let mut stack = vec![(root, false)];
        while let Some((var, expanded)) = stack.pop() {
            if expanded {
                let ty = match uf.bound[var] {
                    Bound::Free | Bound::Unit => Type::unit(),
                    Bound::Sum(left, right) => {
                        let (left, right) = self.children(uf, left, right);
                        Type::sum(left, right)
                    }
                    Bound::Product(left, right) => {
                        let (left, right) = self.children(uf, left, right);
                        Type::product(left, right)
                    }
                };
                self.types[var] = Some(ty);
                self.marks[var] = Mark::Done;
                continue;
            }
            match self.marks[var] {
                Mark::Done => continue,
                Mark::InProgress => return Err(TypeError::OccursCheck { node }),
                Mark::Unvisited => {}
            }
            self.marks[var] = Mark::InProgress;
            stack.push((var, true));
            if let Bound::Sum(left, right) | Bound::Product(left, right) = uf.bound[var] {
                let (left, right) = (uf.find(left), uf.find(right));
                stack.push((right, false));
                stack.push((left, false));
            }
        }
        Ok(self.types[root].clone().unwrap_or_else(Type::unit))
    }

    fn children(&self, uf: &mut Unifier, left: VarId, right: VarId) -> (Type, Type) {
        let left = uf.find(left);
        let right = uf.find(right);
        let get = |var: VarId| self.types[var].clone().unwrap_or_else(Type::unit);
        (get(left), get(right))
    }
}

/// Infers the arrow of every node of a canonically ordered expression whose
/// root is the last node.
///
/// Hidden nodes carry no type and map to `None`. The root is constrained to
/// `1 ⊢ 1` and unconstrained variables default to the unit type.
pub fn infer_arrows(nodes: &[Combinator]) -> Result<Vec<Option<Arrow>>, TypeError> {
    let mut uf = Unifier::with_capacity(nodes.len() * 4);
    let mut vars = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        let source = uf.fresh();
        let target = uf.fresh();
        vars.push((source, target));
        uf.constrain(index, node, &vars)?;
        trace!(node = index, combinator = node.tag().name(), "constrained");
    }

    if let Some(&(source, target)) = vars.last() {
        let root = vars.len() - 1;
        uf.bind(source, Bound::Unit, root)?;
        uf.bind(target, Bound::Unit, root)?;
    }

    let mut finalizer = Finalizer::new(uf.len());
    let mut arrows = Vec::with_capacity(nodes.len());
    for (index, (node, &(source, target))) in nodes.iter().zip(&vars).enumerate() {
        if matches!(node, Combinator::Hidden(_)) {
            arrows.push(None);
            continue;
        }
        let source = finalizer.finalize(&mut uf, source, index)?;
        let target = finalizer.finalize(&mut uf, target, index)?;
        arrows.push(Some(Arrow { source, target }));
    }
    debug!(
        nodes = nodes.len(),
        variables = uf.len(),
        "type inference complete"
    );
    Ok(arrows)
}
