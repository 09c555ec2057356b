use once_cell::sync::Lazy;

use crate::hash::{tagged_iv, Midstate, TAG_PREFIX};
use crate::node::NodeTag;

/// Tagged initial values for one root domain, indexed by [`NodeTag`].
pub(crate) struct IvTable {
    ivs: Vec<Midstate>,
}

impl IvTable {
    fn new(domain: &str) -> Self {
        Self {
            ivs: NodeTag::ALL
                .iter()
                .map(|tag| tagged_iv(domain, tag.name()))
                .collect(),
        }
    }

    pub(crate) fn get(&self, tag: NodeTag) -> Midstate {
        self.ivs[tag as usize]
    }
}

pub(crate) static COMMITMENT: Lazy<IvTable> = Lazy::new(|| IvTable::new("Commitment"));

pub(crate) static ANNOTATED: Lazy<IvTable> = Lazy::new(|| IvTable::new("Annotated"));

pub(crate) static IDENTITY_WITNESS: Lazy<Midstate> =
    Lazy::new(|| tagged_iv("Identity", "witness"));

pub(crate) static IDENTITY_DISCONNECT: Lazy<Midstate> =
    Lazy::new(|| tagged_iv("Identity", "disconnect"));

/// IV of the second identity pass, which binds the node's arrow.
pub(crate) static IDENTITY_ROOT: Lazy<Midstate> =
    Lazy::new(|| Midstate::tagged(format!("{TAG_PREFIX}Identity").as_bytes()));
