use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Domain representation linking a product to a tag record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductTag {
    /// Unique identifier of the product-tag association.
    pub id: i32,
    /// Identifier of the product the tag is attached to.
    pub product_id: i32,
    /// Identifier of the referenced tag record.
    pub tag_id: i32,
}

/// Payload required to associate an existing tag with a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NewProductTag {
    /// Identifier of the product receiving the tag.
    pub product_id: i32,
    /// Identifier of the tag being attached to the product.
    pub tag_id: i32,
}

impl NewProductTag {
    /// Construct a new association payload between a product and a tag.
    pub fn new(product_id: i32, tag_id: i32) -> Self {
        Self { product_id, tag_id }
    }
}

/// The side of the association that stays fixed while its links are edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSide {
    /// Links are keyed by `product_id`; the opposite side is the tag.
    Product,
    /// Links are keyed by `tag_id`; the opposite side is the product.
    Tag,
}

impl LinkSide {
    /// Identifier of the fixed side of `link`.
    pub fn owner_id(self, link: &ProductTag) -> i32 {
        match self {
            LinkSide::Product => link.product_id,
            LinkSide::Tag => link.tag_id,
        }
    }

    /// Identifier of the opposite side of `link`.
    pub fn other_id(self, link: &ProductTag) -> i32 {
        match self {
            LinkSide::Product => link.tag_id,
            LinkSide::Tag => link.product_id,
        }
    }

    /// Build the link between `owner_id` on this side and `other_id` on the other.
    pub fn link(self, owner_id: i32, other_id: i32) -> NewProductTag {
        match self {
            LinkSide::Product => NewProductTag::new(owner_id, other_id),
            LinkSide::Tag => NewProductTag::new(other_id, owner_id),
        }
    }

    /// Links from `owner_id` to each distinct id in `other_ids`, in request order.
    pub fn links(self, owner_id: i32, other_ids: &[i32]) -> Vec<NewProductTag> {
        distinct(other_ids)
            .into_iter()
            .map(|other_id| self.link(owner_id, other_id))
            .collect()
    }
}

/// Number of links inserted and removed by a reconciliation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkChanges {
    pub added: usize,
    pub removed: usize,
}

/// Changes required to turn the stored links of one owner into a requested set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPlan {
    /// Links to insert, one per requested id that is not linked yet.
    pub to_add: Vec<NewProductTag>,
    /// Primary keys of stored links whose opposite id was not requested.
    pub to_remove: Vec<i32>,
}

impl LinkPlan {
    /// Diff the `existing` links of `owner_id` against the `requested` opposite ids.
    ///
    /// Links already present are left in place, so applying the plan and then
    /// planning again with the same request yields an empty plan.
    pub fn between(
        side: LinkSide,
        owner_id: i32,
        existing: &[ProductTag],
        requested: &[i32],
    ) -> Self {
        let existing: Vec<&ProductTag> = existing
            .iter()
            .filter(|link| side.owner_id(link) == owner_id)
            .collect();
        let linked: HashSet<i32> = existing.iter().map(|link| side.other_id(link)).collect();
        let wanted: HashSet<i32> = requested.iter().copied().collect();

        let to_add = distinct(requested)
            .into_iter()
            .filter(|other_id| !linked.contains(other_id))
            .map(|other_id| side.link(owner_id, other_id))
            .collect();

        let to_remove = existing
            .iter()
            .filter(|link| !wanted.contains(&side.other_id(link)))
            .map(|link| link.id)
            .collect();

        Self { to_add, to_remove }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

fn distinct(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
