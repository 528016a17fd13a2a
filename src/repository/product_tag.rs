//! Junction-row helpers shared by the product and tag repositories.
//!
//! Every function takes the caller's connection so it runs inside the
//! caller's transaction.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::product_tag::{
    LinkChanges, LinkPlan, LinkSide, NewProductTag as DomainNewProductTag,
    ProductTag as DomainProductTag,
};
use crate::models::product_tag::{NewProductTag as DbNewProductTag, ProductTag as DbProductTag};
use crate::repository::errors::RepositoryResult;

/// Load every link whose `side` column equals `owner_id`, oldest first.
pub(crate) fn load_links(
    conn: &mut SqliteConnection,
    side: LinkSide,
    owner_id: i32,
) -> RepositoryResult<Vec<DomainProductTag>> {
    let links = DbProductTag::owned_by(side, owner_id).load::<DbProductTag>(conn)?;

    Ok(links.into_iter().map(DomainProductTag::from).collect())
}

/// Link a freshly inserted owner to each distinct id in `other_ids` and return
/// the created rows.
pub(crate) fn create_links(
    conn: &mut SqliteConnection,
    side: LinkSide,
    owner_id: i32,
    other_ids: &[i32],
) -> RepositoryResult<Vec<DomainProductTag>> {
    let links = side.links(owner_id, other_ids);
    if links.is_empty() {
        return Ok(Vec::new());
    }

    insert_links(conn, &links)?;

    load_links(conn, side, owner_id)
}

/// Converge the links of `owner_id` onto exactly the `requested` opposite ids.
pub(crate) fn reconcile_links(
    conn: &mut SqliteConnection,
    side: LinkSide,
    owner_id: i32,
    requested: &[i32],
) -> RepositoryResult<LinkChanges> {
    use crate::schema::product_tags;

    let existing = load_links(conn, side, owner_id)?;
    let plan = LinkPlan::between(side, owner_id, &existing, requested);

    if plan.is_empty() {
        return Ok(LinkChanges::default());
    }

    let removed = if plan.to_remove.is_empty() {
        0
    } else {
        diesel::delete(product_tags::table.filter(product_tags::id.eq_any(&plan.to_remove)))
            .execute(conn)?
    };

    let added = insert_links(conn, &plan.to_add)?;

    log::debug!("Reconciled links for {side:?} {owner_id}: {added} added, {removed} removed");

    Ok(LinkChanges { added, removed })
}

fn insert_links(
    conn: &mut SqliteConnection,
    links: &[DomainNewProductTag],
) -> RepositoryResult<usize> {
    use crate::schema::product_tags;

    if links.is_empty() {
        return Ok(0);
    }

    let rows: Vec<DbNewProductTag> = links.iter().map(DbNewProductTag::from).collect();

    let inserted = diesel::insert_into(product_tags::table)
        .values(&rows)
        .execute(conn)?;

    Ok(inserted)
}
