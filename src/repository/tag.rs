use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::UpdateResult;
use crate::domain::product::Product as DomainProduct;
use crate::domain::product_tag::{LinkSide, ProductTag as DomainProductTag};
use crate::domain::tag::{
    NewTag as DomainNewTag, Tag as DomainTag, TagWithProducts, UpdateTag as DomainUpdateTag,
};
use crate::models::product::Product as DbProduct;
use crate::models::product_tag::ProductTag as DbProductTag;
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::product_tag::{create_links, reconcile_links};
use crate::repository::{DieselRepository, TagReader, TagWriter};

impl TagReader for DieselRepository {
    fn list_tags(&self) -> RepositoryResult<Vec<TagWithProducts>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let tags = tags::table
            .order(tags::id.asc())
            .load::<DbTag>(&mut conn)?;

        attach_products(&mut conn, tags)
    }

    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<TagWithProducts>> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let tag = tags::table
            .find(id)
            .first::<DbTag>(&mut conn)
            .optional()?;

        match tag {
            Some(tag) => Ok(attach_products(&mut conn, vec![tag])?.pop()),
            None => Ok(None),
        }
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(
        &self,
        new_tag: &DomainNewTag,
    ) -> RepositoryResult<(DomainTag, Vec<DomainProductTag>)> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let insertable = DbNewTag::from(new_tag);

            let created = diesel::insert_into(tags::table)
                .values(&insertable)
                .get_result::<DbTag>(conn)?;

            let links = create_links(conn, LinkSide::Tag, created.id, &new_tag.product_ids)?;

            Ok((created.into(), links))
        })
    }

    fn update_tag(
        &self,
        tag_id: i32,
        updates: &DomainUpdateTag,
    ) -> RepositoryResult<UpdateResult> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let affected = if updates.has_no_column_changes() {
                usize::from(tag_exists(conn, tag_id)?)
            } else {
                let db_updates = DbUpdateTag::from(updates);
                diesel::update(tags::table.find(tag_id))
                    .set(&db_updates)
                    .execute(conn)?
            };

            let mut result = UpdateResult::rows(affected);

            if affected > 0 {
                if let Some(product_ids) = updates.product_ids.as_deref() {
                    let changes = reconcile_links(conn, LinkSide::Tag, tag_id, product_ids)?;
                    result = result.with_links(changes);
                }
            }

            Ok(result)
        })
    }

    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<usize> {
        use crate::schema::tags;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(tags::table.find(tag_id)).execute(&mut conn)?;

        Ok(deleted)
    }
}

fn attach_products(
    conn: &mut SqliteConnection,
    tags: Vec<DbTag>,
) -> RepositoryResult<Vec<TagWithProducts>> {
    use crate::schema::products;

    if tags.is_empty() {
        return Ok(Vec::new());
    }

    let products = DbProductTag::belonging_to(&tags)
        .inner_join(products::table)
        .select((DbProductTag::as_select(), DbProduct::as_select()))
        .order(products::id.asc())
        .load::<(DbProductTag, DbProduct)>(conn)?
        .grouped_by(&tags);

    Ok(tags
        .into_iter()
        .zip(products)
        .map(|(tag, links)| {
            TagWithProducts::new(
                tag.into(),
                links
                    .into_iter()
                    .map(|(_, product)| DomainProduct::from(product))
                    .collect(),
            )
        })
        .collect())
}

fn tag_exists(conn: &mut SqliteConnection, tag_id: i32) -> RepositoryResult<bool> {
    use crate::schema::tags;

    let exists = select(exists(tags::table.find(tag_id))).get_result::<bool>(conn)?;

    Ok(exists)
}
