use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::UpdateResult;
use crate::domain::category::Category as DomainCategory;
use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductDetails,
    UpdateProduct as DomainUpdateProduct,
};
use crate::domain::product_tag::{LinkSide, ProductTag as DomainProductTag};
use crate::domain::tag::Tag as DomainTag;
use crate::models::category::Category as DbCategory;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::models::product_tag::ProductTag as DbProductTag;
use crate::models::tag::Tag as DbTag;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::product_tag::{create_links, reconcile_links};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn list_products(&self) -> RepositoryResult<Vec<ProductDetails>> {
        let mut conn = self.conn()?;

        let rows = load_product_rows(&mut conn, None)?;

        attach_tags(&mut conn, rows)
    }

    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>> {
        let mut conn = self.conn()?;

        let rows = load_product_rows(&mut conn, Some(id))?;

        Ok(attach_tags(&mut conn, rows)?.pop())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(
        &self,
        new_product: &DomainNewProduct,
    ) -> RepositoryResult<(DomainProduct, Vec<DomainProductTag>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let db_new = DbNewProduct::from(new_product);

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            let links = create_links(conn, LinkSide::Product, created.id, &new_product.tag_ids)?;

            Ok((created.into(), links))
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<UpdateResult> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        // Take the write lock up front: a deferred transaction that reads first
        // fails with SQLITE_BUSY when it later upgrades to a writer.
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let affected = if updates.has_no_column_changes() {
                usize::from(product_exists(conn, product_id)?)
            } else {
                let db_updates = DbUpdateProduct::from(updates);
                diesel::update(products::table.find(product_id))
                    .set(&db_updates)
                    .execute(conn)?
            };

            let mut result = UpdateResult::rows(affected);

            if affected > 0 {
                if let Some(tag_ids) = updates.tag_ids.as_deref() {
                    let changes = reconcile_links(conn, LinkSide::Product, product_id, tag_ids)?;
                    result = result.with_links(changes);
                }
            }

            Ok(result)
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        // Links to tags are removed by the ON DELETE CASCADE on product_tags.
        let deleted = diesel::delete(products::table.find(product_id)).execute(&mut conn)?;

        Ok(deleted)
    }
}

fn load_product_rows(
    conn: &mut SqliteConnection,
    product_id: Option<i32>,
) -> RepositoryResult<Vec<(DbProduct, Option<DbCategory>)>> {
    use crate::schema::{categories, products};

    let mut query = products::table
        .left_join(categories::table)
        .select((products::all_columns, categories::all_columns.nullable()))
        .order(products::id.asc())
        .into_boxed::<diesel::sqlite::Sqlite>();

    if let Some(id) = product_id {
        query = query.filter(products::id.eq(id));
    }

    let rows = query.load::<(DbProduct, Option<DbCategory>)>(conn)?;

    Ok(rows)
}

fn attach_tags(
    conn: &mut SqliteConnection,
    rows: Vec<(DbProduct, Option<DbCategory>)>,
) -> RepositoryResult<Vec<ProductDetails>> {
    use crate::schema::tags;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let (products, categories): (Vec<DbProduct>, Vec<Option<DbCategory>>) =
        rows.into_iter().unzip();

    let tags = DbProductTag::belonging_to(&products)
        .inner_join(tags::table)
        .select((DbProductTag::as_select(), DbTag::as_select()))
        .order(tags::id.asc())
        .load::<(DbProductTag, DbTag)>(conn)?
        .grouped_by(&products);

    Ok(products
        .into_iter()
        .zip(categories)
        .zip(tags)
        .map(|((product, category), links)| {
            ProductDetails::new(
                product.into(),
                category.map(DomainCategory::from),
                links
                    .into_iter()
                    .map(|(_, tag)| DomainTag::from(tag))
                    .collect(),
            )
        })
        .collect())
}

fn product_exists(conn: &mut SqliteConnection, product_id: i32) -> RepositoryResult<bool> {
    use crate::schema::products;

    let exists = select(exists(products::table.find(product_id))).get_result::<bool>(conn)?;

    Ok(exists)
}
