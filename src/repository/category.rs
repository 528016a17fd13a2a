use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::{
    Category as DomainCategory, CategoryWithProducts, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::domain::product::Product as DomainProduct;
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::models::product::Product as DbProduct;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<CategoryWithProducts>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let categories = categories::table
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?;

        attach_products(&mut conn, categories)
    }

    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<CategoryWithProducts>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id)
            .first::<DbCategory>(&mut conn)
            .optional()?;

        match category {
            Some(category) => Ok(attach_products(&mut conn, vec![category])?.pop()),
            None => Ok(None),
        }
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let insertable = DbNewCategory::from(new_category);

        let created = diesel::insert_into(categories::table)
            .values(&insertable)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        category_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        if updates.is_empty() {
            return Ok(usize::from(category_exists(&mut conn, category_id)?));
        }

        let db_updates = DbUpdateCategory::from(updates);

        let updated = diesel::update(categories::table.find(category_id))
            .set(&db_updates)
            .execute(&mut conn)?;

        Ok(updated)
    }

    fn delete_category(&self, category_id: i32) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // Products filed under the category keep existing with a NULL category_id.
        let deleted = diesel::delete(categories::table.find(category_id)).execute(&mut conn)?;

        Ok(deleted)
    }
}

fn attach_products(
    conn: &mut SqliteConnection,
    categories: Vec<DbCategory>,
) -> RepositoryResult<Vec<CategoryWithProducts>> {
    use crate::schema::products;

    if categories.is_empty() {
        return Ok(Vec::new());
    }

    let products = DbProduct::belonging_to(&categories)
        .select(DbProduct::as_select())
        .order(products::id.asc())
        .load::<DbProduct>(conn)?
        .grouped_by(&categories);

    Ok(categories
        .into_iter()
        .zip(products)
        .map(|(category, products)| {
            CategoryWithProducts::new(
                category.into(),
                products.into_iter().map(DomainProduct::from).collect(),
            )
        })
        .collect())
}

fn category_exists(conn: &mut SqliteConnection, category_id: i32) -> RepositoryResult<bool> {
    use crate::schema::categories;

    let exists = select(exists(categories::table.find(category_id))).get_result::<bool>(conn)?;

    Ok(exists)
}
