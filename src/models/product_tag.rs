use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::product_tag::{
    LinkSide, NewProductTag as DomainNewProductTag, ProductTag as DomainProductTag,
};
use crate::schema::product_tags;

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::product_tags,
    belongs_to(super::product::Product, foreign_key = product_id),
    belongs_to(super::tag::Tag, foreign_key = tag_id)
)]
pub struct ProductTag {
    pub id: i32,
    pub product_id: i32,
    pub tag_id: i32,
}

impl ProductTag {
    /// Links whose `side` column equals `owner_id`, oldest first.
    pub fn owned_by(side: LinkSide, owner_id: i32) -> product_tags::BoxedQuery<'static, Sqlite> {
        let query = product_tags::table
            .order(product_tags::id.asc())
            .into_boxed::<Sqlite>();

        match side {
            LinkSide::Product => query.filter(product_tags::product_id.eq(owner_id)),
            LinkSide::Tag => query.filter(product_tags::tag_id.eq(owner_id)),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_tags)]
pub struct NewProductTag {
    pub product_id: i32,
    pub tag_id: i32,
}

impl From<ProductTag> for DomainProductTag {
    fn from(value: ProductTag) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            tag_id: value.tag_id,
        }
    }
}

impl From<&DomainNewProductTag> for NewProductTag {
    fn from(value: &DomainNewProductTag) -> Self {
        Self {
            product_id: value.product_id,
            tag_id: value.tag_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;

    use super::*;

    #[test]
    fn owned_by_filters_on_the_owner_column() {
        let by_product = ProductTag::owned_by(LinkSide::Product, 3);
        let by_tag = ProductTag::owned_by(LinkSide::Tag, 3);

        let by_product = debug_query::<Sqlite, _>(&by_product).to_string();
        let by_tag = debug_query::<Sqlite, _>(&by_tag).to_string();

        assert!(by_product.contains("`product_tags`.`product_id` = ?"));
        assert!(by_tag.contains("`product_tags`.`tag_id` = ?"));
        assert!(by_product.contains("ORDER BY `product_tags`.`id` ASC"));
    }
}
