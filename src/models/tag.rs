use diesel::prelude::*;

use crate::domain::tag::{NewTag as DomainNewTag, Tag as DomainTag, UpdateTag as DomainUpdateTag};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tags)]
pub struct Tag {
    pub id: i32,
    pub tag_name: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tags)]
pub struct NewTag<'a> {
    pub tag_name: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tags)]
pub struct UpdateTag<'a> {
    pub tag_name: Option<Option<&'a str>>,
}

impl From<Tag> for DomainTag {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id,
            tag_name: value.tag_name,
        }
    }
}

impl<'a> From<&'a DomainNewTag> for NewTag<'a> {
    fn from(value: &'a DomainNewTag) -> Self {
        Self {
            tag_name: value.tag_name.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateTag> for UpdateTag<'a> {
    fn from(value: &'a DomainUpdateTag) -> Self {
        Self {
            tag_name: value.tag_name.as_ref().map(|name| name.as_deref()),
        }
    }
}
