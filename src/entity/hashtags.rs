use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hashtags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment_hashtags::Entity")]
    CommentHashtags,
}

impl Related<super::comment_hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommentHashtags.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        super::comment_hashtags::Relation::Comments.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::comment_hashtags::Relation::Hashtags.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
