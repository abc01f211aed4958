use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comment_hashtags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub comment_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub hashtag_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::comments::Entity",
        from = "Column::CommentId",
        to = "super::comments::Column::Id"
    )]
    Comments,
    #[sea_orm(
        belongs_to = "super::hashtags::Entity",
        from = "Column::HashtagId",
        to = "super::hashtags::Column::Id"
    )]
    Hashtags,
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hashtags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
