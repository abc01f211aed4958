use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::cars::Entity",
        from = "Column::CarId",
        to = "super::cars::Column::Id"
    )]
    Cars,
    #[sea_orm(has_many = "super::comment_hashtags::Entity")]
    CommentHashtags,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::cars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cars.def()
    }
}

impl Related<super::comment_hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommentHashtags.def()
    }
}

impl Related<super::hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        super::comment_hashtags::Relation::Hashtags.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::comment_hashtags::Relation::Comments.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
