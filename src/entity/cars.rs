use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub brand: String,
    pub model: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: i64,
    pub category: String,
    pub condition: String,
    pub year: i32,
    pub mileage: i64,
    pub color: String,
    pub available_colors: Vec<String>,
    pub engine: String,
    pub fuel_type: String,
    pub drivetrain: String,
    pub horsepower: i32,
    pub torque: i32,
    pub transmission: String,
    pub top_speed: i32,
    #[sea_orm(column_type = "Double")]
    pub acceleration: f64,
    pub document: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::car_images::Entity")]
    CarImages,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::purchases::Entity")]
    Purchases,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::car_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarImages.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
