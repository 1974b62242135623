use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "challenges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    #[sea_orm(unique)]
    pub id: String,
    pub description: String,
    pub difficulty: i32,
    pub estimated_time: i32,
    pub created_us: i64,
}

impl ActiveModelBehavior for ActiveModel {}
