use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    #[sea_orm(unique)]
    pub id: String,
    pub user_id: String,
    pub language: String,
    pub code: String,
    /// JSON array of mistake tags as returned by the analysis endpoint.
    pub mistake_tags: String,
    pub created_us: i64,
}

impl ActiveModelBehavior for ActiveModel {}
