use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mentor_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    pub session_id: String,
    pub approach: String,
    pub trade_offs: String,
    pub real_world_analogy: String,
    pub better_alternative: String,
    pub timestamp_us: i64,
}

impl ActiveModelBehavior for ActiveModel {}
