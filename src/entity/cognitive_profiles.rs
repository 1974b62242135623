use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cognitive_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    #[sea_orm(unique)]
    pub user_id: String,
    /// JSON object mapping mistake tag to weight in 0..1.
    pub tag_weights: String,
    pub dominant_weakness: Option<String>,
    pub total_submissions: i32,
    /// JSON array of `{tag, from, to, date}` entries.
    pub improvement_history: String,
}

impl ActiveModelBehavior for ActiveModel {}
