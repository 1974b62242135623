use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub rowid: i64,
    #[sea_orm(unique)]
    pub user_id: String,
    pub display_name: Option<String>,
    pub skill_level: Option<String>,
    pub streak_count: i32,
    pub quiz_completed: bool,
    /// JSON array of the chosen option per quiz question.
    pub quiz_answers: String,
}

impl ActiveModelBehavior for ActiveModel {}
