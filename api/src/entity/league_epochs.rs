use sea_orm::entity::prelude::*;

/// One row per league per processed boundary
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "league_epochs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub league_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub epoch_end: DateTimeWithTimeZone,
    pub promoted: i32,
    pub demoted: i32,
    pub stayed: i32,
    pub processed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
