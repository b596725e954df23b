//! PostgreSQL adapter for EpochRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};

use super::participant_repo::db_err;
use crate::domain::entities::{EpochSummary, LeagueId, TransitionResult};
use crate::domain::ports::EpochRepository;
use crate::entity::{league_epochs, participants};
use crate::error::DomainError;

impl From<league_epochs::Model> for EpochSummary {
    fn from(m: league_epochs::Model) -> Self {
        EpochSummary {
            league: LeagueId(m.league_id),
            epoch_end: m.epoch_end.with_timezone(&Utc),
            promoted: m.promoted.max(0) as u32,
            demoted: m.demoted.max(0) as u32,
            stayed: m.stayed.max(0) as u32,
            processed_at: m.processed_at.with_timezone(&Utc),
        }
    }
}

/// PostgreSQL implementation of EpochRepository
pub struct PostgresEpochRepository {
    db: DatabaseConnection,
}

impl PostgresEpochRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EpochRepository for PostgresEpochRepository {
    async fn find_summary(
        &self,
        league: &LeagueId,
        epoch_end: DateTime<Utc>,
    ) -> Result<Option<EpochSummary>, DomainError> {
        let result = league_epochs::Entity::find()
            .filter(league_epochs::Column::LeagueId.eq(league.as_str()))
            .filter(league_epochs::Column::EpochEnd.eq(epoch_end.fixed_offset()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(|m| m.into()))
    }

    async fn latest_processed_boundary(&self) -> Result<Option<DateTime<Utc>>, DomainError> {
        let result = league_epochs::Entity::find()
            .order_by_desc(league_epochs::Column::EpochEnd)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(|m| m.epoch_end.with_timezone(&Utc)))
    }

    async fn apply_transition(
        &self,
        summary: &EpochSummary,
        results: &[TransitionResult],
    ) -> Result<(), DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Marker goes in first so a concurrent run fails before moving anyone
        let marker = league_epochs::ActiveModel {
            league_id: Set(summary.league.0.clone()),
            epoch_end: Set(summary.epoch_end.fixed_offset()),
            promoted: Set(summary.promoted as i32),
            demoted: Set(summary.demoted as i32),
            stayed: Set(summary.stayed as i32),
            processed_at: Set(summary.processed_at.fixed_offset()),
        };
        marker.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
                "League {} already transitioned at {}",
                summary.league, summary.epoch_end
            )),
            _ => db_err(e),
        })?;

        for result in results {
            let updated = participants::Entity::update_many()
                .col_expr(
                    participants::Column::LeagueId,
                    Expr::value(result.new_league.0.clone()),
                )
                .col_expr(participants::Column::Points, Expr::value(0i64))
                .col_expr(
                    participants::Column::LastTransitionEpoch,
                    Expr::value(summary.epoch_end.fixed_offset()),
                )
                .filter(participants::Column::Id.eq(result.participant_id.0))
                .exec(&txn)
                .await
                .map_err(db_err)?;

            if updated.rows_affected == 0 {
                // Dropping the transaction rolls it back
                return Err(DomainError::NotFound(format!(
                    "Participant {} not found",
                    result.participant_id
                )));
            }
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
