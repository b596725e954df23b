//! PostgreSQL adapter for ParticipantRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use crate::domain::entities::{LeagueId, NewParticipant, Participant, ParticipantId};
use crate::domain::ports::ParticipantRepository;
use crate::entity::participants;
use crate::error::DomainError;

impl TryFrom<participants::Model> for Participant {
    type Error = DomainError;

    fn try_from(m: participants::Model) -> Result<Self, Self::Error> {
        // Negative totals are rejected here rather than ranked
        let points = u32::try_from(m.points).map_err(|_| {
            DomainError::Internal(format!(
                "Participant {} has invalid point total {}",
                m.id, m.points
            ))
        })?;

        Ok(Participant {
            id: ParticipantId(m.id),
            points,
            league: LeagueId(m.league_id),
            joined_at: m.joined_at.with_timezone(&Utc),
            last_transition_epoch: m.last_transition_epoch.map(|t| t.with_timezone(&Utc)),
        })
    }
}

/// Highest stored total that can still take `added` more points
fn max_total_before(added: u32) -> i64 {
    i64::from(u32::MAX - added)
}

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// PostgreSQL implementation of ParticipantRepository
pub struct PostgresParticipantRepository {
    db: DatabaseConnection,
}

impl PostgresParticipantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError> {
        let result = participants::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        result.map(Participant::try_from).transpose()
    }

    async fn create(
        &self,
        participant: &NewParticipant,
        joined_at: DateTime<Utc>,
    ) -> Result<Participant, DomainError> {
        let model = participants::ActiveModel {
            id: Set(participant.id.0),
            league_id: Set(participant.league.0.clone()),
            points: Set(0),
            joined_at: Set(joined_at.fixed_offset()),
            last_transition_epoch: Set(None),
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists(format!(
                "Participant {} already enrolled",
                participant.id
            )),
            _ => db_err(e),
        })?;

        result.try_into()
    }

    async fn list_by_league(&self, league: &LeagueId) -> Result<Vec<Participant>, DomainError> {
        let results = participants::Entity::find()
            .filter(participants::Column::LeagueId.eq(league.as_str()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        results.into_iter().map(Participant::try_from).collect()
    }

    async fn add_points(
        &self,
        id: &ParticipantId,
        points: u32,
    ) -> Result<Participant, DomainError> {
        let updated = participants::Entity::update_many()
            .col_expr(
                participants::Column::Points,
                Expr::col(participants::Column::Points).add(i64::from(points)),
            )
            .filter(participants::Column::Id.eq(id.0))
            .filter(participants::Column::Points.lte(max_total_before(points)))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if updated.rows_affected == 0 {
            // Either the participant is missing or the total would overflow
            return match self.find_by_id(id).await? {
                Some(existing) => Err(DomainError::Validation(format!(
                    "adding {} points to participant {} would exceed the point limit (current total {})",
                    points, id, existing.points
                ))),
                None => Err(DomainError::NotFound(format!("Participant {} not found", id))),
            };
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Participant {} not found", id)))
    }
}
