//! HTTP integration tests for the EcoLeague API
//!
//! The full router runs against in-memory repositories and a fixed clock,
//! so these exercise routing, admin auth, error mapping and serialization
//! without a database.
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::app::league_config::default_table;
    use crate::app::{EpochClock, LeagueService};
    use crate::auth::hash_api_key;
    use crate::domain::entities::ParticipantId;
    use crate::domain::ports::{EpochRepository, ParticipantRepository};
    use crate::test_utils::{
        test_participant_with, FixedClock, InMemoryEpochRepository, InMemoryParticipantRepository,
    };
    use crate::{build_router, AppState};

    const ADMIN_KEY: &str = "test-admin-key";

    /// Wednesday of the epoch ending Sunday 2026-10-25
    fn wednesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 21, 12, 0, 0).unwrap()
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    /// Thirty silver participants, participant 1 leading, plus one bronze
    fn create_server() -> (TestServer, Arc<FixedClock>) {
        let mut participants: Vec<_> = (1..=30u128)
            .map(|n| test_participant_with(ParticipantId(id(n)), "silver", 500 - n as u32))
            .collect();
        participants.push(test_participant_with(ParticipantId(id(100)), "bronze", 12));

        let participant_repo =
            Arc::new(InMemoryParticipantRepository::new().with_participants(participants));
        let epoch_repo = Arc::new(InMemoryEpochRepository::new(participant_repo.clone()));
        let participant_repo: Arc<dyn ParticipantRepository> = participant_repo;
        let epoch_repo: Arc<dyn EpochRepository> = epoch_repo;

        let clock = Arc::new(FixedClock::new(wednesday()));
        let league_service = Arc::new(LeagueService::new(
            participant_repo,
            epoch_repo,
            Arc::new(default_table().unwrap()),
            EpochClock::utc(),
            clock.clone(),
        ));

        let state = AppState {
            league_service,
            admin_key_hash: Some(hash_api_key(ADMIN_KEY)),
        };
        let server = TestServer::new(build_router(state).unwrap()).unwrap();
        (server, clock)
    }

    #[tokio::test]
    async fn health_check() {
        let (server, _) = create_server();

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }

    #[tokio::test]
    async fn lists_leagues_entry_first() {
        let (server, _) = create_server();

        let body: Value = server.get("/leagues").await.json();

        let ids: Vec<&str> = body["leagues"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["bronze", "silver", "gold", "diamond"]);
    }

    #[tokio::test]
    async fn league_lookup_includes_neighbours() {
        let (server, _) = create_server();

        let body: Value = server.get("/leagues/silver").await.json();
        assert_eq!(body["league"]["id"], "silver");
        assert_eq!(body["previous"]["id"], "bronze");
        assert_eq!(body["next"]["id"], "gold");

        let top: Value = server.get("/leagues/diamond").await.json();
        assert_eq!(top["previous"]["id"], "gold");
        assert!(top["next"].is_null());
    }

    #[tokio::test]
    async fn unknown_league_is_not_found() {
        let (server, _) = create_server();

        let response = server.get("/leagues/platinum/leaderboard").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Unknown league");
        assert_eq!(body["details"], "platinum");
    }

    #[tokio::test]
    async fn leaderboard_shows_ranks_and_zones() {
        let (server, _) = create_server();

        let response = server.get("/leagues/silver/leaderboard").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 30);
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries[0]["participant_id"], id(1).to_string());
        assert_eq!(entries[0]["rank"], 1);
        assert_eq!(entries[0]["zone"], "podium");
        assert_eq!(entries[3]["zone"], "promotion");
        assert_eq!(entries[14]["zone"], "promotion");
        assert_eq!(entries[15]["zone"], "safe");
        assert_eq!(entries[25]["zone"], "demotion");
        assert_eq!(entries[29]["rank"], 30);
    }

    #[tokio::test]
    async fn standing_of_participant() {
        let (server, _) = create_server();

        let body: Value = server.get(&format!("/participants/{}", id(27))).await.json();

        assert_eq!(body["league"], "silver");
        assert_eq!(body["rank"], 27);
        assert_eq!(body["zone"], "demotion");
    }

    #[tokio::test]
    async fn standing_of_unknown_participant_is_not_found() {
        let (server, _) = create_server();

        let response = server.get(&format!("/participants/{}", id(999))).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_routes_require_key() {
        let (server, _) = create_server();
        let body = json!({ "participant_id": id(200) });

        let missing = server.post("/participants").json(&body).await;
        missing.assert_status(StatusCode::UNAUTHORIZED);

        let wrong = server
            .post("/participants")
            .authorization_bearer("not-the-key")
            .json(&body)
            .await;
        wrong.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn enroll_places_participant_in_entry_league() {
        let (server, _) = create_server();
        let body = json!({ "participant_id": id(200) });

        let response = server
            .post("/participants")
            .authorization_bearer(ADMIN_KEY)
            .json(&body)
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["league"], "bronze");
        assert_eq!(created["points"], 0);

        let duplicate = server
            .post("/participants")
            .authorization_bearer(ADMIN_KEY)
            .json(&body)
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn add_points_accumulates() {
        let (server, _) = create_server();
        let path = format!("/participants/{}/points", id(100));

        let response = server
            .post(&path)
            .authorization_bearer(ADMIN_KEY)
            .json(&json!({ "points": 8 }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["points"], 20);
    }

    #[tokio::test]
    async fn non_positive_points_are_rejected() {
        let (server, _) = create_server();
        let path = format!("/participants/{}/points", id(100));

        for points in [0, -5] {
            let response = server
                .post(&path)
                .authorization_bearer(ADMIN_KEY)
                .json(&json!({ "points": points }))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn points_past_the_limit_are_rejected_and_league_stays_readable() {
        let (server, _) = create_server();
        let path = format!("/participants/{}/points", id(100));

        let first = server
            .post(&path)
            .authorization_bearer(ADMIN_KEY)
            .json(&json!({ "points": 3_000_000_000u32 }))
            .await;
        first.assert_status_ok();

        let second = server
            .post(&path)
            .authorization_bearer(ADMIN_KEY)
            .json(&json!({ "points": 3_000_000_000u32 }))
            .await;
        second.assert_status(StatusCode::BAD_REQUEST);

        let board = server.get("/leagues/bronze/leaderboard").await;
        board.assert_status_ok();
        assert_eq!(board.json::<Value>()["entries"][0]["points"], 3_000_000_012u32);
    }

    #[tokio::test]
    async fn epoch_countdown() {
        let (server, clock) = create_server();

        let body: Value = server.get("/epoch").await.json();
        assert_eq!(body["ends_at"], "2026-10-25T00:00:00Z");
        assert_eq!(body["label"], "3 days");
        assert_eq!(body["remaining_seconds"], 3 * 86_400 + 12 * 3_600);

        clock.set(Utc.with_ymd_and_hms(2026, 10, 24, 23, 30, 0).unwrap());
        let body: Value = server.get("/epoch").await.json();
        assert_eq!(body["label"], "30 minutes");
    }

    #[tokio::test]
    async fn manual_transition_moves_participants_once() {
        let (server, clock) = create_server();
        clock.set(Utc.with_ymd_and_hms(2026, 10, 25, 0, 5, 0).unwrap());

        let response = server
            .post("/epoch/transition")
            .authorization_bearer(ADMIN_KEY)
            .await;

        response.assert_status_ok();
        let report: Value = response.json();
        assert_eq!(report["epoch_end"], "2026-10-25T00:00:00Z");
        assert_eq!(report["processed"].as_array().unwrap().len(), 4);

        let leader: Value = server.get(&format!("/participants/{}", id(1))).await.json();
        assert_eq!(leader["league"], "gold");
        assert_eq!(leader["points"], 0);
        let last: Value = server.get(&format!("/participants/{}", id(30))).await.json();
        assert_eq!(last["league"], "bronze");

        let again: Value = server
            .post("/epoch/transition")
            .authorization_bearer(ADMIN_KEY)
            .await
            .json();
        assert!(again["processed"].as_array().unwrap().is_empty());
        assert_eq!(again["skipped"].as_array().unwrap().len(), 4);
    }
}
