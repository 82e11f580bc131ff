//! Club Router

use axum::{Router, routing::get};
use std::sync::Arc;

use auth::RoleGate;

use crate::application::config::ClubConfig;
use crate::domain::repository::ClubRepository;
use crate::infra::postgres::PgClubRepository;
use crate::presentation::handlers::{self, ClubAppState};

/// Create the Club router with PostgreSQL repository
pub fn club_router(repo: PgClubRepository, gate: Arc<dyn RoleGate>, config: ClubConfig) -> Router {
    club_router_generic(repo, gate, config)
}

/// Create a generic Club router for any repository implementation
pub fn club_router_generic<R>(repo: R, gate: Arc<dyn RoleGate>, config: ClubConfig) -> Router
where
    R: ClubRepository,
{
    let state = ClubAppState {
        repo: Arc::new(repo),
        gate,
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/applications",
            get(handlers::list_applications::<R>)
                .post(handlers::submit_application::<R>)
                .put(handlers::review_application::<R>),
        )
        .route(
            "/attendance",
            get(handlers::attendance_sheet::<R>).post(handlers::mark_attendance::<R>),
        )
        .route(
            "/members",
            get(handlers::list_members::<R>)
                .post(handlers::member_action::<R>)
                .put(handlers::change_member_role::<R>)
                .delete(handlers::remove_member::<R>),
        )
        .route(
            "/news",
            get(handlers::news_feed::<R>).post(handlers::publish_news::<R>),
        )
        .with_state(state)
}
