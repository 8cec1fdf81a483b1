use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use super::{session::Session, state::*, ApiError};
use crate::partner::PartnerDirection;

#[derive(Deserialize, Debug)]
struct ListPartnersQuery {
    direction: PartnerDirection,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UpdatePartnerBody {
    in_timeline: bool,
}

fn target_id(path: Result<Path<usize>, PathRejection>) -> Result<usize, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

async fn list_partners(
    session: Session,
    State(partner_manager): State<GuardedPartnerManager>,
    query: Result<Query<ListPartnersQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let partners = partner_manager.list_partners(session.user_id, query.direction)?;
    Ok(Json(partners).into_response())
}

async fn create_partner(
    session: Session,
    State(partner_manager): State<GuardedPartnerManager>,
    path: Result<Path<usize>, PathRejection>,
) -> Result<Response, ApiError> {
    let target_id = target_id(path)?;
    let partner = partner_manager.create_partner(session.user_id, target_id)?;
    Ok((StatusCode::CREATED, Json(partner)).into_response())
}

async fn update_partner(
    session: Session,
    State(partner_manager): State<GuardedPartnerManager>,
    path: Result<Path<usize>, PathRejection>,
    body: Result<Json<UpdatePartnerBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let target_id = target_id(path)?;
    let Json(body) = body.map_err(|rejection| {
        debug!("Rejected partner update body: {}", rejection.body_text());
        ApiError::bad_request(rejection.body_text())
    })?;
    let partner = partner_manager.update_partner(session.user_id, target_id, body.in_timeline)?;
    Ok(Json(partner).into_response())
}

async fn remove_partner(
    session: Session,
    State(partner_manager): State<GuardedPartnerManager>,
    path: Result<Path<usize>, PathRejection>,
) -> Result<Response, ApiError> {
    let target_id = target_id(path)?;
    partner_manager.remove_partner(session.user_id, target_id)?;
    Ok(StatusCode::OK.into_response())
}

pub fn make_partner_routes(state: ServerState) -> Router {
    Router::new()
        .route("/partner", get(list_partners))
        .route(
            "/partner/{id}",
            post(create_partner)
                .put(update_partner)
                .delete(remove_partner),
        )
        .with_state(state)
}
