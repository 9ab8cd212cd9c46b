use axum::{extract::State, Json};
use tracing::instrument;

use crate::{
    app_state::AppState, error::Result, middleware::UserIdentity,
    models::purchase::MembershipResponse,
};

/// GET /api/v1/membership
#[instrument(skip(state))]
pub async fn get_membership(
    State(state): State<AppState>,
    identity: UserIdentity,
) -> Result<Json<MembershipResponse>> {
    let profile = state.profiles.profile(&identity.user_id).await?;

    Ok(Json(MembershipResponse {
        success: true,
        data: profile,
    }))
}
