use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::{
    app_state::AppState,
    error::Result,
    middleware::UserIdentity,
    models::paywall::{PaywallQuery, PaywallResponse},
};

/// GET /api/v1/paywall
#[instrument(skip(state))]
pub async fn get_paywall(
    State(state): State<AppState>,
    identity: UserIdentity,
    Query(query): Query<PaywallQuery>,
) -> Result<Json<PaywallResponse>> {
    let current = state.profiles.membership(&identity.user_id).await?;
    let view = state.paywall_service.build(current, query).await?;

    Ok(Json(PaywallResponse {
        success: true,
        data: view,
    }))
}
