use axum::{extract::State, Json};
use time::format_description::well_known::Rfc3339;
use tracing::instrument;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    middleware::UserIdentity,
    models::purchase::{PurchaseData, PurchaseRequest, PurchaseResponse},
};

/// POST /api/v1/purchases
#[instrument(skip(state, request))]
pub async fn create_purchase(
    State(state): State<AppState>,
    identity: UserIdentity,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let purchase = state
        .purchase_service
        .purchase(&identity.user_id, &request)
        .await?;

    let format = |t: time::OffsetDateTime| {
        t.format(&Rfc3339)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to format timestamp: {}", e)))
    };

    Ok(Json(PurchaseResponse {
        success: true,
        data: PurchaseData {
            membership: purchase.tier.into(),
            period: purchase.period,
            product_id: purchase.store.product_id.clone(),
            transaction_id: purchase.store.transaction_id.clone(),
            purchased_at: format(purchase.store.purchased_at)?,
            expires_at: purchase.store.expires_at.map(format).transpose()?,
        },
    }))
}
