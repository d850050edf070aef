//! Split validation routes.
//!
//! Lets a client check an expense's split before saving it and returns the
//! shares the ledger will use.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tripsplit_core::settlement::SettlementError;
use tripsplit_core::split::{Split, SplitInput, SplitService, SplitType};
use tripsplit_core::trip::{Participant, Roster};
use tripsplit_shared::types::{Currency, Money, ParticipantId, UserId};

use crate::AppState;
use crate::extractors::ApiJson;
use crate::error::ApiResult;

/// Creates the split routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/expenses/splits/validate", post(validate_splits))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A trip participant as sent by clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    /// Participant ID.
    pub id: ParticipantId,
    /// Display name.
    pub display_name: String,
    /// Linked user, absent for guests.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl From<ParticipantDto> for Participant {
    fn from(dto: ParticipantDto) -> Self {
        Self {
            id: dto.id,
            display_name: dto.display_name,
            user_id: dto.user_id,
        }
    }
}

/// Builds a roster, rejecting repeated IDs.
fn roster_from(participants: Vec<ParticipantDto>) -> ApiResult<Roster> {
    let mut roster = Roster::new();
    for dto in participants {
        let id = dto.id;
        if !roster.insert(dto.into()) {
            return Err(SettlementError::DuplicateParticipant(id).into());
        }
    }
    Ok(roster)
}

/// Request body for split validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSplitRequest {
    /// Expense amount as a decimal string.
    pub amount: Money,
    /// Expense currency, echoed back.
    #[serde(default)]
    pub currency: Option<Currency>,
    /// EQUAL or MANUAL.
    pub split_type: SplitType,
    /// Candidate split entries.
    pub splits: Vec<SplitInput>,
    /// Trip roster.
    pub participants: Vec<ParticipantDto>,
}

/// Response for a valid split.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSplitResponse {
    /// Resolved shares; they sum to the expense amount exactly.
    pub splits: Vec<Split>,
    /// Currency from the request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /expenses/splits/validate
async fn validate_splits(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ValidateSplitRequest>,
) -> ApiResult<Json<ValidateSplitResponse>> {
    let roster = roster_from(request.participants)?;
    let splits = SplitService::validate(
        request.amount,
        request.split_type,
        &request.splits,
        &roster,
        &state.settings.splits,
    )?;

    debug!(
        amount = %request.amount,
        split_type = request.split_type.as_str(),
        shares = splits.len(),
        "Validated split"
    );

    Ok(Json(ValidateSplitResponse {
        splits,
        currency: request.currency,
    }))
}
