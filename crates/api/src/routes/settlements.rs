//! Trip balance and debt routes.
//!
//! Both endpoints take a full trip snapshot in the body. The path trip ID is
//! authoritative: a body `tripId` that disagrees is rejected, and expenses
//! without their own `tripId` inherit it.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tripsplit_core::ledger::{Ledger, LedgerAccount};
use tripsplit_core::settlement::{Debt, SettlementError, SettlementService};
use tripsplit_core::split::{Split, SplitError, SplitType};
use tripsplit_core::trip::{Division, Expense, Payer, TripSnapshot};
use tripsplit_shared::types::{Currency, ExpenseId, Money, ParticipantId, TripId};

use super::splits::ParticipantDto;
use crate::AppState;
use crate::extractors::ApiJson;
use crate::error::{ApiError, ApiResult};

/// Creates the trip settlement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses/trip/{trip_id}/balances", post(trip_balances))
        .route("/expenses/trip/{trip_id}/debts", post(trip_debts))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// A payer outside the trip roster.
#[derive(Debug, Clone, Deserialize)]
pub struct ThirdPartyDto {
    /// Free-text name.
    pub name: String,
    /// Optional contact email.
    #[serde(default)]
    pub email: Option<String>,
}

/// One split entry of a stored expense.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSplitDto {
    /// Participant who owes the share.
    pub participant_id: ParticipantId,
    /// Share; ignored for EQUAL splits.
    #[serde(default)]
    pub amount: Option<Money>,
}

/// An expense as stored by clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning trip; defaults to the path trip.
    #[serde(default)]
    pub trip_id: Option<TripId>,
    /// Total amount.
    pub amount: Money,
    /// Currency; defaults to the trip currency.
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Paying participant. Exactly one of this and `third_party` is set.
    #[serde(default)]
    pub payer_participant_id: Option<ParticipantId>,
    /// Paying outsider.
    #[serde(default)]
    pub third_party: Option<ThirdPartyDto>,
    /// Whether the cost is shared.
    pub is_divisible: bool,
    /// Split policy; defaults to EQUAL.
    #[serde(default)]
    pub split_type: Option<SplitType>,
    /// Split entries in insertion order.
    #[serde(default)]
    pub splits: Vec<ExpenseSplitDto>,
}

impl ExpenseDto {
    fn into_expense(self, trip_id: TripId, currency: Currency) -> ApiResult<Expense> {
        let payer = match (self.payer_participant_id, self.third_party) {
            (Some(id), None) => Payer::Participant(id),
            (None, Some(party)) => Payer::ExternalParty {
                name: party.name,
                email: party.email,
            },
            (Some(_), Some(_)) => {
                return Err(ApiError::validation(format!(
                    "Expense {} has both a participant and a third-party payer",
                    self.id
                )));
            }
            (None, None) => {
                return Err(ApiError::validation(format!(
                    "Expense {} has no payer",
                    self.id
                )));
            }
        };

        let division = if self.is_divisible {
            let split_type = self.split_type.unwrap_or(SplitType::Equal);
            let splits = self
                .splits
                .into_iter()
                .map(|entry| match (split_type, entry.amount) {
                    (SplitType::Equal, amount) => Ok(Split::new(
                        entry.participant_id,
                        amount.unwrap_or_default(),
                    )),
                    (SplitType::Manual, Some(amount)) => Ok(Split::new(entry.participant_id, amount)),
                    (SplitType::Manual, None) => Err(SettlementError::InvalidSplit {
                        expense_id: self.id,
                        source: SplitError::MissingSplitAmount(entry.participant_id),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Division::Divided { split_type, splits }
        } else {
            Division::Indivisible
        };

        Ok(Expense {
            id: self.id,
            trip_id: self.trip_id.unwrap_or(trip_id),
            amount: self.amount,
            currency: self.currency.unwrap_or(currency),
            payer,
            division,
        })
    }
}

/// Request body for balance and debt computation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSnapshotRequest {
    /// Trip ID; must match the path when present.
    #[serde(default)]
    pub trip_id: Option<TripId>,
    /// Trip currency.
    pub currency: Currency,
    /// Trip roster.
    pub participants: Vec<ParticipantDto>,
    /// Trip expenses.
    #[serde(default)]
    pub expenses: Vec<ExpenseDto>,
}

impl TripSnapshotRequest {
    fn into_snapshot(self, trip_id: TripId) -> ApiResult<TripSnapshot> {
        if let Some(body_trip_id) = self.trip_id
            && body_trip_id != trip_id
        {
            return Err(ApiError::validation(format!(
                "Body trip {body_trip_id} does not match path trip {trip_id}"
            )));
        }

        let currency = self.currency;
        let expenses = self
            .expenses
            .into_iter()
            .map(|expense| expense.into_expense(trip_id, currency))
            .collect::<ApiResult<Vec<_>>>()?;

        let participants = self
            .participants
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(TripSnapshot {
            trip_id,
            currency,
            participants,
            expenses,
        })
    }
}

/// Balance of one ledger account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDto {
    /// Participant ID; null for external parties.
    pub participant_id: Option<ParticipantId>,
    /// External party name; null for participants.
    pub external_party: Option<String>,
    /// Display name.
    pub name: String,
    /// Total paid.
    pub paid: Money,
    /// Total of split shares.
    pub owed: Money,
    /// Part of `paid` spent on indivisible expenses.
    pub personal: Money,
    /// Net position; positive means the group owes this account.
    pub net: Money,
}

/// Response for the balances endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesResponse {
    /// Trip ID.
    pub trip_id: TripId,
    /// Trip currency.
    pub currency: Currency,
    /// One row per ledger account.
    pub balances: Vec<BalanceDto>,
}

/// One transfer that settles part of the trip.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDebt {
    /// Paying participant.
    pub from_participant_id: Option<ParticipantId>,
    /// Receiving participant; null when an external party is owed.
    pub to_participant_id: Option<ParticipantId>,
    /// Payer display name.
    pub from_participant_name: String,
    /// Receiver display name.
    pub to_participant_name: String,
    /// Transfer amount.
    pub amount: Money,
}

/// Resolves account display names from the snapshot roster.
struct Names(BTreeMap<ParticipantId, String>);

impl Names {
    fn new(snapshot: &TripSnapshot) -> Self {
        Self(
            snapshot
                .participants
                .iter()
                .map(|p| (p.id, p.display_name.clone()))
                .collect(),
        )
    }

    fn of(&self, account: &LedgerAccount) -> String {
        match account {
            LedgerAccount::Participant(id) => self
                .0
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
            LedgerAccount::External(name) => name.clone(),
        }
    }

    fn balances(&self, ledger: &Ledger) -> Vec<BalanceDto> {
        ledger
            .iter()
            .map(|(account, balance)| BalanceDto {
                participant_id: account.participant_id(),
                external_party: account.external_name().map(str::to_string),
                name: self.of(account),
                paid: balance.paid,
                owed: balance.owed,
                personal: balance.personal,
                net: balance.net(),
            })
            .collect()
    }

    fn debt(&self, debt: &Debt) -> ParticipantDebt {
        ParticipantDebt {
            from_participant_id: debt.from.participant_id(),
            to_participant_id: debt.to.participant_id(),
            from_participant_name: self.of(&debt.from),
            to_participant_name: self.of(&debt.to),
            amount: debt.amount,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /expenses/trip/{trip_id}/balances
async fn trip_balances(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    ApiJson(request): ApiJson<TripSnapshotRequest>,
) -> ApiResult<Json<BalancesResponse>> {
    let snapshot = request.into_snapshot(trip_id)?;
    let ledger = SettlementService::ledger(&snapshot, &state.settings)?;

    debug!(%trip_id, accounts = ledger.len(), "Computed trip balances");

    Ok(Json(BalancesResponse {
        trip_id,
        currency: snapshot.currency,
        balances: Names::new(&snapshot).balances(&ledger),
    }))
}

/// POST /expenses/trip/{trip_id}/debts
async fn trip_debts(
    State(state): State<AppState>,
    Path(trip_id): Path<TripId>,
    ApiJson(request): ApiJson<TripSnapshotRequest>,
) -> ApiResult<Json<Vec<ParticipantDebt>>> {
    let snapshot = request.into_snapshot(trip_id)?;
    let settlement = SettlementService::settle(&snapshot, &state.settings)?;

    debug!(%trip_id, debts = settlement.debts.len(), "Computed trip debts");

    let names = Names::new(&snapshot);
    Ok(Json(
        settlement.debts.iter().map(|debt| names.debt(debt)).collect(),
    ))
}
