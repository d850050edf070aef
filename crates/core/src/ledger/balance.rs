//! Per-account balances of a trip ledger.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tripsplit_shared::types::{Money, ParticipantId};

/// A key in the ledger.
///
/// Ordering is participants first (by ID), then external parties (by name).
/// Settlement tie-breaks rely on this order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LedgerAccount {
    /// A trip participant.
    Participant(ParticipantId),
    /// A virtual account for a payer outside the roster, keyed by trimmed name.
    External(String),
}

impl LedgerAccount {
    /// Returns the participant ID for participant accounts.
    #[must_use]
    pub const fn participant_id(&self) -> Option<ParticipantId> {
        match self {
            Self::Participant(id) => Some(*id),
            Self::External(_) => None,
        }
    }

    /// Returns the party name for external accounts.
    #[must_use]
    pub fn external_name(&self) -> Option<&str> {
        match self {
            Self::Participant(_) => None,
            Self::External(name) => Some(name),
        }
    }
}

impl From<ParticipantId> for LedgerAccount {
    fn from(id: ParticipantId) -> Self {
        Self::Participant(id)
    }
}

impl fmt::Display for LedgerAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Participant(id) => write!(f, "{id}"),
            Self::External(name) => write!(f, "external:{name}"),
        }
    }
}

/// Paid and owed totals of one account.
///
/// `personal` holds indivisible expenses the account paid for itself. They
/// count towards `paid` but cancel out in `net`, so they never create debts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    /// Everything this account paid.
    pub paid: Money,
    /// Sum of split shares charged to this account.
    pub owed: Money,
    /// Part of `paid` spent on indivisible expenses.
    pub personal: Money,
}

impl Balance {
    /// Net position: positive means the group owes this account.
    #[must_use]
    pub fn net(&self) -> Money {
        self.paid - self.owed - self.personal
    }

    /// Records a shared payment.
    pub fn add_paid(&mut self, amount: Money) {
        self.paid += amount;
    }

    /// Records a payment for an indivisible expense.
    pub fn add_personal(&mut self, amount: Money) {
        self.paid += amount;
        self.personal += amount;
    }

    /// Records a split share.
    pub fn add_owed(&mut self, amount: Money) {
        self.owed += amount;
    }
}

/// Aggregated balances of a trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    accounts: BTreeMap<LedgerAccount, Balance>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures the account exists, starting at zero.
    pub fn open(&mut self, account: LedgerAccount) {
        self.accounts.entry(account).or_default();
    }

    /// Mutable access to an account, opening it if needed.
    pub fn account_mut(&mut self, account: LedgerAccount) -> &mut Balance {
        self.accounts.entry(account).or_default()
    }

    /// Balance of an account.
    #[must_use]
    pub fn get(&self, account: &LedgerAccount) -> Option<&Balance> {
        self.accounts.get(account)
    }

    /// Balance of a participant.
    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Balance> {
        self.accounts.get(&LedgerAccount::Participant(id))
    }

    /// Returns true if the account exists.
    #[must_use]
    pub fn contains(&self, account: &LedgerAccount) -> bool {
        self.accounts.contains_key(account)
    }

    /// Accounts in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (&LedgerAccount, &Balance)> {
        self.accounts.iter()
    }

    /// Net position of every account.
    #[must_use]
    pub fn nets(&self) -> BTreeMap<LedgerAccount, Money> {
        self.accounts
            .iter()
            .map(|(account, balance)| (account.clone(), balance.net()))
            .collect()
    }

    /// Sum of all nets; zero for a consistent ledger.
    #[must_use]
    pub fn total_net(&self) -> Money {
        self.accounts.values().map(Balance::net).sum()
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the ledger has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<(LedgerAccount, Balance)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (LedgerAccount, Balance)>>(iter: I) -> Self {
        Self {
            accounts: iter.into_iter().collect(),
        }
    }
}
