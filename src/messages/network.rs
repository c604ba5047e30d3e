//! Network messages - communication between App and Network layers

use crate::models::{Account, AccountFields, MutationKind};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkCommand {
    /// Run the session handshake
    InitializeSession { id: u64 },
    /// Fetch the full account list
    FetchAccounts { id: u64 },
    CreateAccount { id: u64, fields: AccountFields },
    UpdateAccount {
        id: u64,
        account_id: String,
        fields: AccountFields,
    },
    DeleteAccount { id: u64, account_id: String },

    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    /// Request ID, if the command expects a response
    pub fn id(&self) -> Option<u64> {
        match self {
            NetworkCommand::InitializeSession { id }
            | NetworkCommand::FetchAccounts { id }
            | NetworkCommand::CreateAccount { id, .. }
            | NetworkCommand::UpdateAccount { id, .. }
            | NetworkCommand::DeleteAccount { id, .. } => Some(*id),
            NetworkCommand::Shutdown => None,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkResponse {
    SessionReady { id: u64 },
    SessionFailed { id: u64, message: String },
    AccountsLoaded { id: u64, accounts: Vec<Account> },
    FetchFailed { id: u64, message: String },
    MutationApplied { id: u64, kind: MutationKind },
    MutationFailed {
        id: u64,
        kind: MutationKind,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::SessionReady { id } => *id,
            NetworkResponse::SessionFailed { id, .. } => *id,
            NetworkResponse::AccountsLoaded { id, .. } => *id,
            NetworkResponse::FetchFailed { id, .. } => *id,
            NetworkResponse::MutationApplied { id, .. } => *id,
            NetworkResponse::MutationFailed { id, .. } => *id,
        }
    }
}
