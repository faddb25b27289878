//! Shared vocabulary for the Linked API MCP server.
//!
//! These types are used by both the remote client (`linkedapi-api`) and the
//! MCP surface (`linkedapi-mcp`):
//!
//! - [`OperationName`]: the stable symbolic key of every remote workflow kind
//! - [`MappedResponse`]: the `{data?, errors[]}` outcome of a workflow
//! - [`ActionError`]: one remote action failure

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod response;

pub use response::{ActionError, MappedResponse};

/// Symbolic name of a remote operation.
///
/// The serialized form is the camelCase tag that clients hand back to the
/// `get_workflow_result` tool, e.g. `"searchCompanies"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationName {
    SendMessage,
    SyncConversation,
    CheckConnectionStatus,
    SendConnectionRequest,
    WithdrawConnectionRequest,
    RetrievePendingRequests,
    RetrieveConnections,
    RemoveConnection,
    SearchCompanies,
    SearchPeople,
    FetchCompany,
    FetchPerson,
    FetchPost,
    ReactToPost,
    CommentOnPost,
    CreatePost,
    #[serde(rename = "retrieveSSI")]
    RetrieveSsi,
    RetrievePerformance,
    NvSendMessage,
    NvSyncConversation,
    NvSearchCompanies,
    NvSearchPeople,
    NvFetchCompany,
    NvFetchPerson,
    CustomWorkflow,
}

impl OperationName {
    /// Every operation, in catalog order.
    pub const ALL: [OperationName; 25] = [
        OperationName::SendMessage,
        OperationName::SyncConversation,
        OperationName::CheckConnectionStatus,
        OperationName::SendConnectionRequest,
        OperationName::WithdrawConnectionRequest,
        OperationName::RetrievePendingRequests,
        OperationName::RetrieveConnections,
        OperationName::RemoveConnection,
        OperationName::SearchCompanies,
        OperationName::SearchPeople,
        OperationName::FetchCompany,
        OperationName::FetchPerson,
        OperationName::FetchPost,
        OperationName::ReactToPost,
        OperationName::CommentOnPost,
        OperationName::CreatePost,
        OperationName::RetrieveSsi,
        OperationName::RetrievePerformance,
        OperationName::NvSendMessage,
        OperationName::NvSyncConversation,
        OperationName::NvSearchCompanies,
        OperationName::NvSearchPeople,
        OperationName::NvFetchCompany,
        OperationName::NvFetchPerson,
        OperationName::CustomWorkflow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationName::SendMessage => "sendMessage",
            OperationName::SyncConversation => "syncConversation",
            OperationName::CheckConnectionStatus => "checkConnectionStatus",
            OperationName::SendConnectionRequest => "sendConnectionRequest",
            OperationName::WithdrawConnectionRequest => "withdrawConnectionRequest",
            OperationName::RetrievePendingRequests => "retrievePendingRequests",
            OperationName::RetrieveConnections => "retrieveConnections",
            OperationName::RemoveConnection => "removeConnection",
            OperationName::SearchCompanies => "searchCompanies",
            OperationName::SearchPeople => "searchPeople",
            OperationName::FetchCompany => "fetchCompany",
            OperationName::FetchPerson => "fetchPerson",
            OperationName::FetchPost => "fetchPost",
            OperationName::ReactToPost => "reactToPost",
            OperationName::CommentOnPost => "commentOnPost",
            OperationName::CreatePost => "createPost",
            OperationName::RetrieveSsi => "retrieveSSI",
            OperationName::RetrievePerformance => "retrievePerformance",
            OperationName::NvSendMessage => "nvSendMessage",
            OperationName::NvSyncConversation => "nvSyncConversation",
            OperationName::NvSearchCompanies => "nvSearchCompanies",
            OperationName::NvSearchPeople => "nvSearchPeople",
            OperationName::NvFetchCompany => "nvFetchCompany",
            OperationName::NvFetchPerson => "nvFetchPerson",
            OperationName::CustomWorkflow => "customWorkflow",
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperationName(pub String);

impl FromStr for OperationName {
    type Err = UnknownOperationName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownOperationName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_tag_matches_display_for_every_operation() {
        for name in OperationName::ALL {
            let serialized = serde_json::to_value(name).unwrap();
            assert_eq!(serialized, serde_json::Value::String(name.to_string()));
        }
    }

    #[test]
    fn from_str_round_trips_and_rejects_unknown_names() {
        assert_eq!("retrieveSSI".parse::<OperationName>().unwrap(), OperationName::RetrieveSsi);
        assert_eq!("nvFetchPerson".parse::<OperationName>().unwrap(), OperationName::NvFetchPerson);

        let error = "fetchSomething".parse::<OperationName>().unwrap_err();
        assert_eq!(error.to_string(), "Unknown operation: fetchSomething");
    }

    #[test]
    fn operation_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        assert!(OperationName::ALL.iter().all(|name| seen.insert(name.as_str())));
    }
}
