use indexmap::IndexMap;
use linkedapi_types::OperationName;
use thiserror::Error;

use crate::operation::{ChildAction, Operation, ResultShape, WorkflowTemplate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("operation {0} is registered more than once")]
    DuplicateOperation(OperationName),
}

const PERSON_CHILDREN: &[ChildAction] = &[
    ChildAction::new("retrieveExperience", "st.retrievePersonExperience", "experiences"),
    ChildAction::new("retrieveEducation", "st.retrievePersonEducation", "education"),
    ChildAction::new("retrieveSkills", "st.retrievePersonSkills", "skills"),
    ChildAction::new("retrieveLanguages", "st.retrievePersonLanguages", "languages"),
    ChildAction::configured("retrievePosts", "st.retrievePersonPosts", "postsRetrievalConfig", "posts"),
    ChildAction::configured("retrieveComments", "st.retrievePersonComments", "commentsRetrievalConfig", "comments"),
    ChildAction::configured("retrieveReactions", "st.retrievePersonReactions", "reactionsRetrievalConfig", "reactions"),
];

const COMPANY_CHILDREN: &[ChildAction] = &[
    ChildAction::configured("retrieveEmployees", "st.retrieveCompanyEmployees", "employeesRetrievalConfig", "employees"),
    ChildAction::configured("retrieveDMs", "st.retrieveCompanyDMs", "dmsRetrievalConfig", "dms"),
    ChildAction::configured("retrievePosts", "st.retrieveCompanyPosts", "postsRetrievalConfig", "posts"),
];

const NV_COMPANY_CHILDREN: &[ChildAction] = &[
    ChildAction::configured("retrieveEmployees", "nv.retrieveCompanyEmployees", "employeesRetrievalConfig", "employees"),
    ChildAction::configured("retrieveDMs", "nv.retrieveCompanyDMs", "dmsRetrievalConfig", "dms"),
];

/// Read-only catalog of remote operations, keyed by [`OperationName`].
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    operations: IndexMap<OperationName, Operation>,
}

impl OperationRegistry {
    /// Build a registry, rejecting duplicate operation names.
    pub fn new(operations: Vec<Operation>) -> Result<Self, RegistryError> {
        let mut by_name = IndexMap::with_capacity(operations.len());
        for operation in operations {
            if by_name.contains_key(&operation.name) {
                return Err(RegistryError::DuplicateOperation(operation.name));
            }
            by_name.insert(operation.name, operation);
        }
        Ok(Self { operations: by_name })
    }

    /// The full Linked API catalog.
    pub fn standard() -> Self {
        use OperationName::*;
        use ResultShape::{Completion, Data, Unit};
        use WorkflowTemplate::{Action, Custom, OpenPage};

        let catalog = [
            Operation::new(SendMessage, Action("st.sendMessage"), Unit),
            Operation::new(SyncConversation, Action("st.syncConversation"), Unit),
            Operation::new(CheckConnectionStatus, Action("st.checkConnectionStatus"), Data),
            Operation::new(SendConnectionRequest, Action("st.sendConnectionRequest"), Unit),
            Operation::new(WithdrawConnectionRequest, Action("st.withdrawConnectionRequest"), Unit),
            Operation::new(RetrievePendingRequests, Action("st.retrievePendingRequests"), Data),
            Operation::new(RetrieveConnections, Action("st.retrieveConnections"), Data),
            Operation::new(RemoveConnection, Action("st.removeConnection"), Unit),
            Operation::new(SearchCompanies, Action("st.searchCompanies"), Data),
            Operation::new(SearchPeople, Action("st.searchPeople"), Data),
            Operation::new(
                FetchCompany,
                OpenPage {
                    action_type: "st.openCompanyPage",
                    children: COMPANY_CHILDREN,
                },
                Data,
            ),
            Operation::new(
                FetchPerson,
                OpenPage {
                    action_type: "st.openPersonPage",
                    children: PERSON_CHILDREN,
                },
                Data,
            ),
            Operation::new(
                FetchPost,
                OpenPage {
                    action_type: "st.openPost",
                    children: &[],
                },
                Data,
            ),
            Operation::new(ReactToPost, Action("st.reactToPost"), Unit),
            Operation::new(CommentOnPost, Action("st.commentOnPost"), Unit),
            Operation::new(CreatePost, Action("st.createPost"), Data),
            Operation::new(RetrieveSsi, Action("st.retrieveSSI"), Data),
            Operation::new(RetrievePerformance, Action("st.retrievePerformance"), Data),
            Operation::new(NvSendMessage, Action("nv.sendMessage"), Unit),
            Operation::new(NvSyncConversation, Action("nv.syncConversation"), Unit),
            Operation::new(NvSearchCompanies, Action("nv.searchCompanies"), Data),
            Operation::new(NvSearchPeople, Action("nv.searchPeople"), Data),
            Operation::new(
                NvFetchCompany,
                OpenPage {
                    action_type: "nv.openCompanyPage",
                    children: NV_COMPANY_CHILDREN,
                },
                Data,
            ),
            Operation::new(
                NvFetchPerson,
                OpenPage {
                    action_type: "nv.openPersonPage",
                    children: &[],
                },
                Data,
            ),
            Operation::new(CustomWorkflow, Custom, Completion),
        ];

        Self {
            operations: catalog.into_iter().map(|operation| (operation.name, operation)).collect(),
        }
    }

    /// Look up an operation by its wire tag, e.g. `"searchCompanies"`.
    pub fn find(&self, operation_name: &str) -> Result<&Operation, RegistryError> {
        operation_name
            .parse::<OperationName>()
            .ok()
            .and_then(|name| self.operations.get(&name))
            .ok_or_else(|| RegistryError::UnknownOperation(operation_name.to_string()))
    }

    pub fn get(&self, name: OperationName) -> Option<&Operation> {
        self.operations.get(&name)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
