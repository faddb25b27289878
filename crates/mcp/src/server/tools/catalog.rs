use linkedapi_api::ConversationKind;
use linkedapi_types::OperationName;

use super::schemas::*;
use super::{ToolHandler, ToolSetError, ToolSpec};

const FETCH_PERSON_DESCRIPTION: &str = "Open a person's LinkedIn page and return their basic information (st.openPersonPage). \
Experience, education, skills, languages, posts, comments and reactions can be retrieved as well. \
PERFORMANCE: every retrieve* flag adds a follow-up action and significantly increases execution time. \
Start with basic info only and enable a flag only when the user explicitly asks for that data.";

const FETCH_COMPANY_DESCRIPTION: &str = "Open a company's LinkedIn page and return its basic information (st.openCompanyPage). \
Employees, decision makers and posts can be retrieved as well; each retrieve* flag significantly increases execution time.";

const GET_WORKFLOW_RESULT_DESCRIPTION: &str = "Continue waiting for a Linked API workflow that is running in the background. \
This is the NORMAL path for long operations, not an error fallback. \
When any tool answers with a workflowId and operationName, call this tool with those exact values. \
If it answers with the same kind of message again, call it again, and keep doing so until the final result arrives. \
NEVER retry the original tool: the workflow is already running and a retry would start a duplicate.";

pub(super) fn standard_tools() -> Result<Vec<ToolSpec>, ToolSetError> {
    use OperationName as Op;

    Ok(vec![
        ToolSpec::typed::<SendMessageParams>(
            "send_message",
            "Send a message to a person (st.sendMessage).",
            ToolHandler::confirmed(Op::SendMessage, "Message sent"),
        )?,
        ToolSpec::typed::<GetConversationParams>(
            "get_conversation",
            "Read the standard LinkedIn messaging conversation with a person. Syncs the conversation first if it has never been synced.",
            ToolHandler::Conversation(ConversationKind::St),
        )?
        .read_only(),
        ToolSpec::typed::<PersonUrlParams>(
            "sync_conversation",
            "Sync a standard LinkedIn conversation so it can be polled (st.syncConversation).",
            ToolHandler::confirmed(Op::SyncConversation, "Conversation synced"),
        )?,
        ToolSpec::typed::<PersonUrlParams>(
            "check_connection_status",
            "Check the connection status between your account and another person (st.checkConnectionStatus).",
            ToolHandler::workflow(Op::CheckConnectionStatus),
        )?
        .read_only(),
        ToolSpec::typed::<RetrieveConnectionsParams>(
            "retrieve_connections",
            "Retrieve your connections, optionally filtered (st.retrieveConnections).",
            ToolHandler::workflow(Op::RetrieveConnections),
        )?
        .read_only(),
        ToolSpec::typed::<SendConnectionRequestParams>(
            "send_connection_request",
            "Send a connection request to a person, with an optional note (st.sendConnectionRequest).",
            ToolHandler::confirmed(Op::SendConnectionRequest, "Connection request sent"),
        )?,
        ToolSpec::typed::<PersonUrlParams>(
            "withdraw_connection_request",
            "Withdraw the connection request sent to a person (st.withdrawConnectionRequest).",
            ToolHandler::workflow(Op::WithdrawConnectionRequest),
        )?,
        ToolSpec::typed::<EmptyParams>(
            "retrieve_pending_requests",
            "Retrieve pending connection requests sent from your account (st.retrievePendingRequests).",
            ToolHandler::workflow(Op::RetrievePendingRequests),
        )?
        .read_only(),
        ToolSpec::typed::<PersonUrlParams>(
            "remove_connection",
            "Remove a person from your connections (st.removeConnection).",
            ToolHandler::confirmed(Op::RemoveConnection, "Connection removed"),
        )?,
        ToolSpec::typed::<SearchCompaniesParams>(
            "search_companies",
            "Search for companies with optional location, industry and size filters (st.searchCompanies).",
            ToolHandler::workflow(Op::SearchCompanies),
        )?
        .read_only(),
        ToolSpec::typed::<SearchPeopleParams>(
            "search_people",
            "Search for people with optional name, position, location, company and school filters (st.searchPeople).",
            ToolHandler::workflow(Op::SearchPeople),
        )?
        .read_only(),
        ToolSpec::typed::<FetchCompanyParams>("fetch_company", FETCH_COMPANY_DESCRIPTION, ToolHandler::workflow(Op::FetchCompany))?
            .read_only(),
        ToolSpec::typed::<FetchPersonParams>("fetch_person", FETCH_PERSON_DESCRIPTION, ToolHandler::workflow(Op::FetchPerson))?
            .read_only(),
        ToolSpec::typed::<PostUrlParams>(
            "fetch_post",
            "Open a post and return its content and engagement data (st.openPost).",
            ToolHandler::workflow(Op::FetchPost),
        )?
        .read_only(),
        ToolSpec::typed::<ReactToPostParams>(
            "react_to_post",
            "React to a post with like, love, support, celebrate, insightful or funny (st.reactToPost).",
            ToolHandler::workflow(Op::ReactToPost),
        )?,
        ToolSpec::typed::<CommentOnPostParams>(
            "comment_on_post",
            "Leave a comment on a post (st.commentOnPost).",
            ToolHandler::confirmed(Op::CommentOnPost, "Comment posted"),
        )?,
        ToolSpec::typed::<CreatePostParams>(
            "create_post",
            "Create a LinkedIn post, optionally on a company page and with media attachments (st.createPost).",
            ToolHandler::workflow(Op::CreatePost),
        )?,
        ToolSpec::typed::<EmptyParams>(
            "retrieve_ssi",
            "Retrieve your current Social Selling Index (st.retrieveSSI).",
            ToolHandler::workflow(Op::RetrieveSsi),
        )?
        .read_only(),
        ToolSpec::typed::<EmptyParams>(
            "retrieve_performance",
            "Retrieve performance analytics from your LinkedIn dashboard (st.retrievePerformance).",
            ToolHandler::workflow(Op::RetrievePerformance),
        )?
        .read_only(),
        ToolSpec::typed::<NvSendMessageParams>(
            "nv_send_message",
            "Send a Sales Navigator message to a person (nv.sendMessage).",
            ToolHandler::confirmed(Op::NvSendMessage, "Message sent"),
        )?,
        ToolSpec::typed::<GetConversationParams>(
            "nv_get_conversation",
            "Read the Sales Navigator conversation with a person. Syncs the conversation first if it has never been synced.",
            ToolHandler::Conversation(ConversationKind::Nv),
        )?
        .read_only(),
        ToolSpec::typed::<PersonUrlParams>(
            "nv_sync_conversation",
            "Sync a Sales Navigator conversation so it can be polled (nv.syncConversation).",
            ToolHandler::confirmed(Op::NvSyncConversation, "Conversation synced"),
        )?,
        ToolSpec::typed::<NvSearchCompaniesParams>(
            "nv_search_companies",
            "Search for companies in Sales Navigator, including revenue filters (nv.searchCompanies).",
            ToolHandler::workflow(Op::NvSearchCompanies),
        )?
        .read_only(),
        ToolSpec::typed::<NvSearchPeopleParams>(
            "nv_search_people",
            "Search for people in Sales Navigator, including years-of-experience filters (nv.searchPeople).",
            ToolHandler::workflow(Op::NvSearchPeople),
        )?
        .read_only(),
        ToolSpec::typed::<NvFetchCompanyParams>(
            "nv_fetch_company",
            "Open a company page in Sales Navigator and return its basic information (nv.openCompanyPage). Employees and decision makers can be retrieved as well.",
            ToolHandler::workflow(Op::NvFetchCompany),
        )?
        .read_only(),
        ToolSpec::typed::<NvFetchPersonParams>(
            "nv_fetch_person",
            "Open a person page in Sales Navigator and return their basic information (nv.openPersonPage).",
            ToolHandler::workflow(Op::NvFetchPerson),
        )?
        .read_only(),
        ToolSpec::typed::<ExecuteCustomWorkflowParams>(
            "execute_custom_workflow",
            "Execute a custom Linked API workflow definition and return its raw completion.",
            ToolHandler::workflow(Op::CustomWorkflow),
        )?,
        ToolSpec::typed::<GetWorkflowResultParams>(
            "get_workflow_result",
            GET_WORKFLOW_RESULT_DESCRIPTION,
            ToolHandler::ResumeWorkflow,
        )?
        .read_only(),
        ToolSpec::typed::<GetApiUsageParams>(
            "get_api_usage",
            "Retrieve Linked API action usage statistics for a period of at most 30 days.",
            ToolHandler::ApiUsage,
        )?
        .read_only(),
    ])
}
