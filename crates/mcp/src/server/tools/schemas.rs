//! Typed tool parameters. Their JSON Schemas are what clients see in `tools/list`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single LinkedIn person.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonUrlParams {
    /// LinkedIn profile URL of the person, e.g. 'https://www.linkedin.com/in/john-doe'.
    #[schemars(length(min = 1))]
    pub person_url: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageParams {
    /// LinkedIn profile URL of the recipient.
    #[schemars(length(min = 1))]
    pub person_url: String,
    /// Message text. Must not be empty.
    #[schemars(length(min = 1))]
    pub text: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvSendMessageParams {
    /// LinkedIn profile URL of the recipient.
    #[schemars(length(min = 1))]
    pub person_url: String,
    /// Message text. Must not be empty.
    #[schemars(length(min = 1))]
    pub text: String,
    /// Subject line of the Sales Navigator message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetConversationParams {
    /// LinkedIn profile URL of the person whose conversation to read.
    #[schemars(length(min = 1))]
    pub person_url: String,
    /// ISO 8601 timestamp; only messages after it are returned. Omit for the whole history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendConnectionRequestParams {
    /// LinkedIn profile URL of the person to connect with.
    #[schemars(length(min = 1))]
    pub person_url: String,
    /// Optional personalized note attached to the invitation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Filters shared by people searches and connection listings.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeopleFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Current job title or position keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_companies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_companies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schools: Option<Vec<String>>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvPeopleFilter {
    #[serde(flatten)]
    pub base: PeopleFilter,
    /// Years-of-experience buckets, e.g. '3-5'.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<Vec<String>>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveConnectionsParams {
    /// Maximum number of connections to return (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<PeopleFilter>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPeopleParams {
    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Maximum number of results (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<PeopleFilter>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvSearchPeopleParams {
    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Maximum number of results (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<NvPeopleFilter>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "11-50")]
    UpTo50,
    #[serde(rename = "51-200")]
    UpTo200,
    #[serde(rename = "201-500")]
    UpTo500,
    #[serde(rename = "501-1000")]
    UpTo1000,
    #[serde(rename = "1001-5000")]
    UpTo5000,
    #[serde(rename = "5001-10000")]
    UpTo10000,
    #[serde(rename = "10001+")]
    Over10000,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    /// Employee-count buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<CompanySize>>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvCompanyFilter {
    #[serde(flatten)]
    pub base: CompanyFilter,
    /// Annual revenue range in millions of USD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<RevenueRange>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchCompaniesParams {
    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Maximum number of results (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<CompanyFilter>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvSearchCompaniesParams {
    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Maximum number of results (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<NvCompanyFilter>,
}

/// Settings for a posts/comments/reactions follow-up.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRetrievalConfig {
    /// Number of items to retrieve (1-20, default 20).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 20))]
    pub limit: Option<u32>,
    /// ISO 8601 timestamp; only items after it are returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FetchPersonParams {
    /// LinkedIn profile URL of the person to fetch.
    #[schemars(length(min = 1))]
    pub person_url: String,
    /// Also retrieve work experience. Slower; default false.
    #[serde(default)]
    pub retrieve_experience: bool,
    /// Also retrieve education. Slower; default false.
    #[serde(default)]
    pub retrieve_education: bool,
    /// Also retrieve skills. Slower; default false.
    #[serde(default)]
    pub retrieve_skills: bool,
    /// Also retrieve languages. Slower; default false.
    #[serde(default)]
    pub retrieve_languages: bool,
    /// Also retrieve recent posts. Slower; default false.
    #[serde(default)]
    pub retrieve_posts: bool,
    /// Also retrieve recent comments. Slower; default false.
    #[serde(default)]
    pub retrieve_comments: bool,
    /// Also retrieve recent reactions. Slower; default false.
    #[serde(default)]
    pub retrieve_reactions: bool,
    /// Used only when retrievePosts is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_retrieval_config: Option<ActivityRetrievalConfig>,
    /// Used only when retrieveComments is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_retrieval_config: Option<ActivityRetrievalConfig>,
    /// Used only when retrieveReactions is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions_retrieval_config: Option<ActivityRetrievalConfig>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvFetchPersonParams {
    /// Sales Navigator hashed profile URL of the person.
    #[schemars(length(min = 1))]
    pub person_hashed_url: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schools: Option<Vec<String>>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeesRetrievalConfig {
    /// Number of employees to retrieve (1-500).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 500))]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<EmployeeFilter>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvEmployeeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experiences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schools: Option<Vec<String>>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvEmployeesRetrievalConfig {
    /// Number of employees to retrieve (1-500).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 500))]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<NvEmployeeFilter>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionMakersRetrievalConfig {
    /// Number of decision makers to retrieve (1-20).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 20))]
    pub limit: Option<u32>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FetchCompanyParams {
    /// LinkedIn company page URL.
    #[schemars(length(min = 1))]
    pub company_url: String,
    /// Also retrieve employees. Slower; default false.
    #[serde(default)]
    pub retrieve_employees: bool,
    /// Also retrieve decision makers. Slower; default false.
    #[serde(default, rename = "retrieveDMs")]
    pub retrieve_dms: bool,
    /// Also retrieve recent posts. Slower; default false.
    #[serde(default)]
    pub retrieve_posts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees_retrieval_config: Option<EmployeesRetrievalConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dms_retrieval_config: Option<DecisionMakersRetrievalConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_retrieval_config: Option<ActivityRetrievalConfig>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NvFetchCompanyParams {
    /// Sales Navigator hashed company URL.
    #[schemars(length(min = 1))]
    pub company_hashed_url: String,
    /// Also retrieve employees. Slower; default false.
    #[serde(default)]
    pub retrieve_employees: bool,
    /// Also retrieve decision makers. Slower; default false.
    #[serde(default, rename = "retrieveDMs")]
    pub retrieve_dms: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees_retrieval_config: Option<NvEmployeesRetrievalConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dms_retrieval_config: Option<DecisionMakersRetrievalConfig>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostUrlParams {
    /// LinkedIn post URL.
    #[schemars(length(min = 1))]
    pub post_url: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Love,
    Support,
    Celebrate,
    Insightful,
    Funny,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReactToPostParams {
    /// LinkedIn post URL.
    #[schemars(length(min = 1))]
    pub post_url: String,
    /// Reaction to leave on the post.
    #[serde(rename = "type")]
    pub reaction: ReactionType,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentOnPostParams {
    /// LinkedIn post URL.
    #[schemars(length(min = 1))]
    pub post_url: String,
    /// Comment text. Must not be empty.
    #[schemars(length(min = 1))]
    pub text: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Image,
    Video,
    Document,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostAttachment {
    /// Publicly accessible URL of the media file.
    #[schemars(length(min = 1))]
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    /// Display name; required for documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostParams {
    /// Post content, up to 3000 characters.
    #[schemars(length(min = 1, max = 3000))]
    pub text: String,
    /// Company page URL; the post is published as the company (admin access required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_url: Option<String>,
    /// Up to 9 images, or 1 video, or 1 document. Types cannot be mixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 9))]
    pub attachments: Option<Vec<PostAttachment>>,
}

/// No parameters.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EmptyParams {}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExecuteCustomWorkflowParams {
    /// Complete Linked API workflow definition (a single action object or an array of actions).
    pub definition: Value,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetWorkflowResultParams {
    /// The exact workflowId from the background workflow message.
    #[schemars(length(min = 1))]
    pub workflow_id: String,
    /// The exact operationName from the background workflow message. Required to decode the result.
    #[schemars(length(min = 1))]
    pub operation_name: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GetApiUsageParams {
    /// Start of the period, ISO 8601 (e.g. '2024-01-01T00:00:00Z').
    #[schemars(length(min = 1))]
    pub start: String,
    /// End of the period, ISO 8601. At most 30 days after start.
    #[schemars(length(min = 1))]
    pub end: String,
}
