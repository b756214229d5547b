use serde::{Deserialize, Serialize};

pub const TITLE_TAG: &str = "ars:title";
pub const DESCRIPTION_TAG: &str = "ars:description";
pub const REDIRECT_TAG: &str = "ars:redirect";
pub const SEARCH_TAG: &str = "ars:tags";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A transaction node as returned by the indexing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Record {
    /// First tag carrying `name`. Later tags with the same name are ignored.
    pub fn first_tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    pub fn redirect(&self) -> Option<&str> {
        self.first_tag(REDIRECT_TAG).map(|tag| tag.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub record: Record,
}

impl ResultEntry {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn distinguished(&self) -> DistinguishedTags {
        DistinguishedTags::from_record(&self.record)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinguishedTags {
    pub title: Option<String>,
    pub description: Option<String>,
    pub redirect: Option<String>,
}

impl DistinguishedTags {
    pub fn from_record(record: &Record) -> Self {
        let value_of = |name: &str| record.first_tag(name).map(|tag| tag.value.clone());
        Self {
            title: value_of(TITLE_TAG),
            description: value_of(DESCRIPTION_TAG),
            redirect: value_of(REDIRECT_TAG),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub variables: QueryVariables,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryVariables {
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<TransactionsData>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsData {
    pub transactions: Option<TransactionConnection>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionConnection {
    pub edges: Vec<TransactionEdge>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionEdge {
    pub node: Record,
}
