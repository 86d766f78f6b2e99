use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GreetRequest {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetResponse {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GetRequest {
    pub key: String,
}

/// `None` answers a successful set, `Some` a successful get.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueResponse {
    pub value: Option<String>,
}

/// Reason a set or get call was refused by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidOperation {
    EmptyKey,
    EmptyValue,
    KeyNotFound(String),
}

impl fmt::Display for InvalidOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "invalid operation: key is empty"),
            Self::EmptyValue => write!(f, "invalid operation: value is empty"),
            Self::KeyNotFound(key) => write!(f, "invalid operation: no key named `{}`", key),
        }
    }
}

impl std::error::Error for InvalidOperation {}

#[tarpc::service]
pub trait KeyValueService {
    /// Answer "Hello " followed by the given name
    async fn greet(req: GreetRequest) -> GreetResponse;
    /// Insert or overwrite a key-value pair
    async fn set_value(req: SetRequest) -> Result<KeyValueResponse, InvalidOperation>;
    /// Get a value by key
    async fn get_value(req: GetRequest) -> Result<KeyValueResponse, InvalidOperation>;
}
