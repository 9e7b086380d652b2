//! Path parameter extractors
//!
//! Snowflake path parameters arrive as strings and are parsed explicitly so
//! a bad id yields a 400 rather than a routing miss.

use dm_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with counterpart_id
#[derive(Debug, serde::Deserialize)]
pub struct CounterpartIdPath {
    pub counterpart_id: String,
}

impl CounterpartIdPath {
    /// Parse counterpart_id as Snowflake
    pub fn counterpart_id(&self) -> Result<Snowflake, ApiError> {
        self.counterpart_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid counterpart_id format"))
    }
}

/// Path parameters with message_id
#[derive(Debug, serde::Deserialize)]
pub struct MessageIdPath {
    pub message_id: String,
}

impl MessageIdPath {
    /// Parse message_id as Snowflake
    pub fn message_id(&self) -> Result<Snowflake, ApiError> {
        self.message_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid message_id format"))
    }
}
