use super::Method;
use crate::error::PigeonError;
use crate::types::Update;
use serde::Serialize;

pub const DEFAULT_UPDATE_LIMIT: u32 = 100;

/// `getUpdates`: fetch pending updates, long-polling up to `timeout` seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUpdates {
    /// First update id to return. Earlier updates are confirmed and dropped
    /// by the server.
    pub offset: i64,
    /// 1-100.
    pub limit: u32,
    /// Long-poll timeout in seconds; 0 is short polling.
    pub timeout: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<String>,
}

impl Default for GetUpdates {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_UPDATE_LIMIT,
            timeout: 0,
            allowed_updates: Vec::new(),
        }
    }
}

impl GetUpdates {
    pub fn new(offset: i64) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }
}

impl Method for GetUpdates {
    const NAME: &'static str = "getUpdates";
    type Response = Vec<Update>;

    fn validate(&self) -> Result<(), PigeonError> {
        if self.offset < 0 {
            return Err(PigeonError::validation("offset", "must not be negative"));
        }
        if !(1..=100).contains(&self.limit) {
            return Err(PigeonError::validation("limit", "must be between 1 and 100"));
        }
        Ok(())
    }
}
