use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(uuid::Uuid);

impl Default for BookId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl BookId {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既知のUUIDからIDを作る（インポート・テスト用）
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// 短縮ID（UUIDの先頭8文字）
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
