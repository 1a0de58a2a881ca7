use serde::{Deserialize, Serialize};

use super::id::BookId;
use crate::domain::error::DomainError;

/// Book登録リクエスト（未検証）
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_year: Option<u16>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            published_year: None,
        }
    }

    pub fn published(mut self, year: u16) -> Self {
        self.published_year = Some(year);
        self
    }
}

/// Book: 永続化対象のエンティティ。
/// 比較は全フィールドの構造的等価（Mockの引数照合もこれに従う）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    published_year: Option<u16>,
}

impl Book {
    pub const MAX_YEAR: u16 = 9999;

    /// 新しいIDを採番して検証済みBookを作る。
    pub fn new(req: NewBook) -> Result<Self, DomainError> {
        Self::with_id(BookId::new(), req)
    }

    /// 既存IDでBookを作る。前後の空白は除去する。
    pub fn with_id(id: BookId, req: NewBook) -> Result<Self, DomainError> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        let author = req.author.trim();
        if author.is_empty() {
            return Err(DomainError::EmptyAuthor);
        }
        if let Some(year) = req.published_year {
            if year == 0 || year > Self::MAX_YEAR {
                return Err(DomainError::YearOutOfRange {
                    year,
                    max: Self::MAX_YEAR,
                });
            }
        }

        Ok(Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            published_year: req.published_year,
        })
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn published_year(&self) -> Option<u16> {
        self.published_year
    }
}
