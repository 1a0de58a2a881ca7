use std::path::{Path, PathBuf};

use crate::domain::error::WriteError;
use crate::domain::model::book::Book;
use crate::domain::writer::BookWriter;

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Rejected(#[from] WriteError),
}

/// JSONファイルによるBookWriter実装。
/// 1 Shelf = 1 JSONファイル（Bookの配列）。
pub struct JsonBookWriter {
    path: PathBuf,
}

impl JsonBookWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存済みBookを保存順で返す。ファイルが無ければ空。
    pub fn load_all(&self) -> Result<Vec<Book>, JsonStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let books: Vec<Book> = serde_json::from_str(&content)?;
        Ok(books)
    }

    fn save_all(&self, books: &[Book]) -> Result<(), JsonStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(books)?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// 書き込み用の一時ファイル。拡張子を置き換えず、ファイル名全体に `.tmp` を足す。
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl BookWriter for JsonBookWriter {
    type Error = JsonStoreError;

    fn insert(&self, book: &Book) -> Result<(), Self::Error> {
        let mut books = self.load_all()?;
        if books.iter().any(|b| b.id() == book.id()) {
            return Err(WriteError::Duplicate(book.id()).into());
        }
        books.push(book.clone());
        self.save_all(&books)?;
        tracing::debug!(book_id = %book.id(), path = %self.path.display(), "book inserted");
        Ok(())
    }
}
