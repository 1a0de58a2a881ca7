use crate::domain::model::book::{Book, NewBook};
use crate::domain::writer::BookWriter;

use super::error::AppError;

/// 蔵書登録のユースケース。
/// 検証 → insert の順で操作し、書き込み先は `BookWriter` に委ねる。
pub struct CatalogService<W: BookWriter> {
    writer: W,
}

impl<W: BookWriter> CatalogService<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Bookを検証して登録する。
    pub fn register(&self, req: NewBook) -> Result<Book, AppError> {
        let book = Book::new(req)?;
        self.persist(&book)?;
        tracing::info!(book_id = %book.id(), title = book.title(), "book registered");
        Ok(book)
    }

    /// 既存Bookを順に登録する。最初の失敗で中断し、それまでの件数を返す。
    pub fn import(&self, books: Vec<Book>) -> Result<usize, AppError> {
        let mut inserted = 0;
        for book in &books {
            if let Err(e) = self.writer.insert(book) {
                tracing::warn!(book_id = %book.id(), inserted, error = %e, "import aborted");
                return Err(AppError::ImportAborted {
                    inserted,
                    source: Box::new(e),
                });
            }
            inserted += 1;
        }
        tracing::info!(inserted, "import finished");
        Ok(inserted)
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    // --- private ---

    fn persist(&self, book: &Book) -> Result<(), AppError> {
        self.writer.insert(book).map_err(|e| {
            tracing::warn!(book_id = %book.id(), error = %e, "insert rejected");
            AppError::Storage(Box::new(e))
        })
    }
}
