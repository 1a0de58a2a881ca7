//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use book_store::domain::error::WriteError;
use book_store::domain::model::book::{Book, NewBook};
use book_store::domain::model::id::BookId;
use book_store::domain::writer::BookWriter;

// =============================================================================
// InMemoryWriter: Mockではない素朴なFake
// =============================================================================

/// ファイルI/O不要のインメモリWriter。重複IDは拒否する。
pub struct InMemoryWriter {
    books: RefCell<Vec<Book>>,
}

impl InMemoryWriter {
    pub fn new() -> Self {
        Self {
            books: RefCell::new(Vec::new()),
        }
    }

    pub fn books(&self) -> Vec<Book> {
        self.books.borrow().clone()
    }
}

impl BookWriter for InMemoryWriter {
    type Error = WriteError;

    fn insert(&self, book: &Book) -> Result<(), Self::Error> {
        let mut books = self.books.borrow_mut();
        if books.iter().any(|b| b.id() == book.id()) {
            return Err(WriteError::Duplicate(book.id()));
        }
        books.push(book.clone());
        Ok(())
    }
}

// =============================================================================
// Fixtures: 固定IDのBook
// =============================================================================

/// UUIDを固定したBook（スナップショット比較用）
pub fn fixed_book(n: u128, title: &str, author: &str, year: Option<u16>) -> Book {
    let req = NewBook {
        title: title.into(),
        author: author.into(),
        published_year: year,
    };
    Book::with_id(BookId::from_uuid(uuid::Uuid::from_u128(n)), req).unwrap()
}

/// 標準的なテスト用Shelf:
/// ```text
/// 1. Kindred by Octavia E. Butler (1979)
/// 2. The Dispossessed by Ursula K. Le Guin (1974)
/// 3. Piranesi by Susanna Clarke (no year)
/// ```
pub fn standard_shelf() -> Vec<Book> {
    vec![
        fixed_book(1, "Kindred", "Octavia E. Butler", Some(1979)),
        fixed_book(2, "The Dispossessed", "Ursula K. Le Guin", Some(1974)),
        fixed_book(3, "Piranesi", "Susanna Clarke", None),
    ]
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
