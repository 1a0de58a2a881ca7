use super::model::book::Book;

/// 書き込みの抽象。Infra層が実装し、テストではMockが差し替わる。
pub trait BookWriter {
    type Error: std::error::Error + Send + Sync + 'static;

    fn insert(&self, book: &Book) -> Result<(), Self::Error>;
}

impl<W: BookWriter + ?Sized> BookWriter for &W {
    type Error = W::Error;

    fn insert(&self, book: &Book) -> Result<(), Self::Error> {
        (**self).insert(book)
    }
}
