use super::model::id::BookId;

/// Book生成時の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("author must not be empty")]
    EmptyAuthor,

    #[error("published year {year} out of range (1-{max})")]
    YearOutOfRange { year: u16, max: u16 },
}

/// 書き込み側が報告するドメインレベルの失敗。
/// 呼び出し元へ通常の戻り値として返る（テスト失敗ではない）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("book already exists: {0}")]
    Duplicate(BookId),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
