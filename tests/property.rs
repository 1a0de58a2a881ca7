//! Property-based tests: mock invariants verified with proptest.

mod common;

use common::fixed_book;
use proptest::prelude::*;

use book_store::domain::error::WriteError;
use book_store::domain::model::book::{Book, NewBook};
use book_store::domain::writer::BookWriter;
use book_store::mock::{MockBookWriter, MockError};

fn outcome_strategy() -> impl Strategy<Value = Result<(), WriteError>> {
    prop_oneof![
        Just(Ok(())),
        "[a-z ]{0,20}".prop_map(|s| Err(WriteError::ConstraintViolation(s))),
        "[a-z ]{0,20}".prop_map(|s| Err(WriteError::Unavailable(s))),
        any::<u128>().prop_map(|n| Err(WriteError::Duplicate(fixed_book(n, "x", "y", None).id()))),
    ]
}

fn book_strategy() -> impl Strategy<Value = Book> {
    (
        any::<u128>(),
        "[A-Za-z][A-Za-z ]{0,30}",
        "[A-Za-z][A-Za-z .]{0,20}",
        proptest::option::of(1u16..=9999),
    )
        .prop_map(|(n, title, author, year)| fixed_book(n, &title, &author, year))
}

proptest! {
    /// 設定した結果がそのまま返る。
    #[test]
    fn configured_outcome_is_returned_exactly(
        book in book_strategy(),
        outcome in outcome_strategy(),
    ) {
        let mut writer: MockBookWriter = MockBookWriter::new();
        writer.expect_insert(book.clone()).returning(outcome.clone()).once();

        prop_assert_eq!(writer.insert(&book), outcome.clone());
        prop_assert_eq!(writer.calls().len(), 1);
        prop_assert_eq!(&writer.calls()[0].outcome, &outcome);
    }

    /// 期待値の無いBookは常にハーネスの失敗になる。
    #[test]
    fn unconfigured_record_is_rejected(
        expected in book_strategy(),
        title in "[A-Za-z]{1,10}",
    ) {
        let stray = Book::new(NewBook::new(title, "Stray Author")).unwrap();
        let mut writer: MockBookWriter = MockBookWriter::new();
        writer.expect_insert(expected).return_ok().maybe();

        let is_unexpected = matches!(
            writer.try_insert(&stray),
            Err(MockError::UnexpectedCall { .. })
        );
        prop_assert!(is_unexpected);
        prop_assert_eq!(writer.call_count(), 0);
        prop_assert_eq!(writer.take_failures().len(), 1);
    }

    /// ちょうどN回呼べば検証を通り、N回未満なら失敗する。
    #[test]
    fn exactly_n_calls_verify(n in 1usize..8, short_by in 1usize..8) {
        let book = fixed_book(42, "Counted", "Counter", None);
        let mut writer: MockBookWriter = MockBookWriter::new();
        writer.expect_insert(book.clone()).return_ok().times(n);

        let first = n.saturating_sub(short_by);
        for _ in 0..first {
            writer.insert(&book).unwrap();
        }
        prop_assert!(writer.verify().is_err());

        for _ in first..n {
            writer.insert(&book).unwrap();
        }
        prop_assert!(writer.verify().is_ok());

        let too_many = matches!(
            writer.try_insert(&book),
            Err(MockError::CalledTooOften { limit, .. }) if limit == n
        );
        prop_assert!(too_many);
        prop_assert_eq!(writer.take_failures().len(), 1);
    }
}
