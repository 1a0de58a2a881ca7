use std::cell::RefCell;
use std::fmt;

use crate::domain::error::WriteError;
use crate::domain::model::book::Book;
use crate::domain::writer::BookWriter;

use super::error::{MockError, UnmetExpectation};
use super::expectation::{Expectation, Matcher, Outcome};

/// 1回分の呼び出し記録
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall<E = WriteError> {
    pub book: Book,
    pub outcome: Result<(), E>,
}

struct State<E> {
    expectations: Vec<Expectation<E>>,
    calls: Vec<RecordedCall<E>>,
    /// 呼び出し時に起きたハーネスの失敗。panicが捕捉されてもteardownで報告する。
    failures: Vec<MockError>,
}

/// `BookWriter` のテスト用Mock。
///
/// 期待値を登録 → テスト対象を実行 → スコープ終了時（Drop）に期待値を検証する。
/// 想定外の呼び出しはその場でpanicし、失敗はMock側にも記録してteardownで再度報告する。
pub struct MockBookWriter<E = WriteError> {
    state: RefCell<State<E>>,
}

impl<E> Default for MockBookWriter<E> {
    fn default() -> Self {
        Self {
            state: RefCell::new(State {
                expectations: Vec::new(),
                calls: Vec::new(),
                failures: Vec::new(),
            }),
        }
    }
}

impl<E> MockBookWriter<E> {
    /// Mockを作る。Drop時に全期待値が満たされたかを検証する。
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定Bookと等価な引数での `insert` を期待する。
    /// 照合は登録順で、回数上限に達した期待値は次へ譲る。
    pub fn expect_insert(&mut self, book: Book) -> &mut Expectation<E> {
        self.push_expectation(Expectation::exact(book))
    }

    /// 引数を問わない `insert` を期待する。
    pub fn expect_insert_any(&mut self) -> &mut Expectation<E> {
        self.push_expectation(Expectation::new(Matcher::Any))
    }

    pub fn expect_insert_matching<P>(&mut self, predicate: P) -> &mut Expectation<E>
    where
        P: Fn(&Book) -> bool + 'static,
    {
        self.push_expectation(Expectation::predicate(predicate))
    }

    fn push_expectation(&mut self, exp: Expectation<E>) -> &mut Expectation<E> {
        let expectations = &mut self.state.get_mut().expectations;
        expectations.push(exp);
        let index = expectations.len() - 1;
        &mut expectations[index]
    }

    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    /// teardown検証（panicしない版）。
    /// 記録済みのハーネスの失敗と、未達の期待値をまとめて報告する。
    pub fn verify(&self) -> Result<(), MockError> {
        let state = self.state.borrow();
        let mut errors = state.failures.clone();
        let unmet: Vec<UnmetExpectation> = state
            .expectations
            .iter()
            .enumerate()
            .filter(|(_, exp)| !exp.expected_times().is_satisfied(exp.call_count()))
            .map(|(index, exp)| UnmetExpectation {
                index,
                matcher: format!("{:?}", exp.matcher()),
                expected: exp.expected_times(),
                actual: exp.call_count(),
            })
            .collect();

        if !unmet.is_empty() {
            errors.push(MockError::UnmetExpectations(unmet));
        }
        if errors.len() > 1 {
            return Err(MockError::Multiple(errors));
        }
        match errors.pop() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// 記録済みのハーネスの失敗を取り出す。
    /// 失敗を意図的に起こして検査したテストが、teardownで再度落ちないようにする。
    pub fn take_failures(&self) -> Vec<MockError> {
        std::mem::take(&mut self.state.borrow_mut().failures)
    }

    /// teardown検証。未達の期待値があればpanicする。
    pub fn assert_expectations(&self) {
        if let Err(e) = self.verify() {
            panic!("{e}");
        }
    }

    pub fn assert_number_of_calls(&self, expected: usize) {
        let actual = self.call_count();
        assert_eq!(
            actual, expected,
            "mock: expected insert to be called {expected} time(s), got {actual}"
        );
    }

    pub fn assert_called_with(&self, book: &Book) {
        assert!(
            self.was_called_with(book),
            "mock: expected insert({book:?}) to have been called, calls: {:?}",
            self.called_books()
        );
    }

    pub fn assert_not_called_with(&self, book: &Book) {
        assert!(
            !self.was_called_with(book),
            "mock: expected insert({book:?}) not to have been called"
        );
    }

    fn was_called_with(&self, book: &Book) -> bool {
        self.state.borrow().calls.iter().any(|c| &c.book == book)
    }

    fn called_books(&self) -> Vec<Book> {
        self.state
            .borrow()
            .calls
            .iter()
            .map(|c| c.book.clone())
            .collect()
    }

    /// 一致する期待値を選び、回数を進めて結果の出し方を返す。
    /// 失敗はここで記録するため、呼び出し側がErrやpanicを握りつぶしても残る。
    fn dispatch(&self, book: &Book) -> Result<Outcome<E>, MockError>
    where
        E: Clone,
    {
        let mut state = self.state.borrow_mut();
        let result = Self::select(&mut state, book);
        if let Err(e) = &result {
            tracing::error!(error = %e, "mock harness failure");
            state.failures.push(e.clone());
        }
        result
    }

    fn select(state: &mut State<E>, book: &Book) -> Result<Outcome<E>, MockError>
    where
        E: Clone,
    {
        let registered = state.expectations.len();

        let mut exhausted = None;
        let mut selected = None;
        for (index, exp) in state.expectations.iter().enumerate() {
            if !exp.matcher().matches(book) {
                continue;
            }
            if exp.expected_times().is_exhausted(exp.call_count()) {
                if exhausted.is_none() {
                    exhausted = Some((index, exp.call_count()));
                }
                continue;
            }
            selected = Some(index);
            break;
        }

        let Some(index) = selected else {
            return Err(match exhausted {
                Some((index, limit)) => MockError::CalledTooOften {
                    book: format!("{book:?}"),
                    index,
                    limit,
                },
                None => MockError::UnexpectedCall {
                    book: format!("{book:?}"),
                    registered,
                },
            });
        };

        let exp = &mut state.expectations[index];
        let outcome = exp.outcome().cloned().ok_or_else(|| MockError::MissingOutcome {
            book: format!("{book:?}"),
            index,
        })?;
        exp.record_hit();
        tracing::trace!(index, calls = exp.call_count(), "mock insert matched");
        Ok(outcome)
    }
}

impl<E: Clone> MockBookWriter<E> {
    /// `insert` のpanicしない版。
    /// 外側のErrはハーネスの失敗、内側のResultは設定された戻り値。
    pub fn try_insert(&self, book: &Book) -> Result<Result<(), E>, MockError> {
        let outcome = self.dispatch(book)?;
        // borrowを解放してから計算する（結果関数がMockを参照できるように）
        let result = outcome.produce(book);
        self.state.borrow_mut().calls.push(RecordedCall {
            book: book.clone(),
            outcome: result.clone(),
        });
        Ok(result)
    }

    /// 呼び出し履歴（呼び出し順）
    pub fn calls(&self) -> Vec<RecordedCall<E>> {
        self.state.borrow().calls.clone()
    }
}

impl<E> BookWriter for MockBookWriter<E>
where
    E: std::error::Error + Clone + Send + Sync + 'static,
{
    type Error = E;

    fn insert(&self, book: &Book) -> Result<(), E> {
        match self.try_insert(book) {
            Ok(result) => {
                tracing::debug!(book_id = %book.id(), ok = result.is_ok(), "mock insert");
                result
            }
            Err(e) => panic!("{e}"),
        }
    }
}

impl<E> Drop for MockBookWriter<E> {
    fn drop(&mut self) {
        // 既にpanic中なら二重panic（abort）を避け、元の失敗を報告させる
        if std::thread::panicking() {
            return;
        }
        self.assert_expectations();
    }
}

impl<E> fmt::Debug for MockBookWriter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MockBookWriter")
            .field("expectations", &state.expectations)
            .field("calls", &state.calls.len())
            .finish()
    }
}
