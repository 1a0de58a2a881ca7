use std::fmt;
use std::rc::Rc;

use crate::domain::model::book::Book;

type PredicateFn = Rc<dyn Fn(&Book) -> bool>;
type OutcomeFn<E> = Rc<dyn Fn(&Book) -> Result<(), E>>;

/// 引数の照合方法
#[derive(Clone)]
pub enum Matcher {
    /// 任意のBookに一致
    Any,
    /// 構造的等価（`PartialEq`）で一致
    Exact(Book),
    /// 任意の述語
    Predicate(PredicateFn),
}

impl Matcher {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == book,
            Self::Predicate(predicate) => predicate(book),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any book"),
            Self::Exact(book) => write!(f, "{book:?}"),
            Self::Predicate(_) => f.write_str("<predicate>"),
        }
    }
}

/// 呼び出し時に返す結果
#[derive(Clone)]
pub enum Outcome<E> {
    Value(Result<(), E>),
    Computed(OutcomeFn<E>),
}

impl<E: Clone> Outcome<E> {
    pub fn produce(&self, book: &Book) -> Result<(), E> {
        match self {
            Self::Value(result) => result.clone(),
            Self::Computed(f) => f(book),
        }
    }
}

/// 期待する呼び出し回数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Times {
    #[default]
    AtLeastOnce,
    Exactly(usize),
    /// 0回でも可
    Maybe,
}

impl Times {
    /// これ以上の呼び出しを受け付けないか
    pub fn is_exhausted(&self, calls: usize) -> bool {
        matches!(self, Self::Exactly(n) if calls >= *n)
    }

    /// teardown時に満たされているか
    pub fn is_satisfied(&self, calls: usize) -> bool {
        match self {
            Self::AtLeastOnce => calls >= 1,
            Self::Exactly(n) => calls == *n,
            Self::Maybe => true,
        }
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeastOnce => f.write_str("at least once"),
            Self::Exactly(n) => write!(f, "exactly {n} call(s)"),
            Self::Maybe => f.write_str("any number of calls"),
        }
    }
}

/// `insert` に対する期待値1件。
/// 引数の照合方法は登録時に決まり、以後変わらない。呼び出しで進むのは回数だけ。
pub struct Expectation<E> {
    matcher: Matcher,
    outcome: Option<Outcome<E>>,
    times: Times,
    calls: usize,
}

impl<E> Expectation<E> {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            outcome: None,
            times: Times::default(),
            calls: 0,
        }
    }

    /// 構造的等価で照合する期待値
    pub fn exact(book: Book) -> Self {
        Self::new(Matcher::Exact(book))
    }

    pub fn predicate<P>(predicate: P) -> Self
    where
        P: Fn(&Book) -> bool + 'static,
    {
        Self::new(Matcher::Predicate(Rc::new(predicate)))
    }

    // --- 戻り値 ---

    pub fn returning(&mut self, result: Result<(), E>) -> &mut Self {
        self.outcome = Some(Outcome::Value(result));
        self
    }

    pub fn return_ok(&mut self) -> &mut Self {
        self.returning(Ok(()))
    }

    pub fn return_err(&mut self, err: E) -> &mut Self {
        self.returning(Err(err))
    }

    /// 呼び出しごとに引数から結果を計算する。
    pub fn returning_with<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Book) -> Result<(), E> + 'static,
    {
        self.outcome = Some(Outcome::Computed(Rc::new(f)));
        self
    }

    // --- 回数 ---

    pub fn times(&mut self, n: usize) -> &mut Self {
        self.times = Times::Exactly(n);
        self
    }

    pub fn once(&mut self) -> &mut Self {
        self.times(1)
    }

    pub fn maybe(&mut self) -> &mut Self {
        self.times = Times::Maybe;
        self
    }

    // --- 参照 ---

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn outcome(&self) -> Option<&Outcome<E>> {
        self.outcome.as_ref()
    }

    pub fn expected_times(&self) -> Times {
        self.times
    }

    pub fn call_count(&self) -> usize {
        self.calls
    }

    pub(crate) fn record_hit(&mut self) {
        self.calls += 1;
    }
}

impl<E> fmt::Debug for Expectation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("matcher", &self.matcher)
            .field("has_outcome", &self.outcome.is_some())
            .field("times", &self.times)
            .field("calls", &self.calls)
            .finish()
    }
}
