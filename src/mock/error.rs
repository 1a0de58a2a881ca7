use std::fmt;

use super::expectation::Times;

/// テストハーネス側の失敗。Mockの設定と実際の呼び出しが食い違ったことを示す。
/// `insert` の戻り値（ドメインの失敗）とは別経路で、テストを失敗させる。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockError {
    #[error("mock: unexpected call insert({book}); none of {registered} expectation(s) matched")]
    UnexpectedCall { book: String, registered: usize },

    #[error("mock: insert({book}) called too often; expectation #{index} allows {limit} call(s)")]
    CalledTooOften {
        book: String,
        index: usize,
        limit: usize,
    },

    #[error(
        "mock: expectation #{index} matched insert({book}) but has no outcome; \
         use returning, return_ok, return_err or returning_with"
    )]
    MissingOutcome { book: String, index: usize },

    #[error("mock: unmet expectations:{}", format_unmet(.0))]
    UnmetExpectations(Vec<UnmetExpectation>),

    /// teardownで複数の失敗が残っていた場合
    #[error("mock: {} failure(s):{}", .0.len(), format_failures(.0))]
    Multiple(Vec<MockError>),
}

/// 満たされなかった期待値1件分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmetExpectation {
    pub index: usize,
    pub matcher: String,
    pub expected: Times,
    pub actual: usize,
}

impl fmt::Display for UnmetExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} insert({}): expected {}, got {} call(s)",
            self.index, self.matcher, self.expected, self.actual
        )
    }
}

fn format_unmet(unmet: &[UnmetExpectation]) -> String {
    unmet.iter().map(|u| format!("\n  {u}")).collect()
}

fn format_failures(failures: &[MockError]) -> String {
    failures.iter().map(|e| format!("\n- {e}")).collect()
}
