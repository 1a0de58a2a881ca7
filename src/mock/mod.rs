//! Hand-written test double for [`BookWriter`](crate::domain::writer::BookWriter).
//!
//! Expectations -> code under test -> verification on drop.
//! Two failure channels are kept apart: the configured `Result` returned from
//! `insert`, and [`MockError`] which fails the enclosing test.

pub mod book_writer;
pub mod error;
pub mod expectation;

pub use book_writer::{MockBookWriter, RecordedCall};
pub use error::{MockError, UnmetExpectation};
pub use expectation::{Expectation, Matcher, Outcome, Times};
