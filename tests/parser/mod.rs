//! Parser integration tests.

mod tests_recovery;
