//! Semantic analysis and diagnostics integration tests.

mod tests_fixes;
mod tests_properties;
mod tests_scenarios;
