//! IDE feature integration tests, driven through `AnalysisHost`.

mod tests_code_actions;
mod tests_completion;
mod tests_document_index;
mod tests_hover;
