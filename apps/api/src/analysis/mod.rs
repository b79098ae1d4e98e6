// Opportunity risk analysis pipeline.
// Content goes to the model through llm_client::TextModel; the findings are
// reconciled with the URL trust registry before they leave this module.

pub mod extraction;
pub mod handlers;
pub mod merger;
pub mod models;
pub mod prompts;
pub mod recommendations;
pub mod response_parser;
pub mod service;
pub mod trust;

#[cfg(test)]
pub mod test_support;
