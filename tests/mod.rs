mod common;
mod contract_tests;
mod summarizer_tests;
