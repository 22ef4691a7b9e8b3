//! Unit tests for the audit module.

mod domain_tests;
mod service_tests;
