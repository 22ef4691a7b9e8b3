//! Unit tests for the reporting module.
