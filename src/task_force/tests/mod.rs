//! Unit tests for the task force module.
