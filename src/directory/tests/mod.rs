//! Unit tests for the staff directory.

mod domain_tests;
