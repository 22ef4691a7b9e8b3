//! Unit tests for workload thresholds and evaluation.

mod settings_tests;
