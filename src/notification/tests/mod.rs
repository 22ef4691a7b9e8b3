//! Unit tests for notification rendering and delivery.
