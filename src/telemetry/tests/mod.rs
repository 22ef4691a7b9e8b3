//! Tests for subscriber installation.

use crate::telemetry::{DEFAULT_DIRECTIVE, TelemetryError, init};

#[test]
fn second_install_is_refused() {
    assert!(init(DEFAULT_DIRECTIVE).is_ok());
    assert!(matches!(
        init(DEFAULT_DIRECTIVE),
        Err(TelemetryError::Install(_))
    ));
}
