//! When steps for workload evaluation BDD scenarios.

use super::world::{WorkloadWorld, run_async};
use rstest_bdd_macros::when;
use tfms::audit::domain::RequestContext;

#[when("an administrator sets workload thresholds with min {min:u32} and max {max:u32}")]
fn administrator_sets_thresholds(world: &mut WorkloadWorld, min: u32, max: u32) {
    let result = run_async(world.settings_service.save_thresholds(
        &world.admin,
        min,
        max,
        &RequestContext::system(),
    ));
    world.last_settings_error = result.err();
}
