//! Property-based tests for the Unbonding State Machine.
#[cfg(test)]
mod tests {
    use crate::{
        prop_deterministic, prop_no_silent_acceptance, prop_terminal_states_reject,
        unbonding::{machine::UnbondingSM, tests::*},
    };

    // Property: State machine is deterministic
    prop_deterministic!(
        UnbondingSM,
        create_sm,
        get_state,
        &test_cfg(),
        arb_record(),
        arb_events()
    );

    // Property: No silent acceptance
    prop_no_silent_acceptance!(
        UnbondingSM,
        create_sm,
        get_state,
        &test_cfg(),
        arb_record(),
        arb_events()
    );

    // Property: Terminal states reject all events
    prop_terminal_states_reject!(
        UnbondingSM,
        create_sm,
        &test_cfg(),
        arb_terminal_state(),
        arb_events()
    );
}
