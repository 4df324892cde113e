//! Property-based tests for the Delegation State Machine.
#[cfg(test)]
mod tests {
    use crate::{
        delegation::{machine::DelegationSM, tests::*},
        prop_deterministic, prop_no_silent_acceptance, prop_terminal_states_reject,
    };

    // Property: State machine is deterministic
    prop_deterministic!(
        DelegationSM,
        create_sm,
        get_state,
        &(),
        arb_record(),
        arb_events()
    );

    // Property: No silent acceptance
    prop_no_silent_acceptance!(
        DelegationSM,
        create_sm,
        get_state,
        &(),
        arb_record(),
        arb_events()
    );

    // Property: Terminal states reject all events
    prop_terminal_states_reject!(
        DelegationSM,
        create_sm,
        &(),
        arb_terminal_state(),
        arb_events()
    );
}
