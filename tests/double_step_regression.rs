//! Regression tests for the middle-wheel double step.
//!
//! The middle wheel of the historical machine moves on two consecutive
//! keystrokes when it reaches its notch: once carried by the right wheel,
//! and again on the next keystroke because its own notch pawl engages.
//! These tests pin that behaviour for every wheel used in the middle slot.

use enigma::{Machine, MachineState, RotorModel, RotorOrder};

const NO_PLUGS: [&str; 0] = [];

/// Records the key after each of `n` keystrokes.
fn keys_after(machine: &mut Machine, n: usize) -> Vec<String> {
    (0..n)
        .map(|_| {
            machine.encode_decode_letter("A").unwrap();
            machine.key()
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Historical sequences
// ═══════════════════════════════════════════════════════════════════════

/// ADU -> ADV -> AEW -> BFX: the textbook double step for I II III.
#[test]
fn textbook_sequence_i_ii_iii() {
    let mut machine = Machine::new(&["I", "II", "III"], "ADU", NO_PLUGS).unwrap();
    assert_eq!(keys_after(&mut machine, 4), vec!["ADV", "AEW", "BFX", "BFY"]);
}

/// Wheel V in the middle turns over at Z.
#[test]
fn middle_wheel_v_double_steps_at_z() {
    let mut machine = Machine::new(&["II", "V", "I"], "AYP", NO_PLUGS).unwrap();
    assert_eq!(keys_after(&mut machine, 3), vec!["AYQ", "AZR", "BAS"]);
}

/// Wheel III in the middle turns over at V.
#[test]
fn middle_wheel_iii_double_steps_at_v() {
    let mut machine = Machine::new(&["V", "III", "II"], "CUD", NO_PLUGS).unwrap();
    assert_eq!(keys_after(&mut machine, 3), vec!["CUE", "CVF", "DWG"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Parked middle wheel
// ═══════════════════════════════════════════════════════════════════════

/// With the middle wheel parked on its notch, a single keystroke moves all
/// three wheels, for every model in the middle slot.
#[test]
fn parked_middle_moves_all_three_wheels() {
    for middle in RotorModel::ALL {
        let others: Vec<RotorModel> = RotorModel::ALL
            .into_iter()
            .filter(|&m| m != middle)
            .collect();
        let order = RotorOrder::new([others[0], middle, others[1]]).unwrap();
        let start = MachineState::new([0, middle.notch_position(), 0]);

        let next = start.advanced(&order);

        assert_eq!(
            next.offsets(),
            [1, (middle.notch_position() + 1) % 26, 1],
            "middle wheel {} parked at {}",
            middle,
            middle.notch()
        );
    }
}

/// The left wheel has no neighbour to carry even when it sits at its notch.
#[test]
fn left_wheel_at_notch_does_not_double_step() {
    let mut machine = Machine::new(&["I", "II", "III"], "QAA", NO_PLUGS).unwrap();
    assert_eq!(keys_after(&mut machine, 2), vec!["QAB", "QAC"]);
}

/// A full cycle of the middle wheel moves the left wheel exactly once.
#[test]
fn left_wheel_moves_once_per_middle_revolution() {
    let order = RotorOrder::default();
    let mut state = MachineState::from_key("AAA").unwrap();
    let mut left_moves = 0;
    // 25 carries plus one double step turn the middle wheel once.
    for _ in 0..(26 * 25) {
        let next = state.advanced(&order);
        if next.offsets()[0] != state.offsets()[0] {
            left_moves += 1;
        }
        state = next;
    }
    assert_eq!(left_moves, 1);
    assert_eq!(state.key(), "BAA");
}
