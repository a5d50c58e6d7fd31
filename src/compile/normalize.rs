//! Control-suffix normalization
//!
//! Control instructions configure the voice for whatever comes after them,
//! so a run of them at the end of the list cannot do anything. People write
//! them there anyway; rather than silently dropping the run, the whole run
//! moves to the front of the list with its internal order intact.

use crate::instruction::Instruction;
use log::warn;

/// Move a trailing run of control-only instructions to the front.
///
/// Runs before loop expansion. A list whose instructions are all controls
/// is left alone, since no reordering would give them anything to affect.
/// Normalizing an already-normalized list changes nothing.
pub fn normalize(mut instructions: Vec<Instruction>) -> Vec<Instruction> {
    let trailing = instructions
        .iter()
        .rev()
        .take_while(|instruction| instruction.is_control())
        .count();

    if trailing == 0 {
        return instructions;
    }
    if trailing == instructions.len() {
        warn!("All instructions configure the voice; nothing will be read");
        return instructions;
    }

    warn!(
        "{} trailing instruction(s) configure the voice for nothing; applying them to the whole line instead",
        trailing
    );
    let mut moved = instructions.split_off(instructions.len() - trailing);
    moved.append(&mut instructions);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Rate;

    fn text(s: &str) -> Instruction {
        Instruction::Text(s.to_string())
    }

    fn rate(step: u8) -> Instruction {
        Instruction::Rate(Rate::new(step).unwrap())
    }

    #[test]
    fn test_empty_list_unchanged() {
        assert_eq!(normalize(Vec::new()), Vec::new());
    }

    #[test]
    fn test_no_trailing_controls_unchanged() {
        let instructions = vec![rate(1), text("hello"), text("world")];
        assert_eq!(normalize(instructions.clone()), instructions);
    }

    #[test]
    fn test_trailing_run_moves_to_front() {
        let instructions = vec![text("hello"), rate(2), Instruction::Reset];
        assert_eq!(
            normalize(instructions),
            vec![rate(2), Instruction::Reset, text("hello")]
        );
    }

    #[test]
    fn test_run_keeps_internal_order() {
        let instructions = vec![
            text("a"),
            Instruction::Reset,
            rate(1),
            rate(5),
        ];
        assert_eq!(
            normalize(instructions),
            vec![Instruction::Reset, rate(1), rate(5), text("a")]
        );
    }

    #[test]
    fn test_only_maximal_run_moves() {
        // The rate in the middle is shielded by the text after it.
        let instructions = vec![rate(1), text("a"), rate(2), text("b"), rate(3)];
        assert_eq!(
            normalize(instructions),
            vec![rate(3), rate(1), text("a"), rate(2), text("b")]
        );
    }

    #[test]
    fn test_all_controls_left_alone() {
        let instructions = vec![rate(1), Instruction::Reset, rate(2)];
        assert_eq!(normalize(instructions.clone()), instructions);
    }

    #[test]
    fn test_idempotent() {
        let instructions = vec![text("hello"), rate(2), Instruction::Reset];
        let once = normalize(instructions);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_control_suffix_members_stay() {
        // Loop and structural instructions are not controls and pin the run.
        let instructions = vec![text("a"), rate(1), Instruction::EndSentence];
        assert_eq!(normalize(instructions.clone()), instructions);
    }
}
