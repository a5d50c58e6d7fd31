//! Loop expansion
//!
//! Rewrites the instruction list so no loop instruction remains: each loop
//! replaces everything before it with `count` copies of it, scaled by the
//! fade schedule. Expansion is a left fold into a fresh list, so a later
//! loop repeats the already-expanded output of an earlier one.

use crate::instruction::{FadeMode, Instruction, LoopCount, OutputVolume};
use log::debug;

/// Expand every loop instruction, in order.
pub fn expand(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut expanded: Vec<Instruction> = Vec::new();
    for instruction in instructions {
        match instruction {
            Instruction::Loop { count, fade } => {
                debug!(
                    "Unrolling loop of {} over {} instruction(s)",
                    count.get(),
                    expanded.len()
                );
                let prefix = std::mem::take(&mut expanded);
                expanded = unroll(&prefix, count, fade);
            }
            other => expanded.push(other),
        }
    }
    expanded
}

/// Unroll one loop over the instructions before it.
///
/// Every repetition after the first starts with a reset so it begins from
/// a clean voice state. In a fading loop every iteration opens with its
/// scheduled output volume, which marks the segment boundary even for the
/// full-volume iteration; volumes the prefix sets itself are rescaled, and
/// the scheduled volume is re-established after any reset the prefix
/// contains, since the reset would otherwise clear it.
fn unroll(prefix: &[Instruction], count: LoopCount, fade: FadeMode) -> Vec<Instruction> {
    let count = count.get();
    let mut out = Vec::with_capacity((prefix.len() + 2) * count as usize);
    let fading = !matches!(fade, FadeMode::Level);

    for iteration in 0..count {
        let multiplier = fade.multiplier(iteration, count);

        if iteration > 0 {
            out.push(Instruction::Reset);
        }
        if fading {
            out.push(Instruction::OutputVolume(OutputVolume::from_multiplier(
                multiplier,
            )));
        }

        for instruction in prefix {
            match instruction {
                Instruction::OutputVolume(volume) => {
                    out.push(Instruction::OutputVolume(volume.rescaled(multiplier)));
                }
                Instruction::Reset => {
                    out.push(Instruction::Reset);
                    if fading {
                        out.push(Instruction::OutputVolume(OutputVolume::from_multiplier(
                            multiplier,
                        )));
                    }
                }
                other => out.push(other.clone()),
            }
        }
    }

    out
}
