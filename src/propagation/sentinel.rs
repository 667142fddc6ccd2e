//! Absent slots form a suffix of every path.

use super::{CheckStatus, Conflict, Propagator, SearchContext, Var};
use crate::models::{Truck, MIN_PATH_LENGTH};

/// Slot `i` is absent iff `i >= PathLength`, and `PathLength >= 2`.
pub struct SentinelConsistency;

impl Propagator for SentinelConsistency {
    fn name(&self) -> &'static str {
        "sentinel"
    }

    fn check(&self, ctx: &SearchContext) -> CheckStatus {
        let mut status = CheckStatus::Satisfied;
        for truck in Truck::ALL {
            let mut absent_seen = false;
            let mut complete = true;
            for slot in 0..ctx.max_path_length() {
                match ctx.fixed(Var::Slot(truck, slot)) {
                    Some(None) => {
                        if slot < MIN_PATH_LENGTH {
                            return CheckStatus::Violated;
                        }
                        absent_seen = true;
                    }
                    Some(Some(_)) => {
                        if absent_seen {
                            return CheckStatus::Violated;
                        }
                    }
                    None => complete = false,
                }
            }
            if !complete {
                status = CheckStatus::Undetermined;
                continue;
            }
            // The tracker must agree: assigned places exactly below the length.
            let len = ctx.paths().len(truck);
            if len < MIN_PATH_LENGTH || ctx.paths().slots(truck)[..len].contains(&None) {
                return CheckStatus::Violated;
            }
        }
        status
    }

    fn propagate(&self, ctx: &mut SearchContext) -> Result<(), Conflict> {
        let m = ctx.max_path_length();
        for truck in Truck::ALL {
            for slot in 0..MIN_PATH_LENGTH {
                ctx.remove(Var::Slot(truck, slot), None)?;
            }
            let (lo, hi) = ctx.length_bounds(truck);
            for slot in (hi + 1)..m {
                ctx.fix(Var::Slot(truck, slot), None)?;
            }
            let last_present = (0..m)
                .rev()
                .find(|&slot| !ctx.slot(truck, slot).contains_absent());
            if let Some(last) = last_present {
                for slot in lo..last {
                    ctx.remove(Var::Slot(truck, slot), None)?;
                }
            }
        }
        Ok(())
    }
}
