//! Plan expander

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;

// Internal
use super::{find_directive_runs, DirectiveRun, Params, PlanExpError};
use route_if::TopologicalPlan;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Expands the directive runs of a plan by the configured margins.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanExpander {
    params: Params,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PlanExpander {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Expand the plan, returning a new plan with the same length and
    /// waypoints. Only commands are changed, the input plan is untouched.
    ///
    /// For each closed run `[start, end)` with command `C`:
    ///  - indices `start - 1` down to `start - expand_command_front` are set
    ///    to `C`, skipping any index which is not strictly greater than 0,
    ///  - indices `end` up to `end + expand_command_back - 1` are set to `C`,
    ///    skipping any index past the end of the plan.
    ///
    /// Runs are applied in plan order, so where the margins of two runs
    /// overlap the later run wins.
    pub fn expand(&self, plan: &TopologicalPlan) -> Result<TopologicalPlan, PlanExpError> {
        let runs = find_directive_runs(plan)?;

        let mut expanded = plan.clone();
        let mut num_rewritten = 0usize;

        for run in runs.iter() {
            num_rewritten += self.apply_margins(&mut expanded, run);
        }

        info!(
            "Plan expanded: {} entries, {} directive runs, {} commands rewritten",
            plan.len(),
            runs.len(),
            num_rewritten
        );

        Ok(expanded)
    }

    /// Apply the front and back margins of one run, returning the number of
    /// entries written.
    fn apply_margins(&self, plan: &mut TopologicalPlan, run: &DirectiveRun) -> usize {
        let len = plan.len();
        let mut num_written = 0;

        // Before the start. Index 0 is never written.
        for offset in 1..=self.params.expand_command_front {
            match run.start.checked_sub(offset) {
                Some(i) if i > 0 => {
                    plan.set_command(i, run.command);
                    num_written += 1;
                }
                _ => break,
            }
        }

        // From the end onwards
        for offset in 0..self.params.expand_command_back {
            let i = run.end + offset;
            if i >= len {
                break;
            }
            plan.set_command(i, run.command);
            num_written += 1;
        }

        num_written
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use route_if::{ManeuverCommand, ManeuverCommand::*, PlanEntry, Waypoint};

    fn plan_from_commands(cmds: &[ManeuverCommand]) -> TopologicalPlan {
        TopologicalPlan::from_entries(
            cmds.iter()
                .enumerate()
                .map(|(i, c)| PlanEntry::new(Waypoint::new(i as f64, -(i as f64)), *c))
                .collect(),
        )
    }

    fn expander(front: usize, back: usize) -> PlanExpander {
        PlanExpander::new(Params {
            expand_command_front: front,
            expand_command_back: back,
        })
    }

    #[test]
    fn test_single_tick_run() {
        let mut cmds = vec![LaneFollow; 10];
        cmds[4] = Left;
        let plan = plan_from_commands(&cmds);

        let expanded = expander(2, 2).expand(&plan).unwrap();

        let mut expected = vec![LaneFollow; 10];
        for i in 2..=6 {
            expected[i] = Left;
        }
        assert_eq!(expanded.commands(), expected);

        // Waypoints are unchanged and the input was not modified
        for (a, b) in expanded.iter().zip(plan.iter()) {
            assert_eq!(a.waypoint, b.waypoint);
        }
        assert_eq!(plan.commands(), cmds);
    }

    #[test]
    fn test_front_margin_never_writes_index_zero() {
        let plan = plan_from_commands(&[LaneFollow, LaneFollow, Right, LaneFollow, LaneFollow]);

        let expanded = expander(5, 0).expand(&plan).unwrap();

        assert_eq!(
            expanded.commands(),
            vec![LaneFollow, Right, Right, LaneFollow, LaneFollow]
        );
    }

    #[test]
    fn test_back_margin_clipped_to_plan() {
        let plan = plan_from_commands(&[LaneFollow, Straight, LaneFollow, LaneFollow]);

        let expanded = expander(0, 10).expand(&plan).unwrap();

        assert_eq!(
            expanded.commands(),
            vec![LaneFollow, Straight, Straight, Straight]
        );
        assert_eq!(expanded.len(), plan.len());
    }

    #[test]
    fn test_zero_margins_pass_through() {
        let plan = plan_from_commands(&[LaneFollow, Left, Left, LaneFollow, Right, LaneFollow]);
        assert_eq!(expander(0, 0).expand(&plan).unwrap(), plan);
    }

    #[test]
    fn test_all_lane_follow_unchanged() {
        let plan = plan_from_commands(&[LaneFollow; 12]);
        for (front, back) in [(0, 0), (1, 3), (7, 7), (100, 100)].iter() {
            assert_eq!(expander(*front, *back).expand(&plan).unwrap(), plan);
        }
    }

    #[test]
    fn test_empty_plan() {
        let plan = TopologicalPlan::new_empty();
        assert!(expander(3, 3).expand(&plan).unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_run_not_expanded() {
        let plan = plan_from_commands(&[LaneFollow, LaneFollow, LaneFollow, Left, Left]);
        assert_eq!(expander(2, 2).expand(&plan).unwrap(), plan);
    }

    #[test]
    fn test_overlap_last_write_wins() {
        // Runs: Left [2, 3), Right [5, 6)
        let plan = plan_from_commands(&[
            LaneFollow, LaneFollow, Left, LaneFollow, LaneFollow, Right, LaneFollow, LaneFollow,
        ]);

        let expanded = expander(2, 2).expand(&plan).unwrap();

        // Left back margin writes 3, 4; Right front margin then writes 4, 3.
        assert_eq!(
            expanded.commands(),
            vec![LaneFollow, Left, Left, Right, Right, Right, Right, Right]
        );
    }

    #[test]
    fn test_length_invariance() {
        let cmds = [
            Right, LaneFollow, Left, Left, LaneFollow, Straight, Other, LaneFollow, Void,
        ];
        for len in 0..cmds.len() {
            let plan = plan_from_commands(&cmds[..len]);
            for (front, back) in [(0, 0), (1, 1), (3, 2), (20, 20)].iter() {
                let expanded = expander(*front, *back).expand(&plan).unwrap();
                assert_eq!(expanded.len(), plan.len());
            }
        }
    }
}
