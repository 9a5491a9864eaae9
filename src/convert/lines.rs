//! JaCoCo `<line>` records to Cobertura `<line>` records.

use crate::cobertura::{BranchCoverage, Condition, ConditionType, Line};
use crate::model;

/// Translate one source line.
///
/// JaCoCo records no per-line execution count, so a line counts as hit
/// (`hits = 1`) when any of its instructions were covered. This is an
/// approximation: a line whose first instruction ran but later ones were
/// skipped still reads as hit.
#[must_use]
pub fn translate(line: &model::Line) -> Line {
    let covered = u64::from(line.covered_branches);
    let total = covered + u64::from(line.missed_branches);

    let branch = (total > 0).then(|| {
        let mut coverage = BranchCoverage {
            covered,
            total,
            conditions: Vec::new(),
        };
        let percent = coverage.percent();
        // One aggregate condition per line.
        coverage.conditions.push(Condition {
            number: 0,
            kind: ConditionType::Jump,
            coverage: percent,
        });
        coverage
    });

    Line {
        number: line.number,
        hits: u64::from(line.covered_instructions > 0),
        branch,
    }
}

/// Translate a sequence of source lines, keeping their order.
pub fn translate_all<'a, I>(lines: I) -> Vec<Line>
where
    I: IntoIterator<Item = &'a model::Line>,
{
    lines.into_iter().map(translate).collect()
}
