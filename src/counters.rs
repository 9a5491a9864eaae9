//! Derives Cobertura metric attributes from JaCoCo counters.
//!
//! A counter kind missing from a node is normal (a class without branches
//! has no BRANCH counter). Rates and sums then read `"0.0"`, covered and
//! valid counts read `"0"`.

use crate::model::{rate as fraction, Counter, CounterKind, Counters};

const ABSENT_MEASURE: &str = "0.0";
const ABSENT_COUNT: &str = "0";

/// `covered / (covered + missed)`, e.g. `line-rate`.
#[must_use]
pub fn rate(counters: &Counters, kind: CounterKind) -> String {
    match counters.get(kind) {
        Some(c) => format_rate(fraction(c.covered, c.total())),
        None => ABSENT_MEASURE.to_string(),
    }
}

/// `covered + missed`, e.g. `complexity`.
#[must_use]
pub fn sum(counters: &Counters, kind: CounterKind) -> String {
    counters
        .get(kind)
        .map_or_else(|| ABSENT_MEASURE.to_string(), |c| c.total().to_string())
}

#[must_use]
pub fn covered(counters: &Counters, kind: CounterKind) -> String {
    count(counters.get(kind), |c| c.covered)
}

/// `covered + missed`, reported as a `*-valid` count.
#[must_use]
pub fn valid(counters: &Counters, kind: CounterKind) -> String {
    count(counters.get(kind), Counter::total)
}

fn count(counter: Option<&Counter>, f: impl Fn(&Counter) -> u64) -> String {
    counter.map_or_else(|| ABSENT_COUNT.to_string(), |c| f(c).to_string())
}

/// Shortest round-trip decimal with a fractional part and no exponent:
/// `1.0`, `0.75`, `0.00001`.
pub(crate) fn format_rate(value: f64) -> String {
    let mut out = format!("{value}");
    if !out.contains('.') {
        out.push_str(".0");
    }
    out
}

/// The rate attributes every Cobertura package, class and method carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub line_rate: String,
    pub branch_rate: String,
    pub complexity: String,
}

impl Metrics {
    pub fn from_counters(counters: &Counters) -> Self {
        Self {
            line_rate: rate(counters, CounterKind::Line),
            branch_rate: rate(counters, CounterKind::Branch),
            complexity: sum(counters, CounterKind::Complexity),
        }
    }
}

/// Cobertura attribute prefix and JaCoCo counter kind of each
/// `*-covered`/`*-valid` pair, in emission order.
pub const TOTALS: [(&str, CounterKind); 5] = [
    ("lines", CounterKind::Line),
    ("branches", CounterKind::Branch),
    ("instructions", CounterKind::Instruction),
    ("classes", CounterKind::Class),
    ("methods", CounterKind::Method),
];

/// One `<prefix>-covered` / `<prefix>-valid` attribute pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Total {
    pub prefix: &'static str,
    pub covered: String,
    pub valid: String,
}

/// Document-level covered/valid pairs for every kind in [`TOTALS`].
pub fn totals(counters: &Counters) -> Vec<Total> {
    TOTALS
        .iter()
        .map(|&(prefix, kind)| Total {
            prefix,
            covered: covered(counters, kind),
            valid: valid(counters, kind),
        })
        .collect()
}
