//! Typed representation of a JaCoCo XML report.
//!
//! The parser in [`crate::parsers::jacoco`] builds these from a generic XML
//! tree, so every mandatory attribute is guaranteed to be present here.

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// The counter types JaCoCo attaches to report nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    Instruction,
    Branch,
    Line,
    Complexity,
    Method,
    Class,
}

impl CounterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterKind::Instruction => "INSTRUCTION",
            CounterKind::Branch => "BRANCH",
            CounterKind::Line => "LINE",
            CounterKind::Complexity => "COMPLEXITY",
            CounterKind::Method => "METHOD",
            CounterKind::Class => "CLASS",
        }
    }

    /// Map a `type` attribute value to a known counter kind.
    pub fn from_type(s: &str) -> Option<Self> {
        match s {
            "INSTRUCTION" => Some(CounterKind::Instruction),
            "BRANCH" => Some(CounterKind::Branch),
            "LINE" => Some(CounterKind::Line),
            "COMPLEXITY" => Some(CounterKind::Complexity),
            "METHOD" => Some(CounterKind::Method),
            "CLASS" => Some(CounterKind::Class),
            _ => None,
        }
    }
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (covered, missed) pair for one counter kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub kind: CounterKind,
    pub covered: u64,
    pub missed: u64,
}

impl Counter {
    /// `covered + missed`; the parser rejects counters where this overflows.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.covered.saturating_add(self.missed)
    }
}

/// The counters attached to a single node, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    entries: Vec<Counter>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a counter. A kind that is already present keeps its first value.
    pub fn insert(&mut self, counter: Counter) {
        if self.get(counter.kind).is_none() {
            self.entries.push(counter);
        }
    }

    #[must_use]
    pub fn get(&self, kind: CounterKind) -> Option<&Counter> {
        self.entries.iter().find(|c| c.kind == kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Counter> for Counters {
    fn from_iter<I: IntoIterator<Item = Counter>>(iter: I) -> Self {
        let mut counters = Counters::new();
        for counter in iter {
            counters.insert(counter);
        }
        counters
    }
}

/// One `<line>` record of a `<sourcefile>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub number: u32,
    /// Missed branches (`mb`).
    pub missed_branches: u32,
    /// Covered branches (`cb`).
    pub covered_branches: u32,
    /// Covered instructions (`ci`).
    pub covered_instructions: u64,
}

/// A `<sourcefile>` and every instrumented line in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// Base file name, e.g. `Foo.java`.
    pub name: String,
    pub lines: Vec<Line>,
    pub counters: Counters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    /// JVM descriptor, e.g. `(Ljava/lang/String;)V`.
    pub desc: String,
    /// First line of the method body, absent without debug information.
    pub line: Option<u32>,
    pub counters: Counters,
}

impl Method {
    /// Start line used for partitioning; methods without one start at 0.
    #[must_use]
    pub fn start_line(&self) -> u32 {
        self.line.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Class {
    /// Slash-delimited binary name, e.g. `com/example/Foo$Inner`.
    pub name: String,
    pub methods: Vec<Method>,
    pub counters: Counters,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    /// Slash-delimited package name, e.g. `com/example`.
    pub name: String,
    pub classes: Vec<Class>,
    pub sourcefiles: Vec<SourceFile>,
    pub counters: Counters,
}

/// The root `<report>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub name: Option<String>,
    /// Start of the first recorded session, in milliseconds since the epoch.
    pub session_start: u64,
    /// Packages in document order, including those nested in `<group>`s.
    pub packages: Vec<Package>,
    pub counters: Counters,
}
