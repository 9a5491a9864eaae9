//! Attribution of a class's source lines to its methods.
//!
//! JaCoCo only records where each method starts. A method is taken to run
//! from its own start line up to, but excluding, the next greater start line
//! among the class's methods; the textually last method runs to the end of
//! the file. Methods sharing a start line therefore claim the same lines,
//! and lines before the first method belong to no method.

use crate::model::{Line, Method};

/// Half-open line range `[start, end)`; `end == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodRange {
    pub start: u32,
    pub end: Option<u32>,
}

impl MethodRange {
    /// Range of the method starting at `start` among `methods`.
    #[must_use]
    pub fn new(start: u32, methods: &[Method]) -> Self {
        let end = methods
            .iter()
            .map(Method::start_line)
            .filter(|&line| line > start)
            .min();
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        number >= self.start && self.end.map_or(true, |end| number < end)
    }
}

/// The lines of `lines` that fall within `method`'s range, in input order.
pub fn method_lines<'a, L>(method: &Method, methods: &[Method], lines: L) -> Vec<&'a Line>
where
    L: IntoIterator<Item = &'a Line>,
{
    let range = MethodRange::new(method.start_line(), methods);
    lines
        .into_iter()
        .filter(|line| range.contains(line.number))
        .collect()
}
