//! Cobertura output tree.
//!
//! Cobertura XML structure:
//!   <coverage timestamp="..." line-rate="..." branch-rate="..." complexity="..." version="...">
//!     <sources><source>...</source></sources>
//!     <packages>
//!       <package name="..." line-rate="..." branch-rate="..." complexity="...">
//!         <classes>
//!           <class name="..." filename="..." line-rate="..." ...>
//!             <methods>
//!               <method name="..." signature="..." line-rate="..." ...>
//!                 <lines>...</lines>
//!               </method>
//!             </methods>
//!             <lines>
//!               <line number="..." hits="..." branch="true"
//!                     condition-coverage="50% (1/2)">
//!                 <conditions><condition number="0" type="jump" coverage="50%"/></conditions>
//!               </line>
//!             </lines>
//!           </class>
//!         </classes>
//!       </package>
//!     </packages>
//!   </coverage>
//!
//! Everything here is derived from a JaCoCo report and only ever written out.

use crate::counters::{Metrics, Total};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    /// Session start in whole seconds since the epoch.
    pub timestamp: u64,
    pub metrics: Metrics,
    /// Present only when a tool version was supplied.
    pub version: Option<VersionInfo>,
    pub sources: Vec<String>,
    pub packages: Vec<Package>,
}

/// The `version` attribute and the covered/valid pairs it unlocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    pub totals: Vec<Total>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Dot-delimited package name.
    pub name: String,
    pub metrics: Metrics,
    pub classes: Vec<Class>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    /// Dot-delimited class name.
    pub name: String,
    pub filename: String,
    pub metrics: Metrics,
    pub methods: Vec<Method>,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub signature: String,
    pub metrics: Metrics,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: u32,
    /// 1 when any instruction on the line ran, otherwise 0.
    pub hits: u64,
    /// Set when the line has at least one branch.
    pub branch: Option<BranchCoverage>,
}

/// Branch outcomes of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCoverage {
    pub covered: u64,
    pub total: u64,
    pub conditions: Vec<Condition>,
}

impl BranchCoverage {
    /// Covered share of branches in whole percent, truncated.
    #[must_use]
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            // Bounded by 100 since covered <= total.
            (100 * u128::from(self.covered) / u128::from(self.total)) as u64
        }
    }

    /// The `condition-coverage` attribute, e.g. `50% (1/2)`.
    #[must_use]
    pub fn condition_coverage(&self) -> String {
        format!("{}% ({}/{})", self.percent(), self.covered, self.total)
    }
}

/// Cobertura condition types; JaCoCo only ever yields jumps here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionType {
    Jump,
}

impl ConditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::Jump => "jump",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub number: u32,
    pub kind: ConditionType,
    /// Coverage in whole percent.
    pub coverage: u64,
}
