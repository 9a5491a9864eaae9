//! JaCoCo report to Cobertura coverage conversion.
//!
//! Structure is walked top-down (report, packages, classes, methods, lines)
//! while metrics come from each node's own JaCoCo counters. The conversion is
//! a pure function of the report and the [`ConvertOptions`].

pub mod filename;
pub mod lines;
pub mod methods;

use crate::cobertura;
use crate::counters::{self, Metrics};
use crate::model::{Class, Line, Method, Package, Report};

/// Default extension for guessed source file names.
pub const DEFAULT_SOURCE_EXTENSION: &str = "java";

/// Everything a conversion needs besides the report itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Emitted verbatim as `<source>` entries.
    pub source_roots: Vec<String>,
    /// Tool version; when set, also enables the `*-covered`/`*-valid` totals.
    pub version: Option<String>,
    /// Appended to guessed source file names, without the dot.
    pub source_extension: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            source_roots: vec![".".to_string()],
            version: None,
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
        }
    }
}

/// Convert a whole JaCoCo report.
pub fn convert_report(report: &Report, options: &ConvertOptions) -> cobertura::Coverage {
    let packages = report
        .packages
        .iter()
        .map(|package| convert_package(package, options))
        .collect();

    let version = options
        .version
        .as_ref()
        .map(|version| cobertura::VersionInfo {
            version: version.clone(),
            totals: counters::totals(&report.counters),
        });

    cobertura::Coverage {
        timestamp: report.session_start / 1000,
        metrics: Metrics::from_counters(&report.counters),
        version,
        sources: options.source_roots.clone(),
        packages,
    }
}

pub fn convert_package(package: &Package, options: &ConvertOptions) -> cobertura::Package {
    let classes: Vec<_> = package
        .classes
        .iter()
        .map(|class| convert_class(class, package, &options.source_extension))
        .collect();

    log::debug!("package {}: {} classes", package.name, classes.len());

    cobertura::Package {
        name: dotted(&package.name),
        metrics: Metrics::from_counters(&package.counters),
        classes,
    }
}

/// Convert one class of `package`.
///
/// The class's lines are all lines of its guessed source file, so nested
/// classes report the lines of their outer file. A class without a matching
/// `<sourcefile>` comes out with no lines.
pub fn convert_class(class: &Class, package: &Package, extension: &str) -> cobertura::Class {
    let filename = filename::guess_filename(&class.name, extension);
    let file_lines = find_lines(package, &filename).unwrap_or_else(|| {
        log::warn!("class {}: no <sourcefile> matches {}", class.name, filename);
        Vec::new()
    });

    let converted: Vec<_> = class
        .methods
        .iter()
        .map(|method| {
            let own = methods::method_lines(method, &class.methods, file_lines.iter().copied());
            convert_method(method, own)
        })
        .collect();

    log::debug!(
        "class {}: {} lines, {} methods",
        class.name,
        file_lines.len(),
        converted.len()
    );

    cobertura::Class {
        name: dotted(&class.name),
        filename,
        metrics: Metrics::from_counters(&class.counters),
        methods: converted,
        lines: lines::translate_all(file_lines),
    }
}

pub fn convert_method(method: &Method, own_lines: Vec<&Line>) -> cobertura::Method {
    cobertura::Method {
        name: method.name.clone(),
        signature: method.desc.clone(),
        metrics: Metrics::from_counters(&method.counters),
        lines: lines::translate_all(own_lines),
    }
}

/// All `<line>` records of every `<sourcefile>` in `package` whose name is the
/// base name of `filename`, concatenated in document order. `None` when no
/// `<sourcefile>` has that name.
pub fn find_lines<'a>(package: &'a Package, filename: &str) -> Option<Vec<&'a Line>> {
    let wanted = filename::base_name(filename);
    let mut matching = package
        .sourcefiles
        .iter()
        .filter(|sourcefile| sourcefile.name == wanted)
        .peekable();
    matching.peek()?;
    Some(matching.flat_map(|sourcefile| sourcefile.lines.iter()).collect())
}

fn dotted(name: &str) -> String {
    name.replace('/', ".")
}
