//! Mapping from a JaCoCo class name to the source file that declares it.

/// Separator between an outer class name and its nested/anonymous classes.
const NESTED_CLASS_DELIMITER: char = '$';

/// Guess the source path of a class from its binary name: the part before
/// the first nested-class delimiter, plus `extension`.
///
/// `com/example/Foo$Inner` with extension `java` maps to
/// `com/example/Foo.java`. Classes whose file name differs from the class
/// name (Kotlin file facades, several top-level classes per file) are not
/// recognized.
#[must_use]
pub fn guess_filename(class_name: &str, extension: &str) -> String {
    let outer = class_name
        .split_once(NESTED_CLASS_DELIMITER)
        .map_or(class_name, |(outer, _)| outer);
    format!("{outer}.{extension}")
}

/// Final `/`-separated component of a path.
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}
