//! Output file naming for answered documents

use std::path::Path;

/// Two-letter source prefixes removed from output names
pub const RECOGNIZED_PREFIXES: [&str; 2] = ["YB", "HN"];

const OUTPUT_EXTENSION: &str = "txt";

/// Derive the answer file name for a source document.
///
/// Takes the part of the file name before its first underscore (the file
/// stem when there is no underscore), strips a recognized `YB`/`HN`
/// prefix, and appends `.txt`. A prefix is kept when stripping it would
/// leave nothing.
///
/// ```
/// use casequery_domain::document::derive_output_name;
///
/// assert_eq!(derive_output_name("YB12345_1.html"), "12345.txt");
/// assert_eq!(derive_output_name("report_2.html"), "report.txt");
/// ```
pub fn derive_output_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);

    let base = match name.split_once('_') {
        Some((head, _)) => head,
        None => Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name),
    };

    let base = RECOGNIZED_PREFIXES
        .iter()
        .find_map(|prefix| base.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(base);

    format!("{}.{}", base, OUTPUT_EXTENSION)
}
