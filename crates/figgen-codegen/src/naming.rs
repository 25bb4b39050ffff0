//! Identifier and file-name derivation from Figma layer names.

/// Strip every non-ASCII-alphanumeric character and upper-case a leading
/// lowercase letter. Other letters keep their case.
///
/// Not injective: `"Btn-1"` and `"Btn 1"` both become `"Btn1"`.
pub fn sanitize_component_name(name: &str) -> String {
    let mut out: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if let Some(first) = out.get(..1) {
        let upper = first.to_ascii_uppercase();
        out.replace_range(..1, &upper);
    }
    out
}

/// Whether a sanitized name can be used as a JS/TS identifier.
pub fn is_valid_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Lowercase, hyphen-separated file stem: `"Arrow / Left"` → `"arrow-left"`.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
