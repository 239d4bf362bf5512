/// Parse a file extension given on the command line.
///
/// A single leading dot is accepted and stripped, so `--ext .ts` and
/// `--ext ts` are equivalent. Multi-part extensions such as `d.ts` are kept.
///
/// # Errors
///
/// Returns an error message for empty extensions or ones containing path
/// separators or whitespace.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.strip_prefix('.').unwrap_or(s);

    if ext.is_empty() {
        return Err("Extension cannot be empty".to_string());
    }

    if ext.starts_with('.') || ext.ends_with('.') {
        return Err(format!("Extension has a stray dot: '{}'", s));
    }

    if ext.chars().any(|c| c == '/' || c == '\\' || c.is_whitespace()) {
        return Err(format!(
            "Extension cannot contain path separators or whitespace: '{}'",
            s
        ));
    }

    Ok(ext.to_string())
}
