//! Kickstart body splitter
//!
//! Classifies a raw kickstart body line by line into single-line command
//! directives and multi-line `% ... %end` block sections. Handles the
//! kickstart line conventions:
//! - Lines starting with `%` open a block closed by a `%end` line
//! - `%include` is a single-line directive, not a block opener
//! - `#;` marks a disabled command kept for conflict bookkeeping
//! - Blank lines and ordinary comments attach to whichever block follows

/// Split `body` into `(commands, sections)` line lists.
///
/// Lines accumulate into a pending buffer that is flushed whole whenever a
/// classifying line arrives, so comments and blank lines travel with the
/// directive they precede. Malformed input is tolerated: an `%end` outside
/// any section behaves like an ordinary `%` opener, and a `%` opener inside
/// an unclosed section flushes the buffer (opener included) to `sections`
/// without leaving section state.
///
/// Unless `compact`, each non-empty list is prefixed with a provenance
/// comment `# ksbuild <name>`.
pub(super) fn split_body(
    name: Option<&str>,
    body: &str,
    compact: bool,
) -> (Vec<String>, Vec<String>) {
    let mut buf: Vec<String> = Vec::new();
    let mut commands: Vec<String> = Vec::new();
    let mut sections: Vec<String> = Vec::new();
    let mut in_section = false;

    for line in body.split('\n') {
        buf.push(line.to_string());
        let trimmed = line.trim_start();

        if in_section && trimmed.starts_with("%end") {
            in_section = false;
            sections.append(&mut buf);
        } else if in_section && trimmed.starts_with('%') {
            sections.append(&mut buf);
        } else if trimmed.starts_with("%include") {
            commands.append(&mut buf);
        } else if trimmed.starts_with('%') {
            in_section = true;
        } else if in_section {
            // keep accumulating section lines
        } else if trimmed.chars().next().is_some_and(char::is_alphabetic) {
            commands.append(&mut buf);
        } else if trimmed.starts_with("#;") {
            commands.append(&mut buf);
        }
    }

    if in_section {
        sections.append(&mut buf);
    }

    if !compact {
        if let Some(name) = name {
            if !commands.is_empty() {
                commands.insert(0, format!("# ksbuild {name}"));
            }
            if !sections.is_empty() {
                sections.insert(0, format!("# ksbuild {name}"));
            }
        }
    }

    (commands, sections)
}
