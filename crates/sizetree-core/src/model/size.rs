/// Formatting utilities: human-readable byte counts, addresses and labels.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

/// Format a byte count into a human-readable string with appropriate unit.
///
/// Uses binary units (KiB = 1024) labelled with the common short forms
/// (KB, MB, GB, TB).
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else if b < TB {
        format!("{:.2} GB", b / GB)
    } else {
        format!("{:.2} TB", b / TB)
    }
}

/// Lowercase hex with a `0x` prefix and no zero padding.
pub fn format_addr(addr: u64) -> String {
    format!("0x{addr:x}")
}

/// An address or offset range, `0x<start> - 0x<end>`.
pub fn format_range(start: u64, end: u64) -> String {
    format!("0x{start:x} - 0x{end:x}")
}

/// Upper-case the first letter of every space-separated word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch == ' ';
    }
    out
}

/// Display name of a nested package: `name` with `parent` and the following
/// `/` removed. Names outside the parent are returned unchanged.
pub fn trim_parent_prefix<'a>(name: &'a str, parent: &str) -> &'a str {
    match name.strip_prefix(parent) {
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest),
        None => name,
    }
}

/// Last `/`-separated component of a path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
