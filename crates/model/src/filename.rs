use crate::ALLOWED_EXTENSIONS;

/// Check a raw upload filename against the extension allow-list. The check
/// runs on the final extension only, case-insensitively, and before
/// sanitization so the user sees the name they submitted in any notice.
#[must_use]
pub fn allowed_extension(filename: &str) -> bool {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|allowed| *allowed == ext)
}

/// Reduce an untrusted upload filename to a single safe path component.
///
/// Drops everything up to the last `/` or `\`, maps spaces to underscores,
/// removes any character outside `[A-Za-z0-9._-]`, and trims leading dots and
/// dashes. An empty result means the name was unusable and the upload must be
/// rejected. This runs before every write; path traversal in the submitted
/// name can never reach the filesystem.
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let mut out = String::with_capacity(last.len());
    for ch in last.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            out.push(ch);
        } else if ch == ' ' {
            out.push('_');
        }
    }
    out.trim_start_matches(['.', '-']).to_string()
}
