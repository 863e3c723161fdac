/// Derive an in-page anchor id from a section title.
///
/// Lowercases, turns every run of characters outside `[a-z0-9]` into a
/// single `-`, and strips hyphens from both ends. Returns `None` when the
/// title is missing or nothing alphanumeric survives.
pub fn anchor_id(title: Option<&str>) -> Option<String> {
    let title = title?;
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}
