/// Derives the URL-safe key a topic is shared under.
///
/// The title is lower-cased, every maximal run of characters outside
/// `[a-z0-9]` collapses into a single `-`, and separators at either end are
/// dropped. Distinct titles may produce the same slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }

    slug
}
