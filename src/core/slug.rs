//! Slugs for looking clubs up by name in the content service.

/// Builds the URL slug used to look a club up in the content service.
///
/// Lowercases the name, turns each run of whitespace into one hyphen, drops
/// anything that is not an ASCII word character or hyphen, then trims
/// hyphens from both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            slug.push(c);
        }
    }

    slug.trim_matches('-').to_string()
}
