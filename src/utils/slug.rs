//! URL slug derivation.
//!
//! Slugs are derived from display names at creation time; uniqueness is
//! handled by the collection repository (counter suffix on collision).

/// Turn a display name into a URL-safe slug.
///
/// Lowercases ASCII, maps runs of non-alphanumeric characters to a
/// single `-`, trims leading/trailing dashes. A name with no usable
/// characters falls back to `"untitled"` so the write path never
/// produces an empty slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true; // suppress a leading dash

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(slugify("Winter Coats"), "winter-coats");
        assert_eq!(slugify("Silk & Linen"), "silk-linen");
    }

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(slugify("  Hand--Made  "), "hand-made");
        assert_eq!(slugify("--x--"), "x");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(slugify(""), "untitled");
        assert_eq!(slugify("???"), "untitled");
    }

    #[test]
    fn non_ascii_is_dropped() {
        assert_eq!(slugify("Café Robes"), "caf-robes");
    }
}
