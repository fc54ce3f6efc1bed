//! Slug normalisation for organisation and division names.
//!
//! Identifier segments must match `[-_a-z0-9]+`. Names of places in the UK
//! come with apostrophes, exclamation marks and Welsh or Gaelic diacritics,
//! so the normaliser folds the common Latin accents to ASCII, drops the
//! rest of the punctuation and collapses whitespace to single hyphens.

/// Turns a free-text name, or an already clean slug, into the canonical
/// segment form. The operation is idempotent: a valid slug passes through
/// unchanged.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_sep = false;
    for raw in value.chars() {
        for c in raw.to_lowercase() {
            if c.is_ascii_alphanumeric() || c == '_' {
                if pending_sep && !slug.is_empty() {
                    slug.push('-');
                }
                pending_sep = false;
                slug.push(c);
            } else if c.is_whitespace() || c == '-' {
                pending_sep = true;
            } else if let Some(folded) = fold_latin(c) {
                if pending_sep && !slug.is_empty() {
                    slug.push('-');
                }
                pending_sep = false;
                slug.push(folded);
            }
            // Anything else (punctuation, unfolded characters) is dropped.
        }
    }
    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

// Maps the accented Latin letters that show up in UK place names to their
// ASCII base letter. Input is already lowercased.
fn fold_latin(c: char) -> Option<char> {
    let folded = match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è'..='ë' | 'ē' | 'ė' | 'ę' => 'e',
        'ì'..='ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò'..='ö' | 'ø' | 'ō' => 'o',
        'ù'..='ü' | 'ū' => 'u',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ŵ' => 'w',
        'š' | 'ś' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        'ł' => 'l',
        'đ' => 'd',
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::slugify;

    // We care about two things here: names of places in the UK come out
    // sensibly, and slugging is idempotent.

    #[test]
    fn st_helens() {
        assert_eq!(slugify("St. Helen's"), "st-helens");
        assert_eq!(slugify(&slugify("St. Helen's")), "st-helens");
    }

    #[test]
    fn westward_ho() {
        // It really does have an exclamation mark in the name.
        // https://en.wikipedia.org/wiki/Westward_Ho!
        assert_eq!(slugify("Westward Ho!"), "westward-ho");
        assert_eq!(slugify(&slugify("Westward Ho!")), "westward-ho");
    }

    #[test]
    fn ynys_mon() {
        assert_eq!(slugify("Ynys Môn"), "ynys-mon");
        assert_eq!(slugify(&slugify("Ynys Môn")), "ynys-mon");
    }

    #[test]
    fn eilean_a_cheo() {
        assert_eq!(slugify("Eilean a' Cheò"), "eilean-a-cheo");
        assert_eq!(slugify(&slugify("Eilean a' Cheò")), "eilean-a-cheo");
    }

    #[test]
    fn leading_trailing_whitespace() {
        assert_eq!(slugify("   foo \t "), "foo");
        assert_eq!(slugify(&slugify("   foo \t ")), "foo");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("Weston-super-Mare"), "weston-super-mare");
        assert_eq!(slugify("a - b -- c"), "a-b-c");
    }

    #[test]
    fn keeps_underscores() {
        assert_eq!(slugify("already_clean_slug"), "already_clean_slug");
    }

    #[test]
    fn empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
