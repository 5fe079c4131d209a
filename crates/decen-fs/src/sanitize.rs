/// Fallback group directory for assets whose path has no usable name.
pub const DEFAULT_GROUP: &str = "file";

/// Map an arbitrary path to a single safe filename.
///
/// Only the final segment (split on `/` and `\`) survives, and every
/// character outside `[A-Za-z0-9._-]` becomes `_`. A final segment of `.` or
/// `..` yields the empty string; callers pick their own fallback.
pub fn sanitize_filename(name: &str) -> String {
    let last = final_segment(name);
    if last == "." || last == ".." {
        return String::new();
    }

    last.chars()
        .map(|c| if is_allowed(c) { c } else { '_' })
        .collect()
}

/// Directory name used to group an asset: its basename without extension.
///
/// Trailing separators are ignored, so `/img/icons/` groups under `icons`.
pub fn group_name(path: &str) -> String {
    let trimmed = path.trim_end_matches(['/', '\\']);
    let base = final_segment(trimmed);
    let stem = match base.rfind('.') {
        Some(idx) => &base[..idx],
        None => base,
    };

    let group = sanitize_filename(stem);
    if group.is_empty() {
        DEFAULT_GROUP.to_string()
    } else {
        group
    }
}

fn final_segment(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

fn is_allowed(c: char) -> bool { c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') }

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_safe_names() {
        assert_eq!(sanitize_filename("logo-2.final_v1.png"), "logo-2.final_v1.png");
    }

    #[test]
    fn strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/abs/path/a.css"), "a.css");
        assert_eq!(sanitize_filename("C:\\Windows\\win.ini"), "win.ini");
        assert_eq!(sanitize_filename("dir/"), "");
    }

    #[test]
    fn replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("my file (1).png"), "my_file__1_.png");
        assert_eq!(sanitize_filename("naïve.txt"), "na_ve.txt");
        assert_eq!(sanitize_filename("a%20b"), "a_20b");
    }

    #[test]
    fn dot_segments_become_empty() {
        assert_eq!(sanitize_filename(".."), "");
        assert_eq!(sanitize_filename("a/.."), "");
        assert_eq!(sanitize_filename("."), "");
        assert_eq!(sanitize_filename("..."), "...");
    }

    #[test]
    fn group_names() {
        assert_eq!(group_name("/img/a.png"), "a");
        assert_eq!(group_name("/js/app.min.js"), "app.min");
        assert_eq!(group_name("/img/icons/"), "icons");
        assert_eq!(group_name("/"), DEFAULT_GROUP);
        assert_eq!(group_name(""), DEFAULT_GROUP);
        assert_eq!(group_name("/.hidden"), DEFAULT_GROUP);
        assert_eq!(group_name("/fonts/my font.woff2"), "my_font");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(s in ".*") {
            let once = sanitize_filename(&s);
            prop_assert_eq!(sanitize_filename(&once), once);
        }

        #[test]
        fn sanitize_never_escapes(prefix in "(\\.\\./|/|\\\\|[a-z]{1,4}/)*", rest in ".*") {
            let out = sanitize_filename(&format!("{prefix}{rest}"));
            prop_assert!(!out.contains('/'));
            prop_assert!(!out.contains('\\'));
            prop_assert_ne!(out.as_str(), "..");
            prop_assert_ne!(out.as_str(), ".");
        }
    }
}
