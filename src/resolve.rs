//! Branch/path disambiguation.
//!
//! A request path like `release/v1/src/main.rs` is ambiguous because branch
//! names may themselves contain `/`. The branch can only be split off by
//! comparing the leading path segments against the repository's branch list.

/// A request path split into its branch and in-repo file path.
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedPath {
    /// `None` when no known branch matched; the caller falls back to the
    /// repository's default branch.
    pub branch: Option<String>,
    pub filepath: String,
}

/// Determine which leading segments of `raw_path` name a branch.
///
/// A candidate matches only if every one of its `/`-segments equals the path
/// segment at the same position. When several candidates match (branches `a`
/// and `a/b` against `a/b/c.txt`), the lexicographically greatest one wins:
/// candidates are walked in ascending sorted order and the last full match
/// overwrites earlier ones. Redirect behaviour depends on this exact
/// tie-break, so it must not be replaced with longest-match.
pub fn resolve(raw_path: &str, branches: &[String]) -> ResolvedPath {
    let path_segments: Vec<&str> = raw_path.split('/').collect();
    let mut candidates: Vec<&str> = branches.iter().map(String::as_str).collect();
    candidates.sort_unstable();

    let mut matched = None;
    for candidate in candidates {
        let segments = candidate.split('/');
        if segments.clone().count() > path_segments.len() {
            continue;
        }
        if segments.zip(&path_segments).all(|(b, p)| b == *p) {
            matched = Some(candidate);
        }
    }

    match matched {
        Some(branch) => ResolvedPath {
            // The matched segments are joined by `/` in both strings, so the
            // branch plus one separator is a prefix of `raw_path`.
            filepath: raw_path.get(branch.len() + 1..).unwrap_or("").to_owned(),
            branch: Some(branch.to_owned()),
        },
        None => ResolvedPath {
            branch: None,
            filepath: raw_path.to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branches(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn splits_branch_containing_slash() {
        let result = resolve(
            "release/v1/src/index.ts",
            &branches(&["main", "release/v1"]),
        );
        assert_eq!(result.branch.as_deref(), Some("release/v1"));
        assert_eq!(result.filepath, "src/index.ts");
    }

    #[test]
    fn greatest_full_match_wins() {
        let result = resolve("a/b/c.txt", &branches(&["a", "a/b"]));
        assert_eq!(result.branch.as_deref(), Some("a/b"));
        assert_eq!(result.filepath, "c.txt");
    }

    #[test]
    fn no_branch_matches() {
        let result = resolve("README.md", &branches(&["main"]));
        assert_eq!(result.branch, None);
        assert_eq!(result.filepath, "README.md");
    }

    #[test]
    fn path_equal_to_branch_leaves_empty_filepath() {
        let result = resolve("release/v1", &branches(&["main", "release/v1"]));
        assert_eq!(result.branch.as_deref(), Some("release/v1"));
        assert_eq!(result.filepath, "");
    }

    #[test]
    fn trailing_segment_mismatch_disqualifies() {
        // `feat/x` is not a prefix of `feat/y/...`; only `feat` would match,
        // and it is not in the list.
        let result = resolve("feat/y/file.rs", &branches(&["feat/x"]));
        assert_eq!(result.branch, None);
        assert_eq!(result.filepath, "feat/y/file.rs");
    }

    #[test]
    fn empty_path_matches_nothing() {
        let result = resolve("", &branches(&["main"]));
        assert_eq!(result.branch, None);
        assert_eq!(result.filepath, "");
    }

    #[test]
    fn empty_branch_list_matches_nothing() {
        let result = resolve("main/src/lib.rs", &[]);
        assert_eq!(result.branch, None);
        assert_eq!(result.filepath, "main/src/lib.rs");
    }

    #[test]
    fn branch_longer_than_path_is_skipped() {
        let result = resolve("a/b", &branches(&["a/b/c"]));
        assert_eq!(result.branch, None);
        assert_eq!(result.filepath, "a/b");
    }
}
