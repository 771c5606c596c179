//! Nested directory trees built from flat repository listings, and their
//! rendering as linked display lines.

use crate::utils::format_size;

const BOX_MIDDLE: &str = "├──";
const BOX_BOTTOM: &str = "└──";
const BOX_BAR: &str = "│";

/// A directory entry: a file with its byte size, or a subdirectory.
#[derive(Debug, PartialEq, Eq)]
pub enum Node {
    File(u64),
    Dir(Directory),
}

/// An insertion-ordered mapping from entry name to [`Node`].
///
/// Order is first-seen order from the flat listing and is what keeps the
/// rendered output stable, so a plain vector of pairs is used instead of a
/// hash map.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<(String, Node)>,
}

impl Directory {
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, node)| node)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| entry == name)
    }

    /// Descend into the named subdirectory, creating it if absent. An
    /// existing file under the name is replaced (last write wins); the
    /// upstream listing contract says that cannot happen, so this is only a
    /// safety net against malformed listings.
    fn child_dir(&mut self, name: &str) -> &mut Directory {
        let index = match self.position(name) {
            Some(index) => index,
            None => {
                self.entries
                    .push((name.to_owned(), Node::Dir(Directory::default())));
                self.entries.len() - 1
            }
        };
        if !matches!(self.entries[index].1, Node::Dir(_)) {
            self.entries[index].1 = Node::Dir(Directory::default());
        }
        match &mut self.entries[index].1 {
            Node::Dir(subdir) => subdir,
            Node::File(_) => unreachable!("entry was just made a directory"),
        }
    }

    fn put_file(&mut self, name: &str, size: u64) {
        match self.position(name) {
            Some(index) => self.entries[index].1 = Node::File(size),
            None => self.entries.push((name.to_owned(), Node::File(size))),
        }
    }
}

/// Build a nested [`Directory`] from flat `(path, size)` pairs.
///
/// Intermediate directories are created the first time a path passes through
/// them, which fixes their position at every level. Descent is iterative, so
/// depth is bounded only by the longest path.
pub fn build<I>(entries: I) -> Directory
where
    I: IntoIterator<Item = (String, u64)>,
{
    let mut root = Directory::default();
    for (path, size) in entries {
        let segments: Vec<&str> = path.split('/').collect();
        let (file, dirs) = match segments.split_last() {
            Some(split) => split,
            None => continue,
        };
        let mut current = &mut root;
        for segment in dirs {
            current = current.child_dir(segment);
        }
        current.put_file(file, size);
    }
    root
}

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub file_size: bool,
    pub file_count: bool,
}

/// Render a directory tree as HTML display lines.
///
/// Files link to `{base_link}/{path}` with an optional human-readable size
/// suffix; directories are bold with an optional count of their immediate
/// children. Output order is insertion order, and the glyph prefixing each
/// line accumulates one continuation column per ancestor.
pub fn render(tree: &Directory, base_link: &str, options: RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();
    render_level(tree, base_link, options, "", &mut lines);
    lines
}

fn render_level(
    tree: &Directory,
    base_link: &str,
    options: RenderOptions,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    for (index, (name, node)) in tree.entries.iter().enumerate() {
        let is_last = index == tree.entries.len() - 1;
        let connector = if is_last { BOX_BOTTOM } else { BOX_MIDDLE };
        let link = format!("{}/{}", base_link, name);
        match node {
            Node::File(size) => {
                let mut line = format!(
                    "{}{} <a href=\"{}\">{}</a>",
                    prefix,
                    connector,
                    html_escape::encode_double_quoted_attribute(&link),
                    html_escape::encode_text(name),
                );
                if options.file_size {
                    line.push_str(&format!(" ({})", format_size(*size)));
                }
                lines.push(line);
            }
            Node::Dir(subdir) => {
                let mut line = format!(
                    "{}{} <b>{}</b>/",
                    prefix,
                    connector,
                    html_escape::encode_text(name),
                );
                if options.file_count {
                    line.push_str(&format!(" ({})", child_counts(subdir)));
                }
                lines.push(line);
                let continuation = if is_last { " " } else { BOX_BAR };
                let child_prefix = format!("{}{}   ", prefix, continuation);
                render_level(subdir, &link, options, &child_prefix, lines);
            }
        }
    }
}

/// Immediate (non-recursive) child counts, `N file, M dir` with zero-count
/// clauses omitted. Both zero yields an empty string, which the caller wraps
/// in a bare `()`.
fn child_counts(dir: &Directory) -> String {
    let files = dir
        .entries
        .iter()
        .filter(|(_, node)| matches!(node, Node::File(_)))
        .count();
    let dirs = dir.entries.len() - files;
    match (files, dirs) {
        (0, 0) => String::new(),
        (files, 0) => format!("{} file", files),
        (0, dirs) => format!("{} dir", dirs),
        (files, dirs) => format!("{} file, {} dir", files, dirs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(list: &[(&str, u64)]) -> Vec<(String, u64)> {
        list.iter().map(|(path, size)| ((*path).to_owned(), *size)).collect()
    }

    fn sample_tree() -> Directory {
        build(entries(&[
            ("a/b.txt", 10),
            ("a/c.txt", 20),
            ("d.txt", 5),
        ]))
    }

    #[test]
    fn builds_nested_directories_in_insertion_order() {
        let tree = sample_tree();
        assert_eq!(tree.entries.len(), 2);
        assert_eq!(tree.entries[0].0, "a");
        assert_eq!(tree.entries[1].0, "d.txt");

        let subdir = match tree.get("a") {
            Some(Node::Dir(subdir)) => subdir,
            other => panic!("expected directory, got {:?}", other),
        };
        assert_eq!(subdir.entries[0], ("b.txt".to_owned(), Node::File(10)));
        assert_eq!(subdir.entries[1], ("c.txt".to_owned(), Node::File(20)));
        assert_eq!(tree.get("d.txt"), Some(&Node::File(5)));
    }

    #[test]
    fn every_path_is_reachable_with_its_size() {
        let list = [
            ("src/lib.rs", 1204),
            ("src/tree/mod.rs", 88),
            ("Cargo.toml", 312),
            ("docs/a/b/c/deep.md", 1),
        ];
        let tree = build(entries(&list));
        for (path, size) in list {
            let mut current = &tree;
            let segments: Vec<&str> = path.split('/').collect();
            let (file, dirs) = segments.split_last().unwrap();
            for segment in dirs {
                current = match current.get(segment) {
                    Some(Node::Dir(subdir)) => subdir,
                    other => panic!("{}: expected directory, got {:?}", path, other),
                };
            }
            assert_eq!(current.get(file), Some(&Node::File(size)));
        }
    }

    #[test]
    fn file_then_directory_collision_last_write_wins() {
        let tree = build(entries(&[("a", 5), ("a/b.txt", 7)]));
        let subdir = match tree.get("a") {
            Some(Node::Dir(subdir)) => subdir,
            other => panic!("expected directory, got {:?}", other),
        };
        assert_eq!(subdir.get("b.txt"), Some(&Node::File(7)));
    }

    #[test]
    fn directory_then_file_collision_last_write_wins() {
        let tree = build(entries(&[("a/b.txt", 7), ("a", 5)]));
        assert_eq!(tree.get("a"), Some(&Node::File(5)));
    }

    #[test]
    fn renders_connectors_links_sizes_and_counts() {
        let lines = render(
            &sample_tree(),
            "repo/main",
            RenderOptions { file_size: true, file_count: true },
        );
        assert_eq!(
            lines,
            vec![
                "├── <b>a</b>/ (2 file)".to_owned(),
                "│   ├── <a href=\"repo/main/a/b.txt\">b.txt</a> (10 B)".to_owned(),
                "│   └── <a href=\"repo/main/a/c.txt\">c.txt</a> (20 B)".to_owned(),
                "└── <a href=\"repo/main/d.txt\">d.txt</a> (5 B)".to_owned(),
            ],
        );
    }

    #[test]
    fn last_directory_indents_children_with_blanks() {
        let lines = render(
            &build(entries(&[("z.txt", 1), ("sub/inner.txt", 2)])),
            "r/b",
            RenderOptions { file_size: false, file_count: false },
        );
        assert_eq!(
            lines,
            vec![
                "├── <a href=\"r/b/z.txt\">z.txt</a>".to_owned(),
                "└── <b>sub</b>/".to_owned(),
                "    └── <a href=\"r/b/sub/inner.txt\">inner.txt</a>".to_owned(),
            ],
        );
    }

    #[test]
    fn mixed_children_count_both_clauses() {
        let tree = build(entries(&[("top/file.txt", 1), ("top/nested/x", 2)]));
        let lines = render(
            &tree,
            "r/b",
            RenderOptions { file_size: false, file_count: true },
        );
        assert_eq!(lines[0], "└── <b>top</b>/ (1 file, 1 dir)");
    }

    #[test]
    fn empty_directory_renders_empty_parenthetical() {
        // Not constructible through build(), but the renderer must not choke
        // on it and keeps the degenerate `()` suffix.
        let tree = Directory {
            entries: vec![("empty".to_owned(), Node::Dir(Directory::default()))],
        };
        let lines = render(
            &tree,
            "r/b",
            RenderOptions { file_size: false, file_count: true },
        );
        assert_eq!(lines, vec!["└── <b>empty</b>/ ()".to_owned()]);
    }

    #[test]
    fn names_are_html_escaped() {
        let tree = build(entries(&[("a<b>.txt", 3)]));
        let lines = render(
            &tree,
            "r/b",
            RenderOptions { file_size: false, file_count: false },
        );
        assert_eq!(
            lines,
            vec!["└── <a href=\"r/b/a&lt;b&gt;.txt\">a&lt;b&gt;.txt</a>".to_owned()],
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let tree = sample_tree();
        let options = RenderOptions { file_size: true, file_count: true };
        assert_eq!(render(&tree, "x/y", options), render(&tree, "x/y", options));
    }
}
