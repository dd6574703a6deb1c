//! Locations inside a canonical tree.
//!
//! A [`Path`] is an ordered list of segments, each either a mapping key or a
//! sequence index. Paths are values: [`Path::append`] returns a new path and
//! leaves the original untouched, so entries may share prefixes freely.
//!
//! Rendering joins keys with `.` and writes indices in brackets:
//!
//! ```
//! use confdiff_types::Path;
//!
//! let path = Path::root().key("service").key("ports").index(0).key("name");
//! assert_eq!(path.render(), "service.ports[0].name");
//! ```
//!
//! Keys that would make the rendering ambiguous (empty, or containing `.`,
//! `[`, `]` or `"`) are written as quoted bracket segments:
//! `labels["app.kubernetes.io/name"]`.

use std::fmt::{self, Write};

use serde::{Serialize, Serializer};

/// One step from a node to one of its children.
///
/// Ordering compares keys as strings and indices numerically. A key sorts
/// before an index when the two meet at the same position.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// A mapping key.
    Key(String),
    /// A 0-based sequence index.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Location of a node inside a tree. The empty path is the root.
///
/// Equality and ordering are structural over the segment list: element-wise,
/// with a path sorting before every longer path that extends it.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from a list of segments.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Return a new path with `segment` appended.
    pub fn append(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Self { segments }
    }

    /// Shorthand for appending a mapping key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.append(PathSegment::Key(key.into()))
    }

    /// Shorthand for appending a sequence index.
    pub fn index(&self, index: usize) -> Self {
        self.append(PathSegment::Index(index))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, or `None` at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The enclosing path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// Returns `true` if `self` equals `prefix` or extends it.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Canonical string form. The root renders as the empty string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Index(i) => {
                    let _ = write!(out, "[{i}]");
                }
                PathSegment::Key(key) if needs_quoting(key) => {
                    out.push_str("[\"");
                    for ch in key.chars() {
                        if ch == '"' || ch == '\\' {
                            out.push('\\');
                        }
                        out.push(ch);
                    }
                    out.push_str("\"]");
                }
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
            }
        }
        out
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"'])
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({})", self.render())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(Path::root().render(), "");
        assert!(Path::root().is_root());
    }

    #[test]
    fn keys_and_indices_render() {
        let p = Path::root().key("service").key("ports").index(0).key("name");
        assert_eq!(p.render(), "service.ports[0].name");
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn index_at_root() {
        assert_eq!(Path::root().index(3).key("a").render(), "[3].a");
    }

    #[test]
    fn ambiguous_keys_are_quoted() {
        let p = Path::root().key("labels").key("app.kubernetes.io/name");
        assert_eq!(p.render(), r#"labels["app.kubernetes.io/name"]"#);

        let q = Path::root().key("").key("x");
        assert_eq!(q.render(), r#"[""].x"#);

        let r = Path::root().key(r#"say "hi""#);
        assert_eq!(r.render(), r#"["say \"hi\""]"#);
    }

    #[test]
    fn append_leaves_original_untouched() {
        let base = Path::root().key("a");
        let left = base.key("b");
        let right = base.index(1);
        assert_eq!(base.render(), "a");
        assert_eq!(left.render(), "a.b");
        assert_eq!(right.render(), "a[1]");
    }

    #[test]
    fn prefix_sorts_first() {
        let short = Path::root().key("a");
        let long = short.key("b");
        assert!(short < long);
    }

    #[test]
    fn indices_compare_numerically() {
        let p2 = Path::root().key("list").index(2);
        let p10 = Path::root().key("list").index(10);
        assert!(p2 < p10);
        // Rendered strings would sort the other way.
        assert!(p2.render() > p10.render());
    }

    #[test]
    fn keys_compare_as_strings() {
        assert!(Path::root().key("alpha") < Path::root().key("beta"));
        assert!(Path::root().key("Z") < Path::root().key("a"));
    }

    #[test]
    fn parent_and_last() {
        let p = Path::root().key("a").index(4);
        assert_eq!(p.last(), Some(&PathSegment::Index(4)));
        assert_eq!(p.parent(), Some(Path::root().key("a")));
        assert_eq!(Path::root().parent(), None);
    }

    #[test]
    fn starts_with_prefix() {
        let p = Path::root().key("a").key("b");
        assert!(p.starts_with(&Path::root().key("a")));
        assert!(p.starts_with(&Path::root()));
        assert!(!p.starts_with(&Path::root().key("b")));
    }

    #[test]
    fn serializes_as_rendered_string() {
        let p = Path::root().key("list").index(2);
        assert_eq!(serde_json::to_string(&p).unwrap(), r#""list[2]""#);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn segment() -> impl Strategy<Value = PathSegment> {
            prop_oneof![
                "[a-z.\\[\\]\"]{0,4}".prop_map(PathSegment::Key),
                (0usize..20).prop_map(PathSegment::Index),
            ]
        }

        fn path() -> impl Strategy<Value = Path> {
            prop::collection::vec(segment(), 0..5).prop_map(Path::from_segments)
        }

        proptest! {
            #[test]
            fn append_then_parent_is_identity(p in path(), s in segment()) {
                let extended = p.append(s.clone());
                prop_assert_eq!(extended.parent(), Some(p.clone()));
                prop_assert_eq!(extended.last(), Some(&s));
                prop_assert!(p < extended);
            }

            #[test]
            fn order_follows_segment_tuples(a in path(), b in path()) {
                prop_assert_eq!(a.cmp(&b), a.segments().cmp(b.segments()));
            }

            #[test]
            fn distinct_paths_render_distinctly(a in path(), b in path()) {
                prop_assert_eq!(a == b, a.render() == b.render());
            }
        }
    }
}
