//! # Sally Path Tree
//!
//! Values keyed by `/`-separated paths (e.g. Go import paths) arranged in a
//! tree. A value set at a path cascades down to every descendant path unless
//! the descendant has its own value.
//!
//! ```rust
//! use sally_path_tree::PathTree;
//!
//! let mut tree = PathTree::default();
//! tree.set("zap", 1);
//! tree.set("zap/zapcore", 2);
//!
//! assert_eq!(tree.lookup("zap/zapgrpc"), Some(("zap", &1)));
//! assert_eq!(tree.lookup("zap/zapcore/internal"), Some(("zap/zapcore", &2)));
//! assert_eq!(tree.lookup("fx"), None);
//! assert_eq!(tree.list_by_path("zap").len(), 2);
//! ```
//!
//! ## Concurrency
//!
//! The tree has no interior mutability. It is meant to be built once with
//! [`PathTree::set`] (or collected from an iterator) and then shared
//! read-only, typically behind an `Arc`, where any number of threads may call
//! [`PathTree::lookup`] and [`PathTree::list_by_path`] concurrently. To
//! change values after that point, build a new tree and swap the `Arc`.
//!
//! ## Path components
//!
//! Paths are split on every `/` with no normalization. Empty components are
//! ordinary names: `"/foo"`, `"foo//bar"` and `"foo/"` each create a node
//! named `""` somewhere along the way. The empty path denotes the root.

use std::collections::HashMap;

const SEPARATOR: char = '/';

/// Values held in a tree-like hierarchy defined by `/`-separated paths.
pub struct PathTree<T> {
    root: Node<T>,

    // Number of `set` calls so far. Over-counts re-assigned paths; only used
    // to pre-size the output of `list_by_path`.
    count_hint: usize,
}

impl<T> PathTree<T> {
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            count_hint: 0,
        }
    }

    /// Sets the value at `path`, creating intermediate nodes as needed.
    ///
    /// Descendants without an explicit value inherit it on lookup. Values
    /// stored at other paths are left untouched; re-setting a path replaces
    /// its previous value.
    pub fn set(&mut self, path: &str, value: T) {
        self.count_hint += 1;
        self.root.set(path, value);
    }

    /// Retrieves the value in effect for `path`.
    ///
    /// If `path` has no explicit value, the value of its closest ancestor
    /// with one is returned instead. The returned path is the path the value
    /// was actually set at, which may be a prefix of the one asked for.
    /// Returns `None` when neither the path nor any ancestor has a value.
    pub fn lookup(&self, path: &str) -> Option<(&str, &T)> {
        self.root.lookup(path)
    }

    /// Returns every explicitly set value at or below `path`, keyed by the
    /// path each value was set at.
    ///
    /// Unlike [`PathTree::lookup`] there is no inheritance: `path` itself
    /// must exist in the tree, otherwise the result is empty. The empty path
    /// lists the whole tree.
    pub fn list_by_path(&self, path: &str) -> HashMap<String, T>
    where
        T: Clone,
    {
        let Some(node) = self.root.get(path) else {
            return HashMap::new();
        };

        let mut items = HashMap::with_capacity(self.count_hint);
        node.collect_into(&mut items);
        items
    }
}

impl<T> Default for PathTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for PathTree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            count_hint: self.count_hint,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PathTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathTree")
            .field("root", &self.root)
            .field("count_hint", &self.count_hint)
            .finish()
    }
}

impl<K: AsRef<str>, T> Extend<(K, T)> for PathTree<T> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (path, value) in iter {
            self.set(path.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, T> FromIterator<(K, T)> for PathTree<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// A single node in a [`PathTree`].
#[derive(Clone, Debug)]
struct Node<T> {
    /// Single component of the path to this node, e.g. `"bar"` in
    /// `"foo/bar/baz"`. Empty for the root.
    name: String,

    /// Full path to this node from the root. Empty for the root.
    path: String,

    /// Present only if a value was set at exactly this path.
    value: Option<T>,

    children: HashMap<String, Node<T>>,
}

impl<T> Node<T> {
    fn root() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            value: None,
            children: HashMap::new(),
        }
    }

    fn set(&mut self, path: &str, value: T) {
        let mut node = self;

        // `path[..end]` is the full path of the node we are descending into.
        // Slicing the assigned path avoids joining names at every level.
        let mut end = 0;
        for (depth, head) in components(path).enumerate() {
            if depth > 0 {
                end += SEPARATOR.len_utf8();
            }
            end += head.len();

            node = node
                .children
                .entry(head.to_string())
                .or_insert_with(|| Node {
                    name: head.to_string(),
                    path: path[..end].to_string(),
                    value: None,
                    children: HashMap::new(),
                });
            debug_assert!(node.path.ends_with(&node.name));
        }
        node.value = Some(value);
    }

    /// Walks towards `path` and returns the deepest node on the way that
    /// carries a value. The walk stops early at the first missing component.
    fn lookup(&self, path: &str) -> Option<(&str, &T)> {
        let mut node = self;
        let mut last = node.entry();
        for head in components(path) {
            let Some(child) = node.children.get(head) else {
                break;
            };
            node = child;
            if let Some(found) = node.entry() {
                last = Some(found);
            }
        }
        last
    }

    /// Node at exactly `path`, if one exists.
    fn get(&self, path: &str) -> Option<&Node<T>> {
        components(path).try_fold(self, |node, head| node.children.get(head))
    }

    fn entry(&self) -> Option<(&str, &T)> {
        self.value.as_ref().map(|value| (self.path.as_str(), value))
    }

    fn collect_into(&self, items: &mut HashMap<String, T>)
    where
        T: Clone,
    {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(value) = &node.value {
                items.insert(node.path.clone(), value.clone());
            }
            stack.extend(node.children.values());
        }
    }
}

/// Splits off the first component of a path.
///
/// The tail is `None` when `path` has no separator, which keeps a trailing
/// `/` (an empty last component) distinguishable from its absence.
///
/// ```text
/// take_first("foo/bar/baz") => ("foo", Some("bar/baz"))
/// take_first("foo")         => ("foo", None)
/// take_first("foo/")        => ("foo", Some(""))
/// ```
fn take_first(path: &str) -> (&str, Option<&str>) {
    match path.split_once(SEPARATOR) {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    }
}

/// Components of `path` from left to right. The empty path has none.
fn components(path: &str) -> impl Iterator<Item = &str> {
    let mut rest = (!path.is_empty()).then_some(path);
    std::iter::from_fn(move || {
        let (head, tail) = take_first(rest?);
        rest = tail;
        Some(head)
    })
}
