//! Positional addressing into a condition tree

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Ordered child indices locating a node from the root sequence.
///
/// A path of length 1 addresses a root-level item, a path of length `k`
/// addresses an item nested `k - 1` groups deep. The empty path addresses
/// the root sequence itself (only meaningful as a parent path).
///
/// Paths are positional: any structural mutation may shift them, so they
/// must be derived from the tree revision they are applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(SmallVec<[usize; 4]>);

impl Path {
    /// The root path (empty)
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the child at `index` below this path
    pub fn child(&self, index: usize) -> Self {
        let mut next = self.0.clone();
        next.push(index);
        Self(next)
    }

    /// Split into the parent path and the last index
    pub fn split_last(&self) -> Option<(Path, usize)> {
        self.0
            .split_last()
            .map(|(&last, parent)| (Path::from(parent), last))
    }
}

impl Deref for Path {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(SmallVec::from_slice(indices))
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(indices))
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.iter().copied().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Path::root().to_string(), "[]");
        assert_eq!(Path::from([1, 0, 2]).to_string(), "[1, 0, 2]");
    }

    #[test]
    fn test_child_and_split() {
        let path = Path::root().child(1).child(3);
        assert_eq!(&*path, &[1, 3]);

        let (parent, last) = path.split_last().unwrap();
        assert_eq!(parent, Path::from([1]));
        assert_eq!(last, 3);
        assert!(Path::root().split_last().is_none());
    }
}
