//! Element keys

/// Key addressing one element of a typed array
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Index {
    /// Row-major offset in `[0, count)`
    Flat(usize),
    /// One component per dimension
    Tuple(Vec<usize>),
    /// Caller-defined name; never checked against the shape
    Label(String),
}

/// Outcome of resolving an [`Index`] against a shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Offset(usize),
    Label(String),
}

impl From<usize> for Index {
    fn from(v: usize) -> Self {
        Index::Flat(v)
    }
}

impl From<Vec<usize>> for Index {
    fn from(v: Vec<usize>) -> Self {
        Index::Tuple(v)
    }
}

impl From<&[usize]> for Index {
    fn from(v: &[usize]) -> Self {
        Index::Tuple(v.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Index {
    fn from(v: [usize; N]) -> Self {
        Index::Tuple(v.to_vec())
    }
}

impl From<(usize, usize)> for Index {
    fn from((row, col): (usize, usize)) -> Self {
        Index::Tuple(vec![row, col])
    }
}

impl From<&str> for Index {
    fn from(v: &str) -> Self {
        Index::Label(v.to_string())
    }
}

impl From<String> for Index {
    fn from(v: String) -> Self {
        Index::Label(v)
    }
}
