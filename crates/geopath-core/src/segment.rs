// crates/geopath-core/src/segment.rs

/// Lazy iterator over the non-empty `/`-separated tokens of a path.
///
/// Leading, trailing and repeated slashes produce no tokens. Tokens are
/// borrowed from the input and keep their exact casing. Never fails.
///
/// # Examples
///
/// ```
/// use geopath_core::PathSegments;
///
/// let tokens: Vec<&str> = PathSegments::new("//us/massage//california/").collect();
/// assert_eq!(tokens, vec!["us", "massage", "california"]);
/// ```
#[derive(Clone, Debug)]
pub struct PathSegments<'a> {
    inner: std::str::Split<'a, char>,
}

impl<'a> PathSegments<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            inner: path.split('/'),
        }
    }
}

impl<'a> Iterator for PathSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|s| !s.is_empty())
    }
}

/// Collects [`PathSegments`] into a vector.
///
/// ```
/// use geopath_core::segments;
///
/// assert_eq!(segments("/us/massage/california/la"), vec!["us", "massage", "california", "la"]);
/// assert!(segments("/").is_empty());
/// assert!(segments("").is_empty());
/// ```
pub fn segments(path: &str) -> Vec<&str> {
    PathSegments::new(path).collect()
}
