//! Path pattern matching
//!
//! Matches request paths against route patterns segment by segment.
//! A `:name` segment binds a single non-empty path segment to a named
//! parameter, e.g. the pattern `/:userID` matches `/42` and captures
//! `userID = 42`.

/// Parameters captured from a matched path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Look up a captured parameter by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }
}

/// Match a path against a pattern, capturing `:name` segments.
///
/// Returns `None` when the path does not match. Matching is strict:
/// segment counts must agree, so `/:userID` matches neither `/` nor
/// `/a/b`, and trailing slashes are significant.
pub fn match_pattern(pattern: &str, path: &str) -> Option<PathParams> {
    let pattern_segs = segments(pattern);
    let path_segs = segments(path);

    if pattern_segs.len() != path_segs.len() {
        return None;
    }

    let mut params = PathParams::default();
    for (pat, seg) in pattern_segs.iter().zip(&path_segs) {
        if let Some(name) = pat.strip_prefix(':') {
            // A parameter never binds an empty segment
            if seg.is_empty() {
                return None;
            }
            params.push(name, seg);
        } else if pat != seg {
            return None;
        }
    }

    Some(params)
}

/// Split a path into segments, treating `/` as the empty root segment
fn segments(s: &str) -> Vec<&str> {
    s.strip_prefix('/').unwrap_or(s).split('/').collect()
}
