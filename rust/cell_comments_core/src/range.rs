//! Location span of a thread inside its resource.

use serde::{Deserialize, Serialize};

/// 1-based line/column span, end inclusive of the end column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_line_number: u32,
    pub start_column: u32,
    pub end_line_number: u32,
    pub end_column: u32,
}

impl Range {
    pub fn new(start_line_number: u32, start_column: u32, end_line_number: u32, end_column: u32) -> Self {
        Self { start_line_number, start_column, end_line_number, end_column }
    }

    /// Empty range at the very start of the resource.
    pub fn start_of_resource() -> Self {
        Self::new(1, 1, 1, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.start_line_number == self.end_line_number && self.start_column == self.end_column
    }

    /// Swap the endpoints when the end precedes the start.
    pub fn normalized(self) -> Self {
        let start = (self.start_line_number, self.start_column);
        let end = (self.end_line_number, self.end_column);
        if end < start {
            Self::new(end.0, end.1, start.0, start.1)
        } else {
            self
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::start_of_resource()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_reversed_span() {
        let r = Range::new(4, 2, 1, 7).normalized();
        assert_eq!(r, Range::new(1, 7, 4, 2));
        assert_eq!(r.normalized(), r);
    }

    #[test]
    fn start_of_resource_is_empty() {
        assert!(Range::start_of_resource().is_empty());
        assert!(!Range::new(1, 1, 1, 2).is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&Range::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"startLineNumber":1,"startColumn":2,"endLineNumber":3,"endColumn":4}"#);
    }
}
