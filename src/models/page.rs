// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-driven pagination envelope.

use serde::{Deserialize, Serialize};

/// One page of a paginated collection.
///
/// `page` is 0-based; `page_count` is `ceil(total / size)` and
/// `content.len() <= size` by server contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    #[serde(rename = "pageCount")]
    pub page_count: u32,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    /// Compute the page count a well-behaved server would report.
    pub fn expected_page_count(total: u64, size: u32) -> u32 {
        if size == 0 {
            return 0;
        }
        total.div_ceil(u64::from(size)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(Page::<()>::expected_page_count(25, 10), 3);
        assert_eq!(Page::<()>::expected_page_count(30, 10), 3);
        assert_eq!(Page::<()>::expected_page_count(0, 10), 0);
        assert_eq!(Page::<()>::expected_page_count(1, 10), 1);
    }

    #[test]
    fn deserializes_wire_shape() {
        let json = r#"{"page":0,"size":10,"total":25,"pageCount":3,"content":[1,2,3]}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page_count, 3);
        assert_eq!(page.content.len(), 3);
    }
}
