use serde::{Deserialize, Serialize};

/// Offset/limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0),
            limit: limit.max(0),
        }
    }

    /// Zero-based page number of `size` rows each
    pub fn of(number: i64, size: i64) -> Self {
        Self::new(number.max(0).saturating_mul(size.max(0)), size)
    }
}

/// A window of results together with the unpaged total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResults<T> {
    pub results: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: Option<i64>,
}

impl<T> QueryResults<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> QueryResults<U> {
        QueryResults {
            results: self.results.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_of_computes_offset() {
        assert_eq!(Page::of(2, 10), Page::new(20, 10));
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        assert_eq!(Page::new(-5, -1), Page { offset: 0, limit: 0 });
    }

    #[test]
    fn far_page_offset_saturates() {
        assert_eq!(Page::of(i64::MAX / 2, 10).offset, i64::MAX);
        assert_eq!(Page::of(i64::MAX, i64::MAX).limit, i64::MAX);
    }

    #[test]
    fn map_keeps_paging_metadata() {
        let results = QueryResults {
            results: vec![1, 2],
            total: 4,
            offset: 1,
            limit: Some(2),
        };

        let mapped = results.map(|n| n * 10);

        assert_eq!(mapped.results, vec![10, 20]);
        assert_eq!(mapped.total, 4);
        assert_eq!(mapped.offset, 1);
        assert_eq!(mapped.limit, Some(2));
    }
}
