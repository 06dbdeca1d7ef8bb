//! 分页参数

use serde::Serialize;

/// 默认每页条数
pub const DEFAULT_PER_PAGE: u32 = 20;

/// 每页条数上限
pub const MAX_PER_PAGE: u32 = 100;

/// 规范化后的分页请求（page 从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// page 至少为 1，per_page 限制在 [1, 100]
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        let per_page = u64::from(request.per_page());
        let total_pages = if total > 0 { total.div_ceil(per_page) } else { 1 };

        Self {
            items,
            total,
            page: request.page(),
            per_page: request.per_page(),
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_limits() {
        let req = PageRequest::new(Some(0), Some(500));
        assert_eq!(req.page(), 1);
        assert_eq!(req.per_page(), MAX_PER_PAGE);

        let req = PageRequest::new(None, None);
        assert_eq!(req.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::new(Some(3), Some(10));
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_total_pages() {
        let req = PageRequest::new(Some(1), Some(20));
        assert_eq!(Page::<u8>::new(vec![], 0, req).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 20, req).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], 41, req).total_pages, 3);
    }
}
