use serde::Serialize;
use std::ops::Range;

/// 后台列表每页条数
pub const PAGE_SIZE: usize = 10;

/// 固定页大小的分页器，页码从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// ceil(count / page_size)，空集合为 0 页
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size)
    }

    /// 把页码限制在 [1, max(1, total_pages)]
    pub fn clamp(&self, page: usize, count: usize) -> usize {
        page.clamp(1, self.total_pages(count).max(1))
    }

    pub fn previous(&self, page: usize, count: usize) -> usize {
        self.clamp(page.saturating_sub(1), count)
    }

    pub fn next(&self, page: usize, count: usize) -> usize {
        self.clamp(page.saturating_add(1), count)
    }

    /// `[(page-1)*size, page*size)` 截断到 `[0, count)`
    pub fn window(&self, count: usize, page: usize) -> Range<usize> {
        let start = page.max(1).saturating_sub(1).saturating_mul(self.page_size).min(count);
        let end = start.saturating_add(self.page_size).min(count);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        &items[self.window(items.len(), page)]
    }

    /// 先修正页码再切片
    pub fn paginate<T: Clone>(&self, items: &[T], page: usize) -> Page<T> {
        let total = items.len();
        let page = self.clamp(page, total);

        Page {
            page,
            page_size: self.page_size,
            total,
            total_pages: self.total_pages(total),
            items: self.slice(items, page).to_vec(),
        }
    }
}

/// 一页数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
