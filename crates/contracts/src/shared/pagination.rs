//! Pagination contract shared by every `listar` endpoint.

use serde::{Deserialize, Serialize};

/// Query sent to a list endpoint. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: usize,
    pub size: usize,
}

impl PageQuery {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// First page with the given size.
    pub fn first(size: usize) -> Self {
        Self { page: 0, size }
    }
}

/// Response envelope of a list endpoint: `{ items, total, page, size }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub size: usize,
}

impl<T> PaginatedResponse<T> {
    /// Converts items while keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}

/// `ceil(total / size)`; zero when there is nothing to show or size is zero.
pub fn total_pages(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// What the pager shows and which page each of its buttons reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Pager buttons, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    First,
    Previous,
    Next,
    Last,
}

impl PagerStep {
    pub const ALL: [PagerStep; 4] = [Self::First, Self::Previous, Self::Next, Self::Last];

    pub fn icon(self) -> &'static str {
        match self {
            Self::First => "chevrons-left",
            Self::Previous => "chevron-left",
            Self::Next => "chevron-right",
            Self::Last => "chevrons-right",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::First => "Primera página",
            Self::Previous => "Página anterior",
            Self::Next => "Página siguiente",
            Self::Last => "Última página",
        }
    }
}

impl Pager {
    /// Target query of a button; `None` disables it.
    pub fn step(&self, step: PagerStep) -> Option<PageQuery> {
        let has_next = self.page + 1 < self.total_pages;
        let target = match step {
            PagerStep::First => (self.page > 0).then_some(0),
            PagerStep::Previous => self.page.checked_sub(1),
            PagerStep::Next => has_next.then_some(self.page + 1),
            PagerStep::Last => has_next.then(|| self.total_pages - 1),
        }?;
        Some(PageQuery::new(target, self.size))
    }

    /// Switching size restarts from the first page.
    pub fn resize(&self, size: usize) -> Option<PageQuery> {
        (size > 0 && size != self.size).then(|| PageQuery::first(size))
    }

    pub fn label(&self) -> String {
        format!(
            "Página {} de {} ({} registros)",
            self.page + 1,
            self.total_pages.max(1),
            self.total_items
        )
    }
}
