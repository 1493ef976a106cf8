//! Generic list-view controller: pagination, search and derived totals.
//!
//! The controller is plain state. Operations that need data from the server
//! return the `PageQuery` to fetch; the caller performs the request and feeds
//! the outcome back through `apply_page` / `apply_error` together with the
//! ticket issued by `begin_fetch`.
//!
//! Two data-sourcing modes:
//! - idle (empty search term): the displayed rows are exactly the server page;
//! - searching: rows come from filtering the already loaded set, paginated
//!   client-side, and totals are computed from the filtered length.

use crate::shared::formatting::Gender;
use crate::shared::pagination::{total_pages, PageQuery, PaginatedResponse, Pager};
use crate::shared::search::Searchable;

/// Identifies one issued fetch. Only the latest issued ticket is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct RequestTickets {
    latest: u64,
}

impl RequestTickets {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// Why the table has no rows to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing loaded yet.
    Loading,
    /// The server has no records at all.
    NoRecords,
    /// Records exist but none match the search term.
    NoMatches(String),
}

impl EmptyState {
    pub fn message(&self, entity_plural: &str, gender: Gender) -> String {
        match self {
            EmptyState::Loading => "Cargando...".to_string(),
            EmptyState::NoRecords => {
                format!("No hay {entity_plural} {}", gender.agree("registrad", true))
            }
            EmptyState::NoMatches(term) => {
                format!("No se encontraron {entity_plural} que coincidan con \"{term}\"")
            }
        }
    }
}

/// What `apply_page` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Superseded by a newer fetch; nothing changed.
    Stale,
    Stored,
    /// The page lies past the end (its last rows were deleted). The controller
    /// moved to the last page; fetch this query.
    Refetch(PageQuery),
}

impl PageOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, PageOutcome::Stale)
    }
}

/// What to reload after a create/update/delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPlan {
    pub page: PageQuery,
    pub stats: bool,
    pub charts: bool,
}

#[derive(Debug, Clone)]
pub struct ListViewController<T> {
    /// Displayed page, zero-based.
    page: usize,
    page_size: usize,
    search_term: String,
    /// Page size used to widen the loaded set while searching.
    search_page_size: Option<usize>,
    loaded: Vec<T>,
    /// Query the loaded rows came from.
    loaded_query: PageQuery,
    server_total: usize,
    pending: Option<PageQuery>,
    loading: bool,
    loaded_once: bool,
    error: Option<String>,
    tickets: RequestTickets,
}

impl<T: Searchable + Clone> ListViewController<T> {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page: 0,
            page_size,
            search_term: String::new(),
            search_page_size: None,
            loaded: Vec::new(),
            loaded_query: PageQuery::first(page_size),
            server_total: 0,
            pending: None,
            loading: false,
            loaded_once: false,
            error: None,
            tickets: RequestTickets::default(),
        }
    }

    /// Entering a search loads the first `size` rows so the filter sees more than one page.
    pub fn with_search_page_size(mut self, size: usize) -> Self {
        self.search_page_size = Some(size.max(1));
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Rows currently held, before filtering.
    pub fn loaded(&self) -> &[T] {
        &self.loaded
    }

    /// Query that reloads what the view shows right now.
    pub fn current_query(&self) -> PageQuery {
        match (self.is_searching(), self.search_page_size) {
            (true, Some(size)) => PageQuery::first(size),
            (true, None) => PageQuery::new(self.loaded_query.page, self.page_size),
            (false, _) => PageQuery::new(self.page, self.page_size),
        }
    }

    /// Moves to `page`. Returns the query to fetch when paging is server-side.
    pub fn set_page(&mut self, page: usize) -> Option<PageQuery> {
        let pages = self.total_pages();
        let page = if pages > 0 { page.min(pages - 1) } else { 0 };
        self.page = page;
        if self.is_searching() {
            None
        } else {
            Some(PageQuery::new(page, self.page_size))
        }
    }

    /// Changes the page size and goes back to the first page.
    pub fn set_page_size(&mut self, size: usize) -> Option<PageQuery> {
        self.page_size = size.max(1);
        self.page = 0;
        if self.is_searching() {
            None
        } else {
            Some(PageQuery::first(self.page_size))
        }
    }

    /// Applies a pager target. A new size goes through `set_page_size`.
    pub fn navigate(&mut self, target: PageQuery) -> Option<PageQuery> {
        if target.size != self.page_size {
            self.set_page_size(target.size)
        } else {
            self.set_page(target.page)
        }
    }

    /// Updates the search term. Returns a query when the mode change needs server data.
    pub fn set_search(&mut self, term: &str) -> Option<PageQuery> {
        let was_searching = self.is_searching();
        self.search_term = term.to_string();
        let searching = self.is_searching();

        match (was_searching, searching) {
            (false, true) => {
                self.page = 0;
                match self.search_page_size {
                    Some(size) if self.loaded_query.size < size || self.loaded_query.page != 0 => {
                        Some(PageQuery::first(size))
                    }
                    _ => None,
                }
            }
            (true, true) => {
                self.page = 0;
                None
            }
            (true, false) => {
                self.page = if self.search_page_size.is_some() {
                    0
                } else {
                    self.loaded_query.page
                };
                Some(PageQuery::new(self.page, self.page_size))
            }
            (false, false) => None,
        }
    }

    /// Marks `query` as in flight and returns its ticket.
    pub fn begin_fetch(&mut self, query: PageQuery) -> RequestTicket {
        self.loading = true;
        self.pending = Some(query);
        self.tickets.issue()
    }

    /// Stores a server page. A superseded ticket changes nothing.
    pub fn apply_page(&mut self, ticket: RequestTicket, response: PaginatedResponse<T>) -> PageOutcome {
        if !self.tickets.is_current(ticket) {
            return PageOutcome::Stale;
        }
        let query = self.pending.take().unwrap_or(PageQuery::new(response.page, response.size));
        let overshot = response.items.is_empty() && query.page > 0;
        self.loaded = response.items;
        self.server_total = response.total;
        self.loaded_query = query;
        self.loading = false;
        self.loaded_once = true;
        self.error = None;
        if self.is_searching() {
            return PageOutcome::Stored;
        }
        self.page = query.page;
        if overshot {
            let last = total_pages(self.server_total, self.page_size).saturating_sub(1);
            if last < query.page {
                self.page = last;
                if self.server_total > 0 {
                    return PageOutcome::Refetch(PageQuery::new(last, self.page_size));
                }
            }
        }
        PageOutcome::Stored
    }

    /// Records a failed fetch. Already displayed rows stay. Returns `false` for a superseded ticket.
    pub fn apply_error(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if !self.tickets.is_current(ticket) {
            return false;
        }
        self.pending = None;
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    fn filtered(&self) -> Vec<&T> {
        self.loaded
            .iter()
            .filter(|row| row.matches_filter(&self.search_term))
            .collect()
    }

    /// Rows for the current page.
    pub fn visible_items(&self) -> Vec<T> {
        if self.is_searching() {
            self.filtered()
                .into_iter()
                .skip(self.page * self.page_size)
                .take(self.page_size)
                .cloned()
                .collect()
        } else {
            self.loaded.iter().take(self.page_size).cloned().collect()
        }
    }

    pub fn total_items(&self) -> usize {
        if self.is_searching() {
            self.filtered().len()
        } else {
            self.server_total
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items(), self.page_size)
    }

    pub fn pager(&self) -> Pager {
        Pager {
            page: self.page,
            size: self.page_size,
            total_items: self.total_items(),
            total_pages: self.total_pages(),
        }
    }

    /// `None` when there are rows to show.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.loaded_once {
            return Some(EmptyState::Loading);
        }
        if !self.visible_items().is_empty() {
            return None;
        }
        if self.is_searching() {
            Some(EmptyState::NoMatches(self.search_term.trim().to_string()))
        } else if self.server_total == 0 {
            Some(EmptyState::NoRecords)
        } else {
            // records exist; the corrected page is on its way
            Some(EmptyState::Loading)
        }
    }

    /// Everything to reload after a successful mutation.
    pub fn after_mutation(&self) -> RefreshPlan {
        RefreshPlan {
            page: self.current_query(),
            stats: true,
            charts: true,
        }
    }
}

/// One independent load (stats or charts): last good data, flags and its own tickets.
#[derive(Debug, Clone)]
pub struct LoadSlot<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    tickets: RequestTickets,
}

impl<T> Default for LoadSlot<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            tickets: RequestTickets::default(),
        }
    }
}

impl<T> LoadSlot<T> {
    pub fn begin(&mut self) -> RequestTicket {
        self.loading = true;
        self.tickets.issue()
    }

    /// Stores the result unless a newer load was started since.
    pub fn apply(&mut self, ticket: RequestTicket, data: T) -> bool {
        if !self.tickets.is_current(ticket) {
            return false;
        }
        self.data = Some(data);
        self.loading = false;
        self.error = None;
        true
    }

    /// Keeps the previous data.
    pub fn fail(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if !self.tickets.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::PagerStep;

    #[derive(Debug, Clone, PartialEq)]
    struct Hotel {
        name: String,
        city: String,
    }

    impl Searchable for Hotel {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str(), self.city.as_str()]
        }
    }

    fn hotel(name: &str, city: &str) -> Hotel {
        Hotel {
            name: name.to_string(),
            city: city.to_string(),
        }
    }

    fn page_of(items: Vec<Hotel>, total: usize, page: usize, size: usize) -> PaginatedResponse<Hotel> {
        PaginatedResponse { items, total, page, size }
    }

    fn loaded(ctrl: &mut ListViewController<Hotel>, items: Vec<Hotel>, total: usize) {
        let q = ctrl.current_query();
        let t = ctrl.begin_fetch(q);
        assert_eq!(ctrl.apply_page(t, page_of(items, total, q.page, q.size)), PageOutcome::Stored);
    }

    #[test]
    fn test_idle_paging_goes_to_server() {
        let mut ctrl = ListViewController::new(10);
        loaded(&mut ctrl, vec![hotel("A", "x"); 10], 35);
        assert_eq!(ctrl.total_pages(), 4);
        assert_eq!(ctrl.set_page(2), Some(PageQuery::new(2, 10)));
        assert_eq!(ctrl.set_page(99), Some(PageQuery::new(3, 10)));
        assert_eq!(ctrl.visible_items().len(), 10);
        assert_eq!(ctrl.total_items(), 35);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut ctrl = ListViewController::new(10);
        loaded(&mut ctrl, vec![hotel("A", "x"); 10], 35);
        ctrl.set_page(2);
        assert_eq!(ctrl.set_page_size(25), Some(PageQuery::new(0, 25)));
        assert_eq!(ctrl.page(), 0);
    }

    #[test]
    fn test_pager_buttons_drive_the_controller() {
        let mut ctrl = ListViewController::new(10);
        loaded(&mut ctrl, vec![hotel("A", "x"); 10], 35);
        let last = ctrl.pager().step(PagerStep::Last).unwrap();
        assert_eq!(ctrl.navigate(last), Some(PageQuery::new(3, 10)));
        assert_eq!(ctrl.pager().step(PagerStep::Next), None);

        let resized = ctrl.pager().resize(25).unwrap();
        assert_eq!(ctrl.navigate(resized), Some(PageQuery::new(0, 25)));
        assert_eq!(ctrl.pager().label(), "Página 1 de 2 (35 registros)");
    }

    #[test]
    fn test_pager_follows_search_totals() {
        let mut ctrl = ListViewController::new(2);
        loaded(
            &mut ctrl,
            vec![hotel("Sol", "Lima"), hotel("Luna", "Cusco"), hotel("Solar", "Lima")],
            3,
        );
        assert_eq!(ctrl.set_search("lima"), None);
        let pager = ctrl.pager();
        assert_eq!((pager.total_items, pager.total_pages), (2, 1));
        assert_eq!(pager.step(PagerStep::Next), None);
    }

    #[test]
    fn test_search_filters_loaded_rows_and_recomputes_totals() {
        let mut ctrl = ListViewController::new(2);
        loaded(
            &mut ctrl,
            vec![hotel("Villa Sol", "Cali"), hotel("Mar Azul", "Villeta"), hotel("Centro", "Bogotá")],
            40,
        );
        ctrl.set_page(1);
        assert_eq!(ctrl.set_search("vil"), None);
        assert!(ctrl.is_searching());
        assert_eq!(ctrl.page(), 0);
        assert_eq!(ctrl.total_items(), 2);
        assert_eq!(ctrl.total_pages(), 1);
        // client-side paging while searching
        assert_eq!(ctrl.set_page(0), None);
        assert_eq!(ctrl.set_page_size(1), None);
        assert_eq!(ctrl.total_pages(), 2);
        assert_eq!(ctrl.visible_items(), vec![hotel("Villa Sol", "Cali")]);
        ctrl.set_page(1);
        assert_eq!(ctrl.visible_items(), vec![hotel("Mar Azul", "Villeta")]);
    }

    #[test]
    fn test_search_widens_loaded_set_when_configured() {
        let mut ctrl = ListViewController::new(10).with_search_page_size(500);
        loaded(&mut ctrl, vec![hotel("A", "x"); 10], 120);
        assert_eq!(ctrl.set_search("a"), Some(PageQuery::new(0, 500)));
        let t = ctrl.begin_fetch(PageQuery::new(0, 500));
        ctrl.apply_page(t, page_of(vec![hotel("A", "x"); 120], 120, 0, 500));
        // already widened: refining the term does not refetch
        assert_eq!(ctrl.set_search("ab"), None);
        assert_eq!(ctrl.current_query(), PageQuery::new(0, 500));
    }

    #[test]
    fn test_clearing_search_refetches_server_page() {
        let mut ctrl = ListViewController::new(10);
        loaded(&mut ctrl, vec![hotel("A", "x"); 10], 30);
        ctrl.set_page(1);
        let t = ctrl.begin_fetch(PageQuery::new(1, 10));
        ctrl.apply_page(t, page_of(vec![hotel("B", "y"); 10], 30, 1, 10));
        ctrl.set_search("b");
        assert_eq!(ctrl.total_items(), 10);
        assert_eq!(ctrl.set_search(""), Some(PageQuery::new(1, 10)));
        assert!(!ctrl.is_searching());
        assert_eq!(ctrl.total_items(), 30);
        assert_eq!(ctrl.set_search("   "), None);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut ctrl = ListViewController::new(10);
        let first = ctrl.begin_fetch(PageQuery::new(0, 10));
        let second = ctrl.begin_fetch(PageQuery::new(1, 10));
        assert!(ctrl.apply_page(second, page_of(vec![hotel("new", "x")], 11, 1, 10)).is_applied());
        assert_eq!(
            ctrl.apply_page(first, page_of(vec![hotel("old", "x")], 11, 0, 10)),
            PageOutcome::Stale
        );
        assert!(!ctrl.apply_error(first, "late failure"));
        assert_eq!(ctrl.visible_items(), vec![hotel("new", "x")]);
        assert_eq!(ctrl.page(), 1);
        assert_eq!(ctrl.error(), None);
    }

    #[test]
    fn test_failed_fetch_keeps_rows() {
        let mut ctrl = ListViewController::new(10);
        loaded(&mut ctrl, vec![hotel("A", "x")], 1);
        let t = ctrl.begin_fetch(PageQuery::new(0, 10));
        assert!(ctrl.is_loading());
        assert!(ctrl.apply_error(t, "Error del servidor"));
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.error(), Some("Error del servidor"));
        assert_eq!(ctrl.visible_items().len(), 1);
    }

    #[test]
    fn test_empty_states_are_distinct() {
        let mut ctrl: ListViewController<Hotel> = ListViewController::new(10);
        assert_eq!(ctrl.empty_state(), Some(EmptyState::Loading));

        loaded(&mut ctrl, vec![], 0);
        assert_eq!(ctrl.empty_state(), Some(EmptyState::NoRecords));

        loaded(&mut ctrl, vec![hotel("Hotel Central", "Bogotá"), hotel("Casa Mar", "Santa Marta")], 2);
        assert_eq!(ctrl.empty_state(), None);

        ctrl.set_search("villa");
        let state = ctrl.empty_state();
        assert_eq!(state, Some(EmptyState::NoMatches("villa".to_string())));

        let loading = EmptyState::Loading.message("hoteles", Gender::Masculine);
        let none = EmptyState::NoRecords.message("hoteles", Gender::Masculine);
        let no_match = state.map(|s| s.message("hoteles", Gender::Masculine)).unwrap_or_default();
        assert_eq!(no_match, "No se encontraron hoteles que coincidan con \"villa\"");
        assert_ne!(no_match, none);
        assert_ne!(no_match, loading);
        assert_ne!(none, loading);
    }

    #[test]
    fn test_no_records_message_agrees_with_gender() {
        assert_eq!(EmptyState::NoRecords.message("fotos", Gender::Feminine), "No hay fotos registradas");
        assert_eq!(EmptyState::NoRecords.message("viajes", Gender::Masculine), "No hay viajes registrados");
    }

    #[test]
    fn test_deleting_last_row_of_last_page_moves_back_a_page() {
        let mut ctrl: ListViewController<Hotel> = ListViewController::new(10);
        loaded(&mut ctrl, vec![hotel("A", "x"); 10], 21);
        ctrl.set_page(2);
        let t = ctrl.begin_fetch(PageQuery::new(2, 10));
        ctrl.apply_page(t, page_of(vec![hotel("Z", "x")], 21, 2, 10));

        // the only row of page 3 was deleted; the refresh of that page comes back empty
        let plan = ctrl.after_mutation();
        assert_eq!(plan.page, PageQuery::new(2, 10));
        let t = ctrl.begin_fetch(plan.page);
        let outcome = ctrl.apply_page(t, page_of(vec![], 20, 2, 10));
        assert_eq!(outcome, PageOutcome::Refetch(PageQuery::new(1, 10)));
        assert_eq!(ctrl.page(), 1);
        assert_eq!(ctrl.total_pages(), 2);
        assert_ne!(ctrl.empty_state(), Some(EmptyState::NoRecords));

        let t = ctrl.begin_fetch(PageQuery::new(1, 10));
        let outcome = ctrl.apply_page(t, page_of(vec![hotel("A", "x"); 10], 20, 1, 10));
        assert_eq!(outcome, PageOutcome::Stored);
        assert_eq!(ctrl.empty_state(), None);
        assert_eq!(ctrl.visible_items().len(), 10);
    }

    #[test]
    fn test_deleting_the_very_last_record_shows_no_records() {
        let mut ctrl: ListViewController<Hotel> = ListViewController::new(10);
        loaded(&mut ctrl, vec![hotel("A", "x"); 10], 11);
        ctrl.set_page(1);
        let t = ctrl.begin_fetch(PageQuery::new(1, 10));
        let outcome = ctrl.apply_page(t, page_of(vec![], 0, 1, 10));
        assert_eq!(outcome, PageOutcome::Stored);
        assert_eq!(ctrl.page(), 0);
        assert_eq!(ctrl.empty_state(), Some(EmptyState::NoRecords));
    }

    #[test]
    fn test_after_mutation_reloads_everything() {
        let mut ctrl: ListViewController<Hotel> = ListViewController::new(10);
        loaded(&mut ctrl, vec![hotel("A", "x"); 10], 25);
        ctrl.set_page(2);
        let t = ctrl.begin_fetch(PageQuery::new(2, 10));
        ctrl.apply_page(t, page_of(vec![hotel("A", "x"); 5], 25, 2, 10));
        let plan = ctrl.after_mutation();
        assert_eq!(plan.page, PageQuery::new(2, 10));
        assert!(plan.stats && plan.charts);
    }

    #[test]
    fn test_load_slot_keeps_latest_and_survives_failure() {
        let mut slot: LoadSlot<u32> = LoadSlot::default();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.apply(first, 1));
        assert!(slot.is_loading());
        assert!(slot.apply(second, 2));
        assert_eq!(slot.data(), Some(&2));

        let third = slot.begin();
        assert!(slot.fail(third, "sin conexión"));
        assert_eq!(slot.data(), Some(&2));
        assert_eq!(slot.error(), Some("sin conexión"));
        assert!(!slot.is_loading());
    }
}
