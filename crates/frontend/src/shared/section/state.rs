use crate::config::config;
use crate::shared::api_client::EntityClient;
use crate::shared::date_utils::local_now;
use chrono::{DateTime, FixedOffset};
use contracts::domain::common::Entity;
use contracts::shared::aggregation::Chart;
use contracts::shared::indicators::StatItem;
use contracts::shared::list_view::{ListViewController, LoadSlot, PageOutcome};
use contracts::shared::pagination::PageQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Reactive state of one entity section. Page, stats and charts load independently.
pub struct SectionState<E: Entity> {
    pub list: RwSignal<ListViewController<E::Row>>,
    pub stats: RwSignal<LoadSlot<Vec<StatItem>>>,
    pub charts: RwSignal<LoadSlot<[Chart; 2]>>,
}

impl<E: Entity> Clone for SectionState<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Entity> Copy for SectionState<E> {}

pub fn create_state<E: Entity>() -> SectionState<E> {
    let cfg = config();
    SectionState {
        list: RwSignal::new(
            ListViewController::new(cfg.default_page_size)
                .with_search_page_size(cfg.search_page_size),
        ),
        stats: RwSignal::new(LoadSlot::default()),
        charts: RwSignal::new(LoadSlot::default()),
    }
}

impl<E: Entity> SectionState<E> {
    pub fn load_page(&self, client: EntityClient<E>, query: PageQuery) {
        let state = *self;
        let list = self.list;
        let Some(ticket) = list.try_update(|c| c.begin_fetch(query)) else {
            return;
        };
        spawn_local(async move {
            let zone = *local_now().offset();
            let outcome = match client.list(query).await {
                Ok(page) => list.try_update(|c| c.apply_page(ticket, page.map(|e| e.to_row(&zone)))),
                Err(e) => {
                    log::error!("{}: list page {} failed: {}", E::RESOURCE, query.page, e);
                    list.try_update(|c| c.apply_error(ticket, e.user_message()))
                        .map(|applied| if applied { PageOutcome::Stored } else { PageOutcome::Stale })
                }
            };
            match outcome {
                Some(PageOutcome::Stale) => {
                    log::warn!("{}: discarded stale page {} response", E::RESOURCE, query.page);
                }
                Some(PageOutcome::Refetch(last)) => {
                    log::debug!("{}: page {} is past the end, loading page {}", E::RESOURCE, query.page, last.page);
                    state.load_page(client, last);
                }
                _ => {}
            }
        });
    }

    pub fn load_stats(&self, client: EntityClient<E>) {
        load_summary(client, self.stats, "stats", |rows, _| E::stat_cards(rows));
    }

    pub fn load_charts(&self, client: EntityClient<E>) {
        load_summary(client, self.charts, "charts", E::charts);
    }

    /// Reloads whatever the controller asks for after a mutation (and on first render).
    pub fn refresh(&self, client: &EntityClient<E>) {
        let Some(plan) = self.list.try_with_untracked(|c| c.after_mutation()) else {
            return;
        };
        self.load_page(client.clone(), plan.page);
        if plan.stats {
            self.load_stats(client.clone());
        }
        if plan.charts {
            self.load_charts(client.clone());
        }
    }
}

fn load_summary<E: Entity, T: Send + Sync + 'static>(
    client: EntityClient<E>,
    slot: RwSignal<LoadSlot<T>>,
    what: &'static str,
    compute: fn(&[E::Row], DateTime<FixedOffset>) -> T,
) {
    let Some(ticket) = slot.try_update(|s| s.begin()) else {
        return;
    };
    spawn_local(async move {
        let applied = match client.list_all(config().summary_page_size).await {
            Ok(items) => {
                let now = local_now();
                let rows: Vec<E::Row> = items.iter().map(|e| e.to_row(now.offset())).collect();
                let data = compute(&rows, now);
                slot.try_update(|s| s.apply(ticket, data))
            }
            Err(e) => {
                log::error!("{}: loading {} failed: {}", E::RESOURCE, what, e);
                slot.try_update(|s| s.fail(ticket, e.user_message()))
            }
        };
        if applied == Some(false) {
            log::warn!("{}: discarded stale {} response", E::RESOURCE, what);
        }
    });
}
