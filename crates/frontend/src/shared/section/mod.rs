//! Generic entity section: header, stats, charts, searchable table and modals.

pub mod state;

use self::state::{create_state, SectionState};
use crate::config::config;
use crate::shared::api_client::EntityClient;
use crate::shared::components::bar_chart::{BarChart, BarChartSkeleton};
use crate::shared::components::form_fields::FormFields;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{StatCard, StatCardSkeleton};
use crate::shared::date_utils::local_now;
use crate::shared::export::export_to_excel;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal::{ErrorBanner, Modal};
use contracts::domain::common::{details_of, DisplayRecord, Entity};
use contracts::shared::export::export_filename;
use contracts::shared::form::{prepare_save, FormMode, FormModel, FormValues};
use contracts::shared::list_view::EmptyState;
use contracts::shared::pagination::PageQuery;
use contracts::shared::validation::FieldErrors;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const NOTICE_MS: u32 = 3000;

/// Shows `message` for a few seconds unless another notice replaced it.
fn flash(notice: RwSignal<Option<String>>, message: String) {
    notice.set(Some(message.clone()));
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_MS).await;
        notice.update(|current| {
            if current.as_deref() == Some(message.as_str()) {
                *current = None;
            }
        });
    });
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn EntitySection<E>(
    client: EntityClient<E>,
    /// Shown under the title
    #[prop(into)]
    subtitle: String,
    /// Title; defaults to the capitalised plural
    #[prop(optional, into)]
    title: Option<String>,
) -> impl IntoView
where
    E: Entity,
{
    let state: SectionState<E> = create_state();
    let list = state.list;
    let stats = state.stats;
    let charts = state.charts;
    let client = StoredValue::new(client);
    let title = title.unwrap_or_else(|| {
        let mut chars = E::PLURAL.chars();
        chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect())
            .unwrap_or_default()
    });

    // modals and transient messages
    let detail = RwSignal::new(None::<E::Row>);
    let form_mode = RwSignal::new(None::<FormMode>);
    let form_values = RwSignal::new(FormValues::new());
    let form_errors = RwSignal::new(FieldErrors::new());
    let form_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let exporting = RwSignal::new(false);
    let action_error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let form_fields = <E::Payload as FormModel>::fields();

    state.refresh(&client.get_value());

    let reload_all = move || state.refresh(&client.get_value());

    let on_search = move |term: String| {
        if let Some(Some(query)) = list.try_update(|c| c.set_search(&term)) {
            state.load_page(client.get_value(), query);
        }
    };

    let navigate = move |target: PageQuery| {
        if let Some(Some(query)) = list.try_update(|c| c.navigate(target)) {
            state.load_page(client.get_value(), query);
        }
    };

    let open_create = move || {
        form_values.set(<E::Payload as FormModel>::defaults(local_now()));
        form_errors.set(FieldErrors::new());
        form_error.set(None);
        form_mode.set(Some(FormMode::Create));
    };

    let open_edit = move |id: String| {
        action_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            match client.get(&id).await {
                Ok(entity) => {
                    form_values.set(entity.to_payload().to_form(local_now().offset()));
                    form_errors.set(FieldErrors::new());
                    form_error.set(None);
                    form_mode.set(Some(FormMode::Edit(id)));
                }
                Err(e) => {
                    log::error!("{}: get {} failed: {}", E::RESOURCE, id, e);
                    action_error.set(Some(e.user_message()));
                }
            }
        });
    };

    let close_form = move || {
        if !saving.get_untracked() {
            form_mode.set(None);
        }
    };

    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let Some(mode) = form_mode.get_untracked() else {
            return;
        };
        let values = form_values.get_untracked();
        match prepare_save::<E::Payload>(E::RESOURCE, &mode, &values, local_now()) {
            Err(errors) => {
                log::debug!("{}: form rejected with {} field errors", E::RESOURCE, errors.len());
                form_errors.set(errors);
            }
            Ok((payload, request)) => {
                form_errors.set(FieldErrors::new());
                form_error.set(None);
                saving.set(true);
                let client = client.get_value();
                spawn_local(async move {
                    let result = match &mode {
                        FormMode::Create => client.create(&payload).await,
                        FormMode::Edit(id) => client.update(id, &payload).await,
                    };
                    saving.set(false);
                    match result {
                        Ok(()) => {
                            form_mode.set(None);
                            let done = match mode {
                                FormMode::Create => "cread",
                                FormMode::Edit(_) => "actualizad",
                            };
                            flash(notice, format!("{} {} correctamente", E::SINGULAR, E::GENDER.agree(done, false)));
                            state.refresh(&client);
                        }
                        Err(e) => {
                            log::error!("{}: {} {} failed: {}", E::RESOURCE, request.method.as_str(), request.path, e);
                            form_error.set(Some(e.user_message()));
                        }
                    }
                });
            }
        }
    };

    let delete = move |id: String| {
        if !confirm(&format!("¿Eliminar este registro de {}? Esta acción no se puede deshacer.", E::PLURAL)) {
            return;
        }
        action_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            match client.delete(&id).await {
                Ok(()) => {
                    flash(notice, format!("{} {}", E::SINGULAR, E::GENDER.agree("eliminad", false)));
                    state.refresh(&client);
                }
                Err(e) => {
                    log::error!("{}: delete {} failed: {}", E::RESOURCE, id, e);
                    action_error.set(Some(e.user_message()));
                }
            }
        });
    };

    let export = move || {
        exporting.set(true);
        action_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            let result = client.list_all(config().summary_page_size).await;
            exporting.set(false);
            match result {
                Ok(items) => {
                    let now = local_now();
                    let rows: Vec<E::Row> = items.iter().map(|e| e.to_row(now.offset())).collect();
                    let filename = export_filename(E::RESOURCE, now.date_naive());
                    if let Err(e) = export_to_excel(&rows, &filename) {
                        log::error!("{}: export failed: {}", E::RESOURCE, e);
                        action_error.set(Some("No se pudo generar el archivo.".to_string()));
                    }
                }
                Err(e) => {
                    log::error!("{}: export fetch failed: {}", E::RESOURCE, e);
                    action_error.set(Some(e.user_message()));
                }
            }
        });
    };

    let columns = <E::Row as DisplayRecord>::table_columns();
    let loading = Signal::derive(move || list.with(|c| c.is_loading()));

    view! {
        <div class="page entity-section" data-resource={E::RESOURCE}>
            <PageHeader
                title=title
                subtitle=subtitle
                count=Signal::derive(move || list.with(|c| c.total_items()))
            >
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_create()>
                    {icon("plus")}
                    " Nuevo"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| reload_all()
                    disabled=loading
                >
                    {icon("refresh")}
                    {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| export()
                    disabled=Signal::derive(move || exporting.get())
                >
                    {icon("download")}
                    " Excel"
                </Button>
            </PageHeader>

            {move || notice.get().map(|msg| view! {
                <div class="notice notice--success">{icon("check")}<span>{msg}</span></div>
            })}
            {move || action_error.get().map(|msg| view! { <ErrorBanner message=msg /> })}

            <div class="stat-cards">
                {move || {
                    let (items, pending, error) = stats.with(|s| {
                        (s.data().cloned(), s.is_loading(), s.error().map(str::to_string))
                    });
                    let body = match items {
                        Some(items) => items
                            .into_iter()
                            .map(|item| view! { <StatCard item=item /> })
                            .collect_view()
                            .into_any(),
                        None if pending => (0..4)
                            .map(|_| view! { <StatCardSkeleton /> })
                            .collect_view()
                            .into_any(),
                        None => view! { <></> }.into_any(),
                    };
                    view! {
                        {error.map(|msg| view! { <ErrorBanner message=msg /> })}
                        {body}
                    }
                }}
            </div>

            <div class="charts">
                {move || {
                    let (data, pending, error) = charts.with(|s| {
                        (s.data().cloned(), s.is_loading(), s.error().map(str::to_string))
                    });
                    let body = match data {
                        Some(data) => data
                            .into_iter()
                            .map(|chart| view! { <BarChart chart=chart /> })
                            .collect_view()
                            .into_any(),
                        None if pending => view! { <BarChartSkeleton /> <BarChartSkeleton /> }.into_any(),
                        None => view! { <></> }.into_any(),
                    };
                    view! {
                        {error.map(|msg| view! { <ErrorBanner message=msg /> })}
                        {body}
                    }
                }}
            </div>

            <div class="filter-panel">
                <SearchInput
                    value=Signal::derive(move || list.with(|c| c.search_term().to_string()))
                    on_change=Callback::new(on_search)
                    placeholder=format!("Buscar {}...", E::PLURAL)
                    delay_ms=config().search_debounce_ms
                />
                <PaginationControls
                    pager=Signal::derive(move || list.with(|c| c.pager()))
                    on_navigate=Callback::new(navigate)
                />
            </div>

            {move || list.with(|c| c.error().map(str::to_string)).map(|msg| view! { <ErrorBanner message=msg /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            {columns
                                .clone()
                                .into_iter()
                                .map(|col| view! { <TableHeaderCell>{col}</TableHeaderCell> })
                                .collect_view()}
                            <TableHeaderCell>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || list.with(|c| c.visible_items())
                            key=|row| (row.id().to_string(), row.table_cells())
                            children=move |row: E::Row| {
                                let cells = row.table_cells();
                                let id_edit = row.id().to_string();
                                let id_delete = id_edit.clone();
                                view! {
                                    <TableRow>
                                        {cells
                                            .into_iter()
                                            .map(|cell| view! {
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{cell}</TableCellLayout>
                                                </TableCell>
                                            })
                                            .collect_view()}
                                        <TableCell>
                                            <div class="table__actions">
                                                <button class="button button--icon" title="Ver detalle"
                                                    on:click=move |_| detail.set(Some(row.clone()))>
                                                    {icon("eye")}
                                                </button>
                                                <button class="button button--icon" title="Editar"
                                                    on:click=move |_| open_edit(id_edit.clone())>
                                                    {icon("edit")}
                                                </button>
                                                <button class="button button--icon button--danger" title="Eliminar"
                                                    on:click=move |_| delete(id_delete.clone())>
                                                    {icon("delete")}
                                                </button>
                                            </div>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
                {move || list.with(|c| c.empty_state()).map(|empty| match empty {
                    EmptyState::Loading => view! {
                        <div class="table__placeholder">
                            {(0..5).map(|_| view! { <div class="skeleton skeleton--row"></div> }).collect_view()}
                            <div class="table__empty">{EmptyState::Loading.message(E::PLURAL, E::GENDER)}</div>
                        </div>
                    }.into_any(),
                    other => view! {
                        <div class="table__empty">{other.message(E::PLURAL, E::GENDER)}</div>
                    }.into_any(),
                })}
            </div>

            {move || detail.get().map(|row| {
                let pairs = details_of(&row);
                view! {
                    <Modal
                        title=format!("Detalle de {}", E::SINGULAR)
                        on_close=Callback::new(move |_| detail.set(None))
                    >
                        <dl class="details">
                            {pairs
                                .into_iter()
                                .map(|(label, value)| view! {
                                    <dt class="details__label">{label}</dt>
                                    <dd class="details__value">{value}</dd>
                                })
                                .collect_view()}
                        </dl>
                    </Modal>
                }
            })}

            {move || form_mode.get().map(|mode| {
                let heading = match mode {
                    FormMode::Create => format!("Crear {}", E::SINGULAR),
                    FormMode::Edit(_) => format!("Editar {}", E::SINGULAR),
                };
                view! {
                    <Modal title=heading on_close=Callback::new(move |_| close_form())>
                        {move || form_error.get().map(|msg| view! { <ErrorBanner message=msg /> })}
                        <form class="form" on:submit=move |ev| {
                            ev.prevent_default();
                            submit();
                        }>
                            <FormFields fields=form_fields values=form_values errors=form_errors />
                            <div class="form__actions">
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    button_type=ButtonType::Button
                                    on_click=move |_| close_form()
                                    disabled=Signal::derive(move || saving.get())
                                >
                                    "Cancelar"
                                </Button>
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    button_type=ButtonType::Submit
                                    disabled=Signal::derive(move || saving.get())
                                >
                                    {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                                </Button>
                            </div>
                        </form>
                    </Modal>
                }
            })}
        </div>
    }
}
