//! Sidebar with collapsible menu groups, one item per section

use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<Section>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "lodging",
            label: "Alojamiento",
            icon: "building",
            items: vec![Section::Hotels, Section::Photos],
        },
        MenuGroup {
            id: "commercial",
            label: "Comercial",
            icon: "briefcase",
            items: vec![Section::Wholesalers, Section::Services],
        },
        MenuGroup {
            id: "operations",
            label: "Operación",
            icon: "navigation",
            items: vec![Section::Routes, Section::Trips, Section::DateRestrictions],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let groups = get_menu_groups();
    let expanded_groups = RwSignal::new(groups.iter().map(|g| g.id).collect::<Vec<_>>());

    view! {
        <div class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let gid = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                expanded_groups.update(|items| {
                                    if let Some(pos) = items.iter().position(|x| *x == gid) {
                                        items.remove(pos);
                                    } else {
                                        items.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.with(|g| g.contains(&gid))
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.with(|g| g.contains(&gid))>
                            <div class="app-sidebar__children">
                                {group.items.iter().map(|&section| view! {
                                    <div
                                        class="app-sidebar__item"
                                        class:app-sidebar__item--active=move || ctx.active.get() == section
                                        style:padding-left="10px"
                                        on:click=move |_| ctx.open(section)
                                    >
                                        <div class="app-sidebar__item-content">
                                            {icon(section.icon())}
                                            <span>{section.label()}</span>
                                        </div>
                                    </div>
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_is_in_exactly_one_group() {
        let groups = get_menu_groups();
        for section in Section::ALL {
            let count = groups
                .iter()
                .filter(|g| g.items.contains(&section))
                .count();
            assert_eq!(count, 1, "{:?}", section);
        }
    }
}
