use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use crate::system::auth::context::{end_session, use_session};
use leptos::prelude::*;

fn page_icon(page: Page) -> AnyView {
    match page {
        Page::Submissions => icon("documents"),
        Page::Payments => icon("payments"),
    }
}

/// Top bar: section navigation, current role, logout
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (session_state, set_session_state) = use_session();

    let role_label = move || {
        session_state
            .get()
            .session
            .map(|s| String::from(s.claims.role))
            .unwrap_or_default()
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">{"Certification Admin"}</div>
            <nav class="top-header__nav">
                {Page::ALL.into_iter().map(|page| view! {
                    <button
                        class="top-header__nav-item"
                        class:top-header__nav-item--active=move || ctx.active.get() == page
                        on:click=move |_| ctx.activate(page)
                    >
                        {page_icon(page)}
                        <span>{page.title()}</span>
                    </button>
                }).collect_view()}
            </nav>
            <div class="top-header__user">
                <span class="badge">{role_label}</span>
                <button class="button button--icon" title="Logout" on:click=move |_| end_session(set_session_state)>
                    {icon("logout")}
                </button>
            </div>
        </header>
    }
}
