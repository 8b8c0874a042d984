use leptos::prelude::*;

use super::context::use_session;

/// Shows children only to roles that manage payouts (admin, employee).
///
/// The backend still authorizes every request; this only hides the section.
#[component]
pub fn RequirePaymentsAccess(children: ChildrenFn) -> impl IntoView {
    let (session_state, _) = use_session();

    view! {
        <Show
            when=move || {
                session_state
                    .get()
                    .session
                    .as_ref()
                    .map(|s| s.can_manage_payments())
                    .unwrap_or(false)
            }
            fallback=|| view! { <div class="warning-box">"Access denied. Admin or employee role required."</div> }
        >
            {children()}
        </Show>
    }
}
