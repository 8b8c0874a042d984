use crate::domain::a003_document_submission::ui::list::DocumentSubmissionList;
use crate::domain::a004_payment_request::ui::list::PaymentRequestList;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::layout::header::Header;
use crate::system::auth::context::use_session;
use crate::system::auth::guard::RequirePaymentsAccess;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    view! {
        <div class="app-layout">
            <Header />
            <main class="app-layout__content">
                {move || match ctx.active.get() {
                    Page::Submissions => view! { <DocumentSubmissionList /> }.into_any(),
                    Page::Payments => view! {
                        <RequirePaymentsAccess>
                            <PaymentRequestList />
                        </RequirePaymentsAccess>
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (session_state, _) = use_session();

    view! {
        <Show
            when=move || session_state.get().session.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
