use crate::domain::a004_payment_request::api::{delete_payment_request, fetch_payment_requests};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::number_format::format_amount;
use crate::system::auth::context::{report_api_error, use_session};
use contracts::domain::a004_payment_request::aggregate::PaymentRequest;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Debug)]
pub struct PaymentRequestRow {
    pub id: String,
    pub requester: String,
    pub account_holder: String,
    pub account: String,
    pub ifsc: String,
    pub amount: String,
    pub status: String,
    pub is_pending: bool,
    pub created_at: String,
}

impl From<PaymentRequest> for PaymentRequestRow {
    fn from(p: PaymentRequest) -> Self {
        Self {
            id: p.id.as_string(),
            account: p.masked_account(),
            amount: format_amount(p.amount),
            is_pending: p.is_pending(),
            created_at: format_datetime(p.created_at.as_ref()),
            requester: p.requester_name.unwrap_or_else(|| "-".to_string()),
            account_holder: p.account_holder.unwrap_or_else(|| "-".to_string()),
            ifsc: p.ifsc_code.unwrap_or_else(|| "-".to_string()),
            status: p.status.unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn PaymentRequestList() -> impl IntoView {
    let (session_state, set_session_state) = use_session();
    let (items, set_items) = signal::<Vec<PaymentRequestRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let fetch = move || {
        let Some(session) = session_state.get_untracked().session else {
            return;
        };
        spawn_local(async move {
            match fetch_payment_requests(&session).await {
                Ok(v) => {
                    let rows: Vec<PaymentRequestRow> = v.into_iter().map(Into::into).collect();
                    set_items.set(rows);
                    set_error.set(None);
                }
                Err(e) => {
                    report_api_error(&e, set_session_state);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let delete_row = move |id: String| {
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Delete payment request #{}?", id))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let Some(session) = session_state.get_untracked().session else {
            return;
        };

        spawn_local(async move {
            match delete_payment_request(&id, &session).await {
                Ok(()) => set_items.update(|rows| rows.retain(|r| r.id != id)),
                Err(e) => {
                    report_api_error(&e, set_session_state);
                    set_error.set(Some(format!("Delete failed: {}", e)));
                }
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Payment requests"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"ID"}</th>
                            <th class="table__header-cell">{"Requested by"}</th>
                            <th class="table__header-cell">{"Account holder"}</th>
                            <th class="table__header-cell">{"Account"}</th>
                            <th class="table__header-cell">{"IFSC"}</th>
                            <th class="table__header-cell table__header-cell--right">{"Amount"}</th>
                            <th class="table__header-cell">{"Status"}</th>
                            <th class="table__header-cell">{"Created"}</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().into_iter().map(|row| {
                            let id_for_delete = row.id.clone();
                            view! {
                                <tr class="table__row" class:table__row--pending=row.is_pending>
                                    <td class="table__cell">{row.id}</td>
                                    <td class="table__cell">{row.requester}</td>
                                    <td class="table__cell">{row.account_holder}</td>
                                    <td class="table__cell table__cell--mono">{row.account}</td>
                                    <td class="table__cell">{row.ifsc}</td>
                                    <td class="table__cell table__cell--right">{row.amount}</td>
                                    <td class="table__cell">{row.status}</td>
                                    <td class="table__cell">{row.created_at}</td>
                                    <td class="table__cell table__cell--actions">
                                        <button class="button button--icon" title="Delete"
                                            on:click=move |_| delete_row(id_for_delete.clone())>
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
