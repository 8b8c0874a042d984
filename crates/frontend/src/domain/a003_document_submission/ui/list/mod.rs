use crate::domain::a001_category::api::fetch_categories;
use crate::domain::a002_subcategory::api::fetch_subcategories;
use crate::domain::a003_document_submission::api::{
    delete_submission, fetch_submissions, upload_document,
};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::request_seq::RequestSeq;
use crate::system::auth::context::{report_api_error, use_session};
use contracts::domain::a003_document_submission::aggregate::{
    DocumentSubmission, DocumentSubmissionQuery, DocumentUpload,
};
use contracts::shared::grouping::{partition_by_category, GroupKey};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct SubmissionRow {
    pub id: String,
    pub applicant: String,
    pub status: String,
    pub created_at: String,
}

impl From<&DocumentSubmission> for SubmissionRow {
    fn from(s: &DocumentSubmission) -> Self {
        Self {
            id: s.id.as_string(),
            applicant: s.applicant_name(),
            status: s.status_label(),
            created_at: format_datetime(s.created_at.as_ref()),
        }
    }
}

const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("", "All statuses"),
    ("pending", "Pending"),
    ("approved", "Approved"),
    ("rejected", "Rejected"),
];

/// Open/closed state key of a section; `None` is the Uncategorized section
type SectionKey = Option<GroupKey>;

fn rows_table(
    rows: Vec<SubmissionRow>,
    on_delete: Callback<String>,
    on_upload: Callback<String>,
) -> AnyView {
    view! {
        <div class="table">
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell">{"ID"}</th>
                        <th class="table__header-cell">{"Applicant"}</th>
                        <th class="table__header-cell">{"Status"}</th>
                        <th class="table__header-cell">{"Submitted"}</th>
                        <th class="table__header-cell"></th>
                    </tr>
                </thead>
                <tbody>
                    {rows.into_iter().map(|row| {
                        let id_for_delete = row.id.clone();
                        let id_for_upload = row.id.clone();
                        view! {
                            <tr class="table__row">
                                <td class="table__cell">{row.id}</td>
                                <td class="table__cell">{row.applicant}</td>
                                <td class="table__cell">{row.status}</td>
                                <td class="table__cell">{row.created_at}</td>
                                <td class="table__cell table__cell--actions">
                                    <button class="button button--icon" title="Upload document"
                                        on:click=move |_| on_upload.run(id_for_upload.clone())>
                                        {icon("upload")}
                                    </button>
                                    <button class="button button--icon" title="Delete"
                                        on:click=move |_| on_delete.run(id_for_delete.clone())>
                                        {icon("delete")}
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_any()
}

#[component]
#[allow(non_snake_case)]
pub fn DocumentSubmissionList() -> impl IntoView {
    let (session_state, set_session_state) = use_session();

    let submissions = RwSignal::new(Vec::<DocumentSubmission>::new());
    let error = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);
    let status_filter = RwSignal::new(String::new());
    let expanded = RwSignal::new(HashSet::<SectionKey>::new());
    let request_seq = StoredValue::new(RequestSeq::default());

    let upload_target = RwSignal::new(Option::<String>::None);
    let upload_document_id = RwSignal::new(String::new());
    let upload_remarks = RwSignal::new(String::new());
    let file_input: NodeRef<leptos::html::Input> = NodeRef::new();

    let fetch = move || {
        let Some(session) = session_state.get_untracked().session else {
            return;
        };
        let status = status_filter.get_untracked();
        let query = DocumentSubmissionQuery {
            status: (!status.is_empty()).then_some(status),
        };
        let mut ticket = 0;
        request_seq.update_value(|seq| ticket = seq.next());
        is_loading.set(true);

        spawn_local(async move {
            let result = fetch_submissions(&query, &session).await;
            if !request_seq.with_value(|seq| seq.is_current(ticket)) {
                log::debug!("Dropping stale submissions response #{}", ticket);
                return;
            }
            match result {
                Ok(list) => {
                    // Справочники нужны только для названий секций; без них покажем id
                    let categories = fetch_categories(&session).await.unwrap_or_else(|e| {
                        log::warn!("Categories not loaded: {}", e);
                        Vec::new()
                    });
                    let subcategories = fetch_subcategories(&session).await.unwrap_or_else(|e| {
                        log::warn!("Subcategories not loaded: {}", e);
                        Vec::new()
                    });
                    if !request_seq.with_value(|seq| seq.is_current(ticket)) {
                        return;
                    }
                    let list: Vec<DocumentSubmission> = list
                        .into_iter()
                        .map(|s| s.with_names(&categories, &subcategories))
                        .collect();
                    log::debug!("Loaded {} document submissions", list.len());
                    submissions.set(list);
                    error.set(None);
                }
                Err(e) => {
                    report_api_error(&e, set_session_state);
                    error.set(Some(e.to_string()));
                }
            }
            is_loading.set(false);
        });
    };

    let toggle_section = move |key: SectionKey| {
        expanded.update(|set| {
            if !set.remove(&key) {
                set.insert(key);
            }
        });
    };

    let expand_all = move || {
        let current = submissions.get_untracked();
        let grouping = partition_by_category(&current);
        let mut keys: HashSet<SectionKey> =
            grouping.groups.iter().map(|g| Some(g.key())).collect();
        if !grouping.ungrouped.is_empty() {
            keys.insert(None);
        }
        expanded.set(keys);
    };

    let on_delete = Callback::new(move |id: String| {
        if id.is_empty() {
            return;
        }
        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Delete submission #{}?", id))
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
            match delete_submission(&id, &session).await {
                Ok(()) => {
                    submissions.update(|list| list.retain(|s| s.id.as_string() != id));
                }
                Err(e) => {
                    report_api_error(&e, set_session_state);
                    error.set(Some(format!("Delete failed: {}", e)));
                }
            }
        });
    });

    let on_upload = Callback::new(move |id: String| {
        if id.is_empty() {
            return;
        }
        upload_document_id.set(String::new());
        upload_remarks.set(String::new());
        upload_target.set(Some(id));
    });

    let submit_upload = move |_| {
        let Some(submission_id) = upload_target.get_untracked() else {
            return;
        };
        let Some(session) = session_state.get_untracked().session else {
            return;
        };
        let upload = DocumentUpload {
            submission_id,
            document_id: upload_document_id.get_untracked(),
            remarks: Some(upload_remarks.get_untracked()),
        };
        let file = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            error.set(Some("Choose a file to upload".to_string()));
            return;
        };

        spawn_local(async move {
            match upload_document(&upload, &file, &session).await {
                Ok(()) => {
                    log::info!("Uploaded {} for submission {}", file.name(), upload.submission_id);
                    upload_target.set(None);
                    error.set(None);
                }
                Err(e) => {
                    report_api_error(&e, set_session_state);
                    error.set(Some(format!("Upload failed: {}", e)));
                }
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Document submissions"}</h1>
                </div>
                <div class="header__actions">
                    <select
                        class="select"
                        on:change=move |ev| {
                            status_filter.set(event_target_value(&ev));
                            fetch();
                        }
                    >
                        {STATUS_OPTIONS.iter().map(|(value, label)| view! {
                            <option value=*value selected=move || status_filter.get() == *value>{*label}</option>
                        }).collect_view()}
                    </select>
                    <button class="button button--secondary" on:click=move |_| expand_all()>
                        {"Expand all"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| expanded.set(HashSet::new())>
                        {"Collapse all"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch() disabled=move || is_loading.get()>
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

            {move || upload_target.get().map(|id| view! {
                <div class="card upload-panel">
                    <h3>{format!("Upload document for submission #{}", id)}</h3>
                    <div class="form-group">
                        <label>"Document ID"</label>
                        <input
                            type="text"
                            prop:value=move || upload_document_id.get()
                            on:input=move |ev| upload_document_id.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label>"Remarks"</label>
                        <input
                            type="text"
                            prop:value=move || upload_remarks.get()
                            on:input=move |ev| upload_remarks.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <input type="file" node_ref=file_input />
                    </div>
                    <div class="upload-panel__actions">
                        <button class="button button--primary" on:click=submit_upload>
                            {icon("upload")}
                            {"Upload"}
                        </button>
                        <button class="button button--secondary" on:click=move |_| upload_target.set(None)>
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            })}

            {move || {
                let grouping = partition_by_category(submissions.get());
                if grouping.groups.is_empty() && grouping.ungrouped.is_empty() {
                    return view! { <div class="empty-state">{"No submissions"}</div> }.into_any();
                }

                let mut sections: Vec<(SectionKey, String, Vec<SubmissionRow>)> = grouping
                    .groups
                    .iter()
                    .map(|g| {
                        let rows = g.members.iter().map(SubmissionRow::from).collect();
                        (Some(g.key()), g.title(), rows)
                    })
                    .collect();
                if !grouping.ungrouped.is_empty() {
                    let rows = grouping.ungrouped.iter().map(SubmissionRow::from).collect();
                    sections.push((None, "Uncategorized".to_string(), rows));
                }

                sections.into_iter().map(|(key, title, rows)| {
                    let count = rows.len();
                    let key_for_toggle = key.clone();
                    let key_for_icon = key.clone();
                    view! {
                        <div class="group-section">
                            <div class="group-section__header" on:click=move |_| toggle_section(key_for_toggle.clone())>
                                {move || if expanded.get().contains(&key_for_icon) {
                                    icon("chevron-down")
                                } else {
                                    icon("chevron-right")
                                }}
                                <span class="group-section__title">{title}</span>
                                <span class="badge">{count}</span>
                            </div>
                            {move || expanded.get().contains(&key).then(|| rows_table(rows.clone(), on_delete, on_upload))}
                        </div>
                    }
                }).collect_view().into_any()
            }}
        </div>
    }
}
