use contracts::system::auth::Session;
use leptos::prelude::*;

use super::storage;
use crate::shared::api_utils::ApiError;
use crate::shared::date_utils::now_utc;

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub session: Option<Session>,
}

/// Restore session from the token saved by a previous login
fn restore_session() -> Option<Session> {
    let token = storage::get_access_token()?;
    match Session::from_token(token) {
        Ok(session) if !session.is_expired(now_utc()) => Some(session),
        Ok(_) => {
            log::info!("Stored session expired, login required");
            storage::clear_tokens();
            None
        }
        Err(e) => {
            log::warn!("Discarding stored token: {}", e);
            storage::clear_tokens();
            None
        }
    }
}

/// Session context provider component
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let (session_state, set_session_state) = signal(SessionState {
        session: restore_session(),
    });

    provide_context(session_state);
    provide_context(set_session_state);

    children()
}

/// Hook to access session state
pub fn use_session() -> (ReadSignal<SessionState>, WriteSignal<SessionState>) {
    let session_state = use_context::<ReadSignal<SessionState>>()
        .expect("SessionProvider not found in component tree");
    let set_session_state = use_context::<WriteSignal<SessionState>>()
        .expect("SessionProvider not found in component tree");

    (session_state, set_session_state)
}

/// Build a session from a fresh token, persist it and publish it to the context
pub fn start_session(
    access_token: String,
    set_session_state: WriteSignal<SessionState>,
) -> Result<(), String> {
    let session = Session::from_token(access_token).map_err(|e| e.to_string())?;
    storage::save_access_token(&session.access_token);
    log::info!("Logged in with role {:?}", session.role());
    set_session_state.set(SessionState {
        session: Some(session),
    });
    Ok(())
}

/// Forget the token locally; the backend keeps no client session to revoke
pub fn end_session(set_session_state: WriteSignal<SessionState>) {
    storage::clear_tokens();
    set_session_state.set(SessionState::default());
}

/// Log an API error and drop the session when the backend rejected the token
pub fn report_api_error(error: &ApiError, set_session_state: WriteSignal<SessionState>) {
    log::error!("API request failed: {}", error);
    if error.is_session_expired() {
        end_session(set_session_state);
    }
}
