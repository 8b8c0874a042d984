use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Sections of the admin console
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Submissions,
    Payments,
}

impl Page {
    pub fn key(&self) -> &'static str {
        match self {
            Page::Submissions => "submissions",
            Page::Payments => "payments",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Submissions => "Submissions",
            Page::Payments => "Payments",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        match key {
            "submissions" => Some(Page::Submissions),
            "payments" => Some(Page::Payments),
            _ => None,
        }
    }

    pub const ALL: [Page; 2] = [Page::Submissions, Page::Payments];
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::Submissions),
        }
    }

    /// Restore the active page from `?active=` and keep the URL in sync
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(page) = params.get("active").and_then(|k| Page::from_key(k)) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let page = this.active.get();
            let query_string = serde_qs::to_string(&HashMap::from([(
                "active".to_string(),
                page.key().to_string(),
            )]))
            .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn activate(&self, page: Page) {
        log::debug!("activate page '{}'", page.key());
        self.active.set(page);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_key(page.key()), Some(page));
        }
        assert_eq!(Page::from_key("unknown"), None);
    }
}
