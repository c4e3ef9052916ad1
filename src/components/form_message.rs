use leptos::prelude::*;

/// Outcome text shown under a form
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Notice {
    #[default]
    None,
    Success(String),
    Error(String),
}

impl From<Result<String, String>> for Notice {
    fn from(result: Result<String, String>) -> Self {
        match result {
            Ok(message) => Notice::Success(message),
            Err(message) => Notice::Error(message),
        }
    }
}

#[component]
pub fn FormMessage(notice: ReadSignal<Notice>) -> impl IntoView {
    move || match notice.get() {
        Notice::None => ().into_any(),
        Notice::Success(text) => view! { <p class="form-message success">{text}</p> }.into_any(),
        Notice::Error(text) => view! { <p class="form-message error" role="alert">{text}</p> }.into_any(),
    }
}
