use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::chat::ChatInterface;

#[component]
pub fn ChatPage() -> impl IntoView {
    let query = use_query_map();
    let initial_question = query.with_untracked(|params| params.get("q")).unwrap_or_default();

    view! { <ChatInterface initial_question=initial_question /> }
}
