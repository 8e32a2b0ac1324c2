use leptos::prelude::*;

use crate::components::markdown::MarkdownRenderer;
use crate::models::{ChatMessage, Role, SourceDescriptor};
use crate::utils::{file_name_from_path, format_similarity, format_timestamp};

#[component]
pub fn MessageList(
    messages: ReadSignal<Vec<ChatMessage>>,
    is_loading: ReadSignal<bool>,
) -> impl IntoView {
    let end_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move |_| {
        messages.track();
        is_loading.track();
        if let Some(end) = end_ref.get() {
            end.scroll_into_view();
        }
    });

    view! {
        <div class="flex-1 overflow-y-auto px-4 py-6 space-y-4">
            <For
                each=move || messages.get()
                key=|message| message.id.clone()
                children=|message| view! { <MessageBubble message=message /> }
            />
            <Show when=move || is_loading.get()>
                <LoadingIndicator />
            </Show>
            <div node_ref=end_ref></div>
        </div>
    }
}

#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let is_user = message.role == Role::User;
    let timestamp = format_timestamp(&message.timestamp);

    let bubble_class = if is_user {
        "bg-red-600 text-white rounded-2xl rounded-br-sm"
    } else if message.is_error {
        "bg-red-50 text-red-800 border border-red-200 rounded-2xl rounded-bl-sm"
    } else {
        "bg-white text-gray-800 border border-gray-200 rounded-2xl rounded-bl-sm shadow-sm"
    };

    let content = if is_user || message.is_error {
        view! { <p class="whitespace-pre-wrap leading-relaxed">{message.content}</p> }.into_any()
    } else {
        view! { <MarkdownRenderer content=message.content /> }.into_any()
    };

    let sources = message.sources;

    view! {
        <div class=if is_user { "flex justify-end" } else { "flex justify-start" }>
            <div class="max-w-[85%] md:max-w-[70%]">
                <div class=format!("px-4 py-3 {}", bubble_class)>
                    {(!is_user)
                        .then(|| {
                            view! {
                                <div class="flex items-center gap-2 mb-2 text-xs font-semibold text-gray-500">
                                    <span>"🤖"</span>
                                    <span>"AI 도우미"</span>
                                </div>
                            }
                        })}
                    {content}
                </div>
                {(!sources.is_empty())
                    .then(|| {
                        view! {
                            <div class="mt-2 space-y-2">
                                <p class="text-xs font-medium text-gray-500">"📚 참고 자료"</p>
                                {sources
                                    .into_iter()
                                    .map(|source| view! { <SourceCard source=source /> })
                                    .collect_view()}
                            </div>
                        }
                    })}
                <p class=if is_user {
                    "mt-1 text-xs text-gray-400 text-right"
                } else {
                    "mt-1 text-xs text-gray-400"
                }>{timestamp}</p>
            </div>
        </div>
    }
}

#[component]
pub fn SourceCard(source: SourceDescriptor) -> impl IntoView {
    let file_name = file_name_from_path(&source.file_name).to_string();
    let heading = if source.title.trim().is_empty() {
        file_name.clone()
    } else {
        source.title.clone()
    };

    view! {
        <div class="bg-gray-50 border border-gray-200 rounded-lg px-3 py-2 text-sm">
            <div class="flex items-start justify-between gap-2">
                <p class="font-medium text-gray-800">"📄 " {heading}</p>
                <span class="shrink-0 text-xs font-semibold text-green-700 bg-green-50 px-2 py-0.5 rounded-full">
                    {format!("{} 일치", format_similarity(source.similarity))}
                </span>
            </div>
            {source
                .section_title
                .filter(|section| !section.trim().is_empty())
                .map(|section| {
                    view! { <p class="text-xs text-gray-600 mt-1">{format!("섹션: {section}")}</p> }
                })}
            <p class="text-xs text-gray-400 mt-1">{format!("출처: {file_name}")}</p>
        </div>
    }
}

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="flex justify-start">
            <div class="bg-white border border-gray-200 rounded-2xl rounded-bl-sm px-4 py-3 shadow-sm">
                <div class="flex items-center gap-3 text-sm text-gray-500">
                    <span>"🤖"</span>
                    <span>"AI가 답변을 생각하고 있어요"</span>
                    <div class="loading-dots text-red-500">
                        <div></div>
                        <div></div>
                        <div></div>
                    </div>
                </div>
            </div>
        </div>
    }
}
