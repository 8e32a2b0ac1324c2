use leptos::{prelude::*, task::spawn_local};
use log::error;

use crate::components::messagelist::MessageList;
use crate::models::ChatMessage;
use crate::server_fn::chat::ask_question;
use crate::utils::MAX_MESSAGE_CHARS;

/// The handed-over question to ask on mount, if it has any text.
fn pending_question(initial_question: &str) -> Option<String> {
    let question = initial_question.trim();
    (!question.is_empty()).then(|| question.to_string())
}

#[component]
pub fn ChatInterface(#[prop(optional, into)] initial_question: String) -> impl IntoView {
    let (messages, set_messages) = signal(vec![ChatMessage::welcome()]);
    let (is_loading, set_is_loading) = signal(false);

    let send = Callback::new(move |text: String| {
        let text = text.trim().to_string();
        if text.is_empty() || is_loading.get_untracked() {
            return;
        }

        set_messages.update(|msgs| msgs.push(ChatMessage::user(text.clone())));
        set_is_loading.set(true);

        spawn_local(async move {
            let reply = match ask_question(text).await {
                Ok(answer) => ChatMessage::assistant(answer),
                Err(e) => {
                    error!("chat request failed: {e}");
                    ChatMessage::failure()
                }
            };
            set_messages.update(|msgs| msgs.push(reply));
            set_is_loading.set(false);
        });
    });

    // a question handed over from the landing page is asked once on mount
    Effect::new(move |asked: Option<bool>| {
        if asked.unwrap_or(false) {
            return true;
        }
        if let Some(question) = pending_question(&initial_question) {
            send.run(question);
        }
        true
    });

    view! {
        <div class="flex flex-col h-[calc(100vh-4rem)] max-w-4xl mx-auto w-full">
            <MessageList messages=messages is_loading=is_loading />
            <InputBox on_send=send is_loading=is_loading />
        </div>
    }
}

#[component]
pub fn InputBox(
    #[prop(into)] on_send: Callback<String>,
    is_loading: ReadSignal<bool>,
) -> impl IntoView {
    let (message, set_message) = signal(String::new());

    let submit = move || {
        let text = message.get_untracked();
        if text.trim().is_empty() || is_loading.get_untracked() {
            return;
        }
        on_send.run(text);
        set_message.set(String::new());
    };

    view! {
        <div class="border-t border-gray-200 bg-white px-4 py-3">
            <div class="flex items-end gap-3">
                <div class="flex-1">
                    <textarea
                        class="w-full resize-none rounded-xl border border-gray-300 px-4 py-3 text-gray-800
                        focus:border-red-500 focus:outline-none focus:ring-2 focus:ring-red-500/20
                        disabled:bg-gray-100 min-h-[3rem] max-h-32"
                        rows="1"
                        placeholder="스위스 여행에 대해 궁금한 점을 물어보세요..."
                        maxlength=MAX_MESSAGE_CHARS.to_string()
                        prop:value=move || message.get()
                        disabled=move || is_loading.get()
                        on:input=move |event| set_message.set(event_target_value(&event))
                        on:keydown=move |event| {
                            if event.key() == "Enter" && !event.shift_key() {
                                event.prevent_default();
                                submit();
                            }
                        }
                    ></textarea>
                    <div class="flex justify-between text-xs text-gray-400 mt-1 px-1">
                        <span>"Enter로 전송, Shift+Enter로 줄바꿈"</span>
                        <span>
                            {move || format!("{}/{}", message.get().chars().count(), MAX_MESSAGE_CHARS)}
                        </span>
                    </div>
                </div>
                <button
                    class="mb-6 px-5 py-3 rounded-xl font-medium text-white bg-red-600 hover:bg-red-700
                    transition-colors disabled:opacity-50 disabled:cursor-not-allowed"
                    disabled=move || is_loading.get() || message.get().trim().is_empty()
                    on:click=move |_| submit()
                >
                    {move || if is_loading.get() { "전송중" } else { "전송" }}
                </button>
            </div>
        </div>
    }
}
