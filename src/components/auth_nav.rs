use leptos::prelude::*;

use crate::auth::{context::use_admin, LogoutButton};

#[component]
pub fn AuthNav() -> impl IntoView {
    let admin = use_admin();
    let is_admin = move || admin.map(|a| a.is_admin.get()).unwrap_or(false);

    view! {
        <header class="sticky top-0 z-20 bg-white/90 backdrop-blur border-b border-gray-200">
            <nav class="max-w-6xl mx-auto flex items-center justify-between h-16 px-4">
                <a href="/" class="flex items-center gap-2 font-bold text-gray-900">
                    <span class="text-xl">"🇨🇭"</span>
                    <span>"스위스 여행 AI"</span>
                </a>
                <div class="flex items-center gap-4 text-sm text-gray-600">
                    <a href="/chat" class="hover:text-red-600">"채팅"</a>
                    <a href="/contentslist" class="hover:text-red-600">"커뮤니티"</a>
                    <a href="/contents_multi" class="hover:text-red-600">"게시글 모음"</a>
                    <Show
                        when=is_admin
                        fallback=|| view! { <a href="/admin" class="hover:text-red-600">"관리자"</a> }
                    >
                        <a href="/admin" class="font-medium text-red-600">"대시보드"</a>
                        <LogoutButton />
                    </Show>
                </div>
            </nav>
        </header>
    }
}
