use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="border-t border-gray-200 py-6 text-center text-sm text-gray-500 space-x-2">
            <span>"스위스 여행 AI"</span>
            <span>"•"</span>
            <span>"스위스 여행 커뮤니티 자료 기반 답변"</span>
            <span>"•"</span>
            <a href="/contentslist" class="font-medium hover:text-red-600">
                "커뮤니티 게시글"
            </a>
        </footer>
    }
}
