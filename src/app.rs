use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path, StaticSegment,
};

use crate::auth::context::AdminProvider;
use crate::components::auth_nav::AuthNav;
use crate::components::footer::Footer;
use crate::pages::{
    AdminPage, AuthorContentsPage, ChatPage, ContentsListPage, ContentsMultiPage, HomePage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ko">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name="description" content="스위스 여행 정보를 AI가 친절하게 답변해드립니다" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body class="bg-gray-50 text-gray-900">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/swisstravel.css" />
        <Title text="스위스 여행 AI 도우미" />
        <AdminProvider>
            <Router>
                <AuthNav />
                <main class="min-h-[calc(100vh-8rem)]">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=StaticSegment("") view=HomePage />
                        <Route path=path!("chat") view=ChatPage />
                        <Route path=path!("admin") view=AdminPage />
                        <Route path=path!("contentslist") view=ContentsListPage />
                        <Route path=path!("contents/:author") view=AuthorContentsPage />
                        <Route path=path!("contents_multi") view=ContentsMultiPage />
                    </Routes>
                </main>
                <Footer />
            </Router>
        </AdminProvider>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="max-w-xl mx-auto py-24 text-center">
            <p class="text-5xl mb-4">"🏔️"</p>
            <p class="text-gray-600 mb-6">"페이지를 찾을 수 없습니다."</p>
            <a href="/" class="text-red-600 hover:underline">"메인으로 돌아가기"</a>
        </div>
    }
}
