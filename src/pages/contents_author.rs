use std::collections::BTreeMap;

use leptos::{prelude::*, task::spawn_local};
use leptos_router::hooks::use_params_map;
use log::error;

use crate::components::browser::{alert, copy_text};
use crate::components::contents::{ContentMeta, ContentTitle, PostDetailsPanel};
use crate::components::ui::{Button, ButtonVariant};
use crate::ids::export_author_text;
use crate::models::{CommunityContent, PostDetails};
use crate::server_fn::contents::{contents_by_author, fetch_post_details};

fn visible(contents: &[CommunityContent], exclude_qa: bool) -> Vec<CommunityContent> {
    contents
        .iter()
        .filter(|c| !(exclude_qa && c.is_qa()))
        .cloned()
        .collect()
}

#[component]
pub fn AuthorContentsPage() -> impl IntoView {
    let params = use_params_map();
    let author = Memo::new(move |_| {
        params.with(|p| p.get("author")).map(|a| {
            urlencoding::decode(&a)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(a)
        })
    });

    let contents = RwSignal::new(Vec::<CommunityContent>::new());
    let loading = RwSignal::new(true);
    let exclude_qa = RwSignal::new(true);
    let show_details = RwSignal::new(false);
    let details = RwSignal::new(BTreeMap::<i64, PostDetails>::new());
    let loading_details = RwSignal::new(false);
    // the exclude_qa value the loaded details were fetched for
    let details_exclude_qa = RwSignal::new(true);

    Effect::new(move |_| {
        let Some(author) = author.get() else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            match contents_by_author(author).await {
                Ok(rows) => contents.set(rows),
                Err(e) => {
                    error!("Error fetching author contents: {e}");
                    alert("콘텐츠 조회 중 오류가 발생했습니다.");
                }
            }
            loading.set(false);
        });
    });

    let filtered = Memo::new(move |_| contents.with(|c| visible(c, exclude_qa.get())));

    let toggle_details = move |_: web_sys::MouseEvent| {
        if show_details.get_untracked() {
            show_details.set(false);
            return;
        }
        let stale = details_exclude_qa.get_untracked() != exclude_qa.get_untracked();
        if !stale && !details.with_untracked(BTreeMap::is_empty) {
            show_details.set(true);
            return;
        }

        let ids: Vec<i64> = filtered.get_untracked().iter().map(|c| c.id).collect();
        let for_exclude_qa = exclude_qa.get_untracked();
        loading_details.set(true);
        spawn_local(async move {
            match fetch_post_details(ids).await {
                Ok(map) => {
                    details.set(map);
                    details_exclude_qa.set(for_exclude_qa);
                    show_details.set(true);
                }
                Err(e) => {
                    error!("Error fetching post details: {e}");
                    alert("데이터 조회 중 오류가 발생했습니다.");
                }
            }
            loading_details.set(false);
        });
    };

    let copy_all = move |_: web_sys::MouseEvent| {
        let author = author.get_untracked().unwrap_or_default();
        let rows = filtered.get_untracked();
        let text = if show_details.get_untracked() {
            details.with_untracked(|d| export_author_text(&author, &rows, Some(d)))
        } else {
            export_author_text(&author, &rows, None)
        };
        spawn_local(async move {
            match copy_text(&text).await {
                Ok(()) => alert("복사되었습니다!"),
                Err(e) => {
                    error!("clipboard write failed: {e}");
                    alert("복사에 실패했습니다.");
                }
            }
        });
    };

    view! {
        <div class="min-h-screen bg-gray-50">
            <div class="max-w-5xl mx-auto px-4 py-8">
                <a href="/contentslist" class="text-sm text-red-600 hover:underline">
                    "← 전체 목록으로 돌아가기"
                </a>
                <h1 class="text-2xl font-bold text-gray-900 mt-4 mb-6">
                    {move || format!("{}님의 게시글", author.get().unwrap_or_default())}
                </h1>

                <div class="bg-white rounded-xl shadow p-4 mb-6 flex flex-wrap items-center gap-4">
                    <label class="flex items-center gap-2 cursor-pointer text-gray-700">
                        <input
                            type="checkbox"
                            prop:checked=move || exclude_qa.get()
                            on:change=move |ev| exclude_qa.set(event_target_checked(&ev))
                        />
                        <span class="font-medium">"질문게시판 제외"</span>
                    </label>
                    <Button
                        variant=ButtonVariant::Outline
                        disabled=Signal::derive(move || loading_details.get())
                        on_click=toggle_details
                    >
                        {move || {
                            if loading_details.get() {
                                "로딩 중..."
                            } else if show_details.get() {
                                "접기"
                            } else {
                                "불러오기"
                            }
                        }}
                    </Button>
                    <Button on_click=copy_all>"복사하기"</Button>
                </div>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="text-center text-gray-500 py-12">"로딩 중..."</p> }
                >
                    <div class="flex items-center justify-between mb-3 text-sm">
                        <span class="font-medium">"검색 결과"</span>
                        <span class="text-gray-500">
                            {move || {
                                let shown = filtered.with(Vec::len);
                                if exclude_qa.get() {
                                    format!("총 {shown}개 (전체 {}개)", contents.with(Vec::len))
                                } else {
                                    format!("총 {shown}개")
                                }
                            }}
                        </span>
                    </div>
                    <div class="space-y-3">
                        <For
                            each=move || filtered.get()
                            key=|content| content.id
                            children=move |content| {
                                let id = content.id;
                                view! {
                                    <div class="bg-white rounded-xl shadow-sm border border-gray-200 p-4">
                                        <div class="text-xs text-gray-400 mb-1">"제목"</div>
                                        <div class="font-medium mb-2">
                                            <ContentTitle content=content.clone() />
                                        </div>
                                        <ContentMeta content=content />
                                        {move || {
                                            show_details
                                                .get()
                                                .then(|| details.with(|d| d.get(&id).cloned()))
                                                .flatten()
                                                .map(|post| view! { <PostDetailsPanel details=post /> })
                                        }}
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>
        </div>
    }
}
