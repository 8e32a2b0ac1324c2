use std::collections::BTreeMap;

use leptos::{prelude::*, task::spawn_local};
use log::error;
use wasm_bindgen::JsCast;

use crate::components::browser::{alert, confirm, copy_text, download_text, read_selected_file, today};
use crate::components::contents::{AuthorLink, ContentMeta, ContentTitle, PostDetailsPanel};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::ids::{export_markdown, export_text, merge_ids, storage, to_csv, IdMerge};
use crate::models::{CommunityContent, PostDetails};
use crate::server_fn::contents::{contents_by_ids, fetch_post_details};

fn lookup_summary(requested: usize, found: usize) -> String {
    if found == 0 {
        "조회된 결과가 없습니다.".to_string()
    } else {
        format!("{requested}개 중 {found}개의 콘텐츠를 찾았습니다.")
    }
}

#[component]
pub fn ContentsMultiPage() -> impl IntoView {
    let id_input = RwSignal::new(String::new());
    let id_list = RwSignal::new(Vec::<i64>::new());
    let contents = RwSignal::new(Vec::<CommunityContent>::new());
    let loading = RwSignal::new(false);
    let show_details = RwSignal::new(false);
    let details = RwSignal::new(BTreeMap::<i64, PostDetails>::new());
    let loading_details = RwSignal::new(false);

    // restore once on the client, then mirror every change back
    Effect::new(move |restored: Option<()>| {
        if restored.is_none() {
            id_list.set(storage::load());
        } else {
            id_list.with(|ids| storage::save(ids));
        }
        id_list.track();
    });

    let apply_merge = move |merge: IdMerge, summary: Option<String>, empty_message: &str| {
        match summary {
            None => alert(empty_message),
            Some(message) => {
                if !merge.added.is_empty() {
                    id_list.update(|ids| ids.extend(merge.added.iter().copied()));
                }
                alert(&message);
            }
        }
    };

    let add_ids = move |_: web_sys::MouseEvent| {
        let merge = id_list.with_untracked(|ids| merge_ids(ids, &id_input.get_untracked()));
        let summary = merge.summary();
        if !merge.added.is_empty() {
            id_input.set(String::new());
        }
        apply_merge(merge, summary, "유효한 ID 또는 URL을 입력해주세요.");
    };

    let remove_id = move |id: i64| {
        id_list.update(|ids| ids.retain(|&existing| existing != id));
        if id_list.with_untracked(Vec::is_empty) {
            storage::clear();
        }
    };

    let clear_all = move |_: web_sys::MouseEvent| {
        if confirm("모든 ID를 삭제하시겠습니까?") {
            id_list.set(Vec::new());
            storage::clear();
        }
    };

    let save_csv = move |_: web_sys::MouseEvent| {
        let ids = id_list.get_untracked();
        if ids.is_empty() {
            alert("저장할 ID가 없습니다.");
            return;
        }
        let file_name = format!("contents_ids_{}.csv", today());
        if let Err(e) = download_text(&file_name, "text/csv", &to_csv(&ids)) {
            error!("csv download failed: {e}");
        }
    };

    let load_csv = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        spawn_local(async move {
            match read_selected_file(&input).await {
                Ok(Some(text)) => {
                    let merge = id_list.with_untracked(|ids| merge_ids(ids, &text));
                    let summary = merge.csv_summary();
                    apply_merge(merge, summary, "CSV 파일에서 유효한 ID를 찾을 수 없습니다.");
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Error reading file: {e}");
                    alert("파일 읽기 중 오류가 발생했습니다.");
                }
            }
            // the same file can be picked again
            input.set_value("");
        });
    };

    let fetch = move |_: web_sys::MouseEvent| {
        let ids = id_list.get_untracked();
        if ids.is_empty() {
            alert("입력하기 버튼을 눌러 ID를 먼저 추가해주세요.");
            return;
        }
        loading.set(true);
        show_details.set(false);
        details.set(BTreeMap::new());
        spawn_local(async move {
            match contents_by_ids(ids.clone()).await {
                Ok(rows) => {
                    alert(&lookup_summary(ids.len(), rows.len()));
                    contents.set(rows);
                }
                Err(e) => {
                    error!("Error fetching contents: {e}");
                    alert("콘텐츠 조회 중 오류가 발생했습니다.");
                }
            }
            loading.set(false);
        });
    };

    let toggle_details = move |_: web_sys::MouseEvent| {
        if show_details.get_untracked() {
            show_details.set(false);
            return;
        }
        if !details.with_untracked(BTreeMap::is_empty) {
            show_details.set(true);
            return;
        }
        let ids: Vec<i64> = contents.with_untracked(|rows| rows.iter().map(|c| c.id).collect());
        loading_details.set(true);
        spawn_local(async move {
            match fetch_post_details(ids).await {
                Ok(map) => {
                    details.set(map);
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
        let text = contents.with_untracked(|rows| {
            if show_details.get_untracked() {
                details.with_untracked(|d| export_text(rows, Some(d)))
            } else {
                export_text(rows, None)
            }
        });
        spawn_local(async move {
            match copy_text(&text).await {
                Ok(()) => alert("복사되었습니다!"),
                Err(e) => {
                    error!("Copy failed: {e}");
                    alert("복사에 실패했습니다.");
                }
            }
        });
    };

    let download_markdown = move |_: web_sys::MouseEvent| {
        if contents.with_untracked(Vec::is_empty) {
            alert("다운로드할 콘텐츠가 없습니다.");
            return;
        }
        let markdown = contents.with_untracked(|rows| {
            if show_details.get_untracked() {
                details.with_untracked(|d| export_markdown(rows, Some(d)))
            } else {
                export_markdown(rows, None)
            }
        });
        let file_name = format!("contents_{}.md", today());
        if let Err(e) = download_text(&file_name, "text/markdown", &markdown) {
            error!("markdown download failed: {e}");
        }
    };

    view! {
        <div class="min-h-screen bg-gray-50">
            <div class="max-w-5xl mx-auto px-4 py-8 space-y-6">
                <h1 class="text-2xl font-bold text-gray-900">"ID로 콘텐츠 조회"</h1>

                <div class="bg-white rounded-xl shadow p-6">
                    <h2 class="text-lg font-semibold mb-4">"ID 또는 URL 입력"</h2>
                    <label class="block text-sm text-gray-600 mb-2">
                        "콘텐츠 ID 또는 URL (쉼표 또는 줄바꿈으로 구분)"
                    </label>
                    <textarea
                        class="w-full h-32 px-3 py-2 border rounded-lg font-mono text-sm focus:outline-none focus:ring-2 focus:ring-red-500/20"
                        placeholder="예시:\n67838\nhttps://cafe.naver.com/swissfriends/67838\nhttps://cafe.naver.com/swissfriends/67838?art=xxx"
                        prop:value=move || id_input.get()
                        on:input=move |ev| id_input.set(event_target_value(&ev))
                    ></textarea>
                    <div class="flex flex-wrap gap-2 mt-3">
                        <Button on_click=add_ids>"입력하기"</Button>
                        <Button variant=ButtonVariant::Outline on_click=save_csv>
                            "저장하기"
                        </Button>
                        <label class="px-4 py-2 rounded-lg border hover:bg-gray-50 cursor-pointer">
                            "불러오기"
                            <input
                                type="file"
                                accept=".csv,.txt"
                                class="hidden"
                                on:change=load_csv
                            />
                        </label>
                    </div>
                </div>

                <Show when=move || id_list.with(|ids| !ids.is_empty())>
                    <div class="bg-white rounded-xl shadow p-6">
                        <div class="flex items-center justify-between mb-3">
                            <h3 class="font-semibold">
                                {move || format!("입력된 ID 목록 ({}개)", id_list.with(Vec::len))}
                            </h3>
                            <Button variant=ButtonVariant::Danger size=ButtonSize::Small on_click=clear_all>
                                "전체 삭제"
                            </Button>
                        </div>
                        <div class="flex flex-wrap gap-2 mb-4">
                            <For
                                each=move || id_list.get()
                                key=|id| *id
                                children=move |id| {
                                    view! {
                                        <span class="inline-flex items-center gap-1 px-3 py-1 rounded-full bg-gray-100 text-sm font-mono">
                                            {id}
                                            <button
                                                class="text-gray-400 hover:text-red-600"
                                                title="삭제"
                                                on:click=move |_| remove_id(id)
                                            >
                                                "×"
                                            </button>
                                        </span>
                                    }
                                }
                            />
                        </div>
                        <Button
                            size=ButtonSize::Large
                            full_width=true
                            class="font-semibold"
                            disabled=Signal::derive(move || loading.get())
                            on_click=fetch
                        >
                            {move || if loading.get() { "조회 중..." } else { "조회하기" }}
                        </Button>
                    </div>
                </Show>

                <Show when=move || contents.with(|rows| !rows.is_empty())>
                    <div class="flex flex-wrap items-center justify-between gap-3">
                        <div class="text-sm">
                            <span class="font-medium">"검색 결과"</span>
                            <span class="ml-2 text-gray-500">
                                {move || format!("총 {}개", contents.with(Vec::len))}
                            </span>
                        </div>
                        <div class="flex gap-2">
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
                            <Button variant=ButtonVariant::Outline on_click=copy_all>
                                "복사하기"
                            </Button>
                            <Button on_click=download_markdown>"다운로드"</Button>
                        </div>
                    </div>
                    <div class="space-y-3">
                        <For
                            each=move || contents.get()
                            key=|content| content.id
                            children=move |content| {
                                let id = content.id;
                                view! {
                                    <div class="bg-white rounded-xl shadow-sm border border-gray-200 p-4">
                                        <div class="text-xs text-gray-400 mb-1">"제목"</div>
                                        <div class="font-medium mb-2">
                                            <ContentTitle content=content.clone() />
                                        </div>
                                        <div class="flex gap-4 text-xs text-gray-500 mb-1">
                                            <span>{format!("🆔 {id}")}</span>
                                            <span>"👤 " <AuthorLink author=content.author.clone() /></span>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_summary() {
        assert_eq!(lookup_summary(3, 0), "조회된 결과가 없습니다.");
        assert_eq!(lookup_summary(3, 2), "3개 중 2개의 콘텐츠를 찾았습니다.");
    }
}
