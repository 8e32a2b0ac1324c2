use leptos::{prelude::*, task::spawn_local};
use log::error;

use crate::auth::context::use_admin;
use crate::components::browser::alert;
use crate::components::contents::{AuthorLink, ContentTitle};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::models::{
    month_label, CommunityContent, ContentFilter, ContentOrder, CATEGORIES, DEFAULT_EXCLUDED_AUTHOR,
};
use crate::server_fn::contents::{list_contents, update_post_month};
use crate::utils::{format_date, format_number};

const COLLAPSED_CATEGORIES: usize = 4;

/// Month select value: empty string for unclassified, otherwise the number.
fn parse_month_choice(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

fn month_choice(post_month: Option<i32>) -> String {
    post_month.map(|m| m.to_string()).unwrap_or_default()
}

#[component]
pub fn ContentsListPage() -> impl IntoView {
    let defaults = ContentFilter::default();
    let categories = RwSignal::new(defaults.categories);
    let start_date = RwSignal::new(defaults.start_date);
    let end_date = RwSignal::new(defaults.end_date);
    let exclude_author = RwSignal::new(true);
    let order = RwSignal::new(ContentOrder::default());
    let show_all = RwSignal::new(false);

    let contents = RwSignal::new(None::<Vec<CommunityContent>>);
    let loading = RwSignal::new(false);
    let editing = RwSignal::new(None::<CommunityContent>);

    let admin = use_admin();
    let is_admin = Signal::derive(move || admin.map(|a| a.is_admin.get()).unwrap_or(false));

    let fetch = move |_: web_sys::MouseEvent| {
        let filter = ContentFilter {
            categories: categories.get_untracked(),
            start_date: start_date.get_untracked(),
            end_date: end_date.get_untracked(),
            excluded_author: exclude_author
                .get_untracked()
                .then(|| DEFAULT_EXCLUDED_AUTHOR.to_string()),
            order: order.get_untracked(),
        };
        loading.set(true);
        spawn_local(async move {
            match list_contents(filter).await {
                Ok(rows) => contents.set(Some(rows)),
                Err(e) => {
                    error!("Error fetching contents: {e}");
                    alert("콘텐츠 조회 중 오류가 발생했습니다.");
                }
            }
            loading.set(false);
        });
    };

    let toggle_category = move |category: &'static str| {
        categories.update(|selected| {
            if let Some(pos) = selected.iter().position(|c| c == category) {
                selected.remove(pos);
            } else {
                selected.push(category.to_string());
            }
        });
    };

    let visible_categories = move || {
        let all: &'static [&'static str] = &CATEGORIES;
        if show_all.get() {
            all
        } else {
            &all[..COLLAPSED_CATEGORIES]
        }
    };

    view! {
        <div class="min-h-screen bg-gray-50">
            <div class="max-w-7xl mx-auto px-4 py-8">
                <h1 class="text-2xl font-bold text-gray-900 mb-6">"스위스프렌즈 콘텐츠 관리"</h1>

                <div class="bg-white rounded-xl shadow p-6 mb-6 space-y-6">
                    <h2 class="text-lg font-semibold">"필터"</h2>

                    <div>
                        <div class="flex items-center justify-between mb-3">
                            <label class="font-medium text-gray-700">
                                {move || format!("카테고리 ({}/{})", categories.get().len(), CATEGORIES.len())}
                            </label>
                            <div class="space-x-2 text-sm">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Small
                                    on_click=move |_: web_sys::MouseEvent| {
                                        categories.set(CATEGORIES.iter().map(|c| c.to_string()).collect())
                                    }
                                >
                                    "전체선택"
                                </Button>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Small
                                    on_click=move |_: web_sys::MouseEvent| categories.set(Vec::new())
                                >
                                    "선택해제"
                                </Button>
                            </div>
                        </div>
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-2">
                            {move || {
                                visible_categories()
                                    .iter()
                                    .copied()
                                    .map(|category| {
                                        view! {
                                            <label class="flex items-center gap-2 text-sm text-gray-700 cursor-pointer">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=move || {
                                                        categories.with(|c| c.iter().any(|s| s == category))
                                                    }
                                                    on:change=move |_| toggle_category(category)
                                                />
                                                <span>{category}</span>
                                            </label>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                        <button
                            class="mt-3 text-sm text-red-600 hover:underline"
                            on:click=move |_| show_all.update(|v| *v = !*v)
                        >
                            {move || {
                                let hidden = CATEGORIES.len() - COLLAPSED_CATEGORIES;
                                if show_all.get() {
                                    format!("접기 ({hidden}개 숨기기)")
                                } else {
                                    format!("더보기 ({hidden}개 더보기)")
                                }
                            }}
                        </button>
                    </div>

                    <div class="grid md:grid-cols-2 gap-4">
                        <div>
                            <label class="block font-medium text-gray-700 mb-2">"시작일"</label>
                            <input
                                type="date"
                                class="w-full px-3 py-2 border rounded-lg"
                                prop:value=move || start_date.get()
                                on:input=move |ev| start_date.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label class="block font-medium text-gray-700 mb-2">"종료일"</label>
                            <input
                                type="date"
                                class="w-full px-3 py-2 border rounded-lg"
                                prop:value=move || end_date.get()
                                on:input=move |ev| end_date.set(event_target_value(&ev))
                            />
                        </div>
                    </div>

                    <div>
                        <label class="block font-medium text-gray-700 mb-2">"정렬 기준"</label>
                        <div class="flex flex-wrap gap-2">
                            {ContentOrder::ALL
                                .into_iter()
                                .map(|choice| {
                                    view! {
                                        <button
                                            class=move || {
                                                if order.get() == choice {
                                                    "px-4 py-2 rounded-lg text-sm bg-red-600 text-white"
                                                } else {
                                                    "px-4 py-2 rounded-lg text-sm border hover:bg-gray-50"
                                                }
                                            }
                                            on:click=move |_| order.set(choice)
                                        >
                                            {choice.label()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <label class="flex items-center gap-2 cursor-pointer text-gray-700">
                        <input
                            type="checkbox"
                            prop:checked=move || exclude_author.get()
                            on:change=move |ev| exclude_author.set(event_target_checked(&ev))
                        />
                        <span class="font-medium">{format!("\"{DEFAULT_EXCLUDED_AUTHOR}\" 제외")}</span>
                    </label>

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

                {move || match contents.get() {
                    None => {
                        view! {
                            <p class="text-center text-gray-500 py-12">
                                "조회 버튼을 눌러 콘텐츠를 불러오세요."
                            </p>
                        }
                            .into_any()
                    }
                    Some(rows) => {
                        view! { <ContentsTable rows=rows is_admin=is_admin editing=editing /> }
                            .into_any()
                    }
                }}
            </div>

            <MonthEditModal editing=editing contents=contents />
        </div>
    }
}

#[component]
fn ContentsTable(
    rows: Vec<CommunityContent>,
    is_admin: Signal<bool>,
    editing: RwSignal<Option<CommunityContent>>,
) -> impl IntoView {
    let total = rows.len();

    view! {
        <div class="bg-white rounded-xl shadow overflow-hidden">
            <div class="px-6 py-4 border-b flex items-center justify-between">
                <span class="font-medium">"검색 결과"</span>
                <span class="text-sm text-gray-500">{format!("총 {total}개")}</span>
            </div>
            <div class="overflow-x-auto">
                <table class="w-full text-sm">
                    <thead class="bg-gray-50 text-gray-600">
                        <tr>
                            <th class="px-4 py-3 text-left w-32">"카테고리"</th>
                            <th class="px-4 py-3 text-left">"제목"</th>
                            <th class="px-4 py-3 text-left w-28">"작성자"</th>
                            <th class="px-4 py-3 text-left w-32">"날짜"</th>
                            <th class="px-4 py-3 text-center w-24">"조회수"</th>
                            <th class="px-4 py-3 text-center w-20">"댓글"</th>
                            <th class="px-4 py-3 text-center w-24">"여행 월"</th>
                            <Show when=move || is_admin.get()>
                                <th class="px-4 py-3 text-center w-24">"수정"</th>
                            </Show>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-100">
                        {rows
                            .into_iter()
                            .map(|content| {
                                let for_edit = content.clone();
                                view! {
                                    <tr class="hover:bg-gray-50">
                                        <td class="px-4 py-3 text-gray-600">
                                            {content.category.clone().unwrap_or_else(|| "기타".to_string())}
                                        </td>
                                        <td class="px-4 py-3">
                                            <ContentTitle content=content.clone() />
                                        </td>
                                        <td class="px-4 py-3">
                                            <AuthorLink author=content.author.clone() />
                                        </td>
                                        <td class="px-4 py-3 text-gray-600">
                                            {format_date(content.date.as_deref())}
                                        </td>
                                        <td class="px-4 py-3 text-center">{format_number(content.view_count)}</td>
                                        <td class="px-4 py-3 text-center">{format_number(content.comments)}</td>
                                        <td class="px-4 py-3 text-center">{month_label(content.post_month)}</td>
                                        <Show when=move || is_admin.get()>
                                            <td class="px-4 py-3 text-center">
                                                <button
                                                    class="px-3 py-1 rounded border text-xs hover:bg-gray-50"
                                                    on:click={
                                                        let for_edit = for_edit.clone();
                                                        move |_| editing.set(Some(for_edit.clone()))
                                                    }
                                                >
                                                    "수정"
                                                </button>
                                            </td>
                                        </Show>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
fn MonthEditModal(
    editing: RwSignal<Option<CommunityContent>>,
    contents: RwSignal<Option<Vec<CommunityContent>>>,
) -> impl IntoView {
    let selected = RwSignal::new(String::new());
    let updating = RwSignal::new(false);

    Effect::new(move |_| {
        if let Some(content) = editing.get() {
            selected.set(month_choice(content.post_month));
        }
    });

    let save = move |_: web_sys::MouseEvent| {
        let Some(content) = editing.get_untracked() else {
            return;
        };
        let post_month = parse_month_choice(&selected.get_untracked());
        updating.set(true);
        spawn_local(async move {
            match update_post_month(content.id, post_month).await {
                Ok(()) => {
                    contents.update(|rows| {
                        if let Some(row) = rows
                            .as_mut()
                            .and_then(|rows| rows.iter_mut().find(|r| r.id == content.id))
                        {
                            row.post_month = post_month;
                        }
                    });
                    editing.set(None);
                    alert("여행 월 정보가 업데이트되었습니다.");
                }
                Err(e) => {
                    error!("Error updating post_month: {e}");
                    alert("업데이트 중 오류가 발생했습니다.");
                }
            }
            updating.set(false);
        });
    };

    view! {
        <Show when=move || editing.with(Option::is_some)>
            <div class="fixed inset-0 z-40 bg-black/50 flex items-center justify-center p-4">
                <div class="bg-white rounded-xl shadow-xl max-w-md w-full p-6">
                    <h3 class="text-xl font-bold mb-4">"여행 월 수정"</h3>
                    <p class="text-sm text-gray-600 mb-4">
                        {move || {
                            editing.with(|c| format!("제목: {}", c.as_ref().map(|c| c.title.as_str()).unwrap_or("")))
                        }}
                    </p>
                    <label class="block font-medium text-gray-700 mb-2">"여행 월 선택"</label>
                    <select
                        class="w-full px-3 py-2 border rounded-lg mb-6"
                        prop:value=move || selected.get()
                        on:change=move |ev| selected.set(event_target_value(&ev))
                    >
                        <option value="">"미확인 (null)"</option>
                        <option value="0">"전체월 (0)"</option>
                        {(1..=12)
                            .map(|m| view! { <option value=m.to_string()>{format!("{m}월")}</option> })
                            .collect_view()}
                    </select>
                    <div class="flex gap-3">
                        <Button
                            class="flex-1"
                            disabled=Signal::derive(move || updating.get())
                            on_click=save
                        >
                            {move || if updating.get() { "저장 중..." } else { "저장" }}
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            class="flex-1"
                            on_click=move |_: web_sys::MouseEvent| editing.set(None)
                        >
                            "취소"
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_choice_round_trips_select_values() {
        assert_eq!(parse_month_choice(""), None);
        assert_eq!(parse_month_choice("0"), Some(0));
        assert_eq!(parse_month_choice("12"), Some(12));
        assert_eq!(month_choice(None), "");
        assert_eq!(month_choice(Some(7)), "7");
    }
}
