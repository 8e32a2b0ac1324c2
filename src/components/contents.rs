use leptos::prelude::*;

use crate::models::{month_label, CommunityContent, PostDetails};
use crate::utils::{format_date, format_number};

#[component]
pub fn ContentTitle(content: CommunityContent) -> impl IntoView {
    match content.url {
        Some(url) => view! {
            <a
                href=url
                target="_blank"
                rel="noopener noreferrer"
                class="text-gray-900 hover:text-red-600 hover:underline"
            >
                {content.title}
            </a>
        }
        .into_any(),
        None => view! { <span class="text-gray-900">{content.title}</span> }.into_any(),
    }
}

#[component]
pub fn AuthorLink(author: Option<String>) -> impl IntoView {
    match author {
        Some(author) => {
            let href = format!("/contents/{}", urlencoding::encode(&author));
            view! {
                <a href=href class="text-gray-700 hover:text-red-600 hover:underline">
                    {author}
                </a>
            }
            .into_any()
        }
        None => view! { <span class="text-gray-400">"-"</span> }.into_any(),
    }
}

/// Compact metadata line: category, date, views, comments, travel month.
#[component]
pub fn ContentMeta(content: CommunityContent) -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-x-4 gap-y-1 text-xs text-gray-500">
            <span>"📁 " {content.category.unwrap_or_else(|| "기타".to_string())}</span>
            <span>"📅 " {format_date(content.date.as_deref())}</span>
            <span>"👁️ " {format!("{}회", format_number(content.view_count))}</span>
            <span>"💬 " {format!("{}개", format_number(content.comments))}</span>
            <span>"🗓️ " {month_label(content.post_month)}</span>
        </div>
    }
}

#[component]
pub fn PostDetailsPanel(details: PostDetails) -> impl IntoView {
    let comment_count = details.comments.len();

    view! {
        <div class="mt-3 space-y-3">
            <div class="rounded-lg bg-gray-50 border border-gray-200 p-3">
                <div class="text-xs font-semibold text-gray-500 mb-1">"📄 본문"</div>
                <p class="text-sm text-gray-800 whitespace-pre-wrap">
                    {details.content.unwrap_or_else(|| "본문이 없습니다.".to_string())}
                </p>
            </div>
            <div class="rounded-lg bg-gray-50 border border-gray-200 p-3">
                <div class="text-xs font-semibold text-gray-500 mb-2">
                    {format!("💬 댓글 ({comment_count}개)")}
                </div>
                {if comment_count == 0 {
                    view! { <p class="text-sm text-gray-400">"댓글이 없습니다."</p> }.into_any()
                } else {
                    view! {
                        <ul class="space-y-2">
                            {details
                                .comments
                                .into_iter()
                                .map(|comment| {
                                    view! {
                                        <li class="text-sm">
                                            <span class="font-medium text-gray-700">
                                                {comment.comment_author.unwrap_or_else(|| "-".to_string())}
                                            </span>
                                            <span class="ml-2 text-xs text-gray-400">
                                                {comment.comment_date.unwrap_or_default()}
                                            </span>
                                            <p class="text-gray-800 whitespace-pre-wrap">
                                                {comment.comment_text.unwrap_or_default()}
                                            </p>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }}
            </div>
        </div>
    }
}
