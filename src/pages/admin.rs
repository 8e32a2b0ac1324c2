use leptos::prelude::*;

use crate::auth::{LogoutButton, RequireAdmin};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::models::{AnalyticsReport, ChatLogView, LogsPage, OverallStats};
use crate::server_fn::admin::{get_analytics, get_logs};
use crate::utils::format_timestamp;

const LOGS_PER_PAGE: u32 = 10;

fn format_avg_ms(ms: f64) -> String {
    if ms <= 0.0 {
        "0ms".to_string()
    } else {
        format!("{}ms", ms.round() as i64)
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <AdminDashboard />
        </RequireAdmin>
    }
}

#[component]
fn AdminDashboard() -> impl IntoView {
    let (page, set_page) = signal(1u32);

    let analytics = Resource::new(|| (), |_| get_analytics());
    let logs = Resource::new(move || page.get(), |page| get_logs(page, LOGS_PER_PAGE));

    view! {
        <div class="min-h-screen bg-gray-50">
            <div class="bg-white shadow-sm border-b">
                <div class="max-w-7xl mx-auto px-4 py-4 flex items-center justify-between">
                    <h1 class="text-2xl font-bold text-gray-900">"🛡️ 관리자 대시보드"</h1>
                    <div class="flex items-center gap-3">
                        <Button
                            variant=ButtonVariant::Outline
                            on_click=move |_: web_sys::MouseEvent| {
                                analytics.refetch();
                                logs.refetch();
                            }
                        >
                            "새로고침"
                        </Button>
                        <LogoutButton />
                    </div>
                </div>
            </div>

            <div class="max-w-7xl mx-auto px-4 py-8">
                <Transition fallback=|| {
                    view! { <div class="text-center text-gray-600 py-8">"📊 관리자 대시보드 로딩 중..."</div> }
                }>
                    {move || {
                        analytics
                            .get()
                            .map(|result| match result {
                                Ok(report) => view! { <AnalyticsSummary report=report /> }.into_any(),
                                Err(e) => {
                                    view! {
                                        <p class="mb-8 text-red-600">
                                            {format!("통계를 불러오지 못했습니다: {e}")}
                                        </p>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Transition>

                <div class="bg-white rounded-lg shadow">
                    <div class="px-6 py-4 border-b border-gray-200">
                        <h2 class="text-lg font-semibold">"📝 최근 질문 로그"</h2>
                    </div>
                    <Transition fallback=|| {
                        view! { <div class="px-6 py-4 text-gray-500">"로그 불러오는 중..."</div> }
                    }>
                        {move || {
                            logs.get()
                                .map(|result| match result {
                                    Ok(logs_page) => {
                                        view! { <LogTable logs_page=logs_page set_page=set_page /> }
                                            .into_any()
                                    }
                                    Err(e) => {
                                        view! {
                                            <p class="px-6 py-4 text-red-600">
                                                {format!("로그를 불러오지 못했습니다: {e}")}
                                            </p>
                                        }
                                            .into_any()
                                    }
                                })
                        }}
                    </Transition>
                </div>
            </div>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: String, color: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white p-6 rounded-lg shadow">
            <div class="text-sm font-medium text-gray-500">{label}</div>
            <div class=format!("text-2xl font-bold {color}")>{value}</div>
        </div>
    }
}

#[component]
fn AnalyticsSummary(report: AnalyticsReport) -> impl IntoView {
    let OverallStats {
        total_interactions,
        failed_responses,
        success_rate,
        avg_response_time_ms,
        avg_embedding_time_ms,
        avg_search_time_ms,
        avg_llm_time_ms,
        avg_search_results,
        ..
    } = report.overall;

    let breakdown = [
        ("임베딩 생성", avg_embedding_time_ms, "text-blue-500"),
        ("벡터 검색", avg_search_time_ms, "text-green-500"),
        ("LLM 응답", avg_llm_time_ms, "text-purple-500"),
        ("전체 시간", avg_response_time_ms, "text-gray-700"),
    ];
    let top_questions = report.top_questions;

    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 lg:grid-cols-5 gap-6 mb-8">
            <StatCard label="총 질문 수" value=total_interactions.to_string() color="text-blue-600" />
            <StatCard label="성공률" value=format!("{success_rate}%") color="text-green-600" />
            <StatCard
                label="평균 응답 시간"
                value=format_avg_ms(avg_response_time_ms)
                color="text-purple-600"
            />
            <StatCard
                label="평균 검색 결과"
                value=avg_search_results.to_string()
                color="text-orange-600"
            />
            <StatCard label="실패한 질문" value=failed_responses.to_string() color="text-red-600" />
        </div>

        <div class="bg-white p-6 rounded-lg shadow mb-8">
            <h2 class="text-lg font-semibold mb-4">"⏱️ 성능 분석"</h2>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {breakdown
                    .into_iter()
                    .map(|(label, ms, color)| {
                        view! {
                            <div class="text-center">
                                <div class="text-sm text-gray-500">{label}</div>
                                <div class=format!("text-lg font-bold {color}")>{format_avg_ms(ms)}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>

        {(!top_questions.is_empty())
            .then(|| {
                view! {
                    <div class="bg-white p-6 rounded-lg shadow mb-8">
                        <h2 class="text-lg font-semibold mb-4">"🔥 인기 질문 TOP 10"</h2>
                        <div class="space-y-3">
                            {top_questions
                                .into_iter()
                                .enumerate()
                                .map(|(index, item)| {
                                    view! {
                                        <div class="flex items-center justify-between p-3 bg-gray-50 rounded">
                                            <div class="flex-1">
                                                <span class="text-sm text-gray-600">{format!("#{}", index + 1)}</span>
                                                <span class="ml-2 text-gray-900">{format!("{}...", item.question)}</span>
                                            </div>
                                            <span class="text-sm font-medium text-blue-600">
                                                {format!("{}회", item.count)}
                                            </span>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                }
            })}
    }
}

#[component]
fn LogRow(log: ChatLogView) -> impl IntoView {
    let created = log
        .created_at
        .as_ref()
        .map(format_timestamp)
        .unwrap_or_else(|| "-".to_string());
    let response_time = match log.response_time_ms {
        Some(ms) if ms > 0 => format!("{ms}ms"),
        _ => "0ms".to_string(),
    };
    let question_title = log.user_question.clone();

    view! {
        <tr class="hover:bg-gray-50">
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{created}</td>
            <td class="px-6 py-4 text-sm text-gray-900 max-w-xs truncate" title=question_title>
                {log.user_question}
            </td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">{response_time}</td>
            <td class="px-6 py-4 whitespace-nowrap text-sm text-gray-500">
                {format!("{}개", log.search_results_count.unwrap_or(0))}
            </td>
            <td class="px-6 py-4 whitespace-nowrap">
                {if log.error_occurred {
                    view! {
                        <span
                            class="inline-flex px-2 py-1 text-xs font-semibold rounded-full bg-red-100 text-red-800"
                            title=log.error_message.unwrap_or_default()
                        >
                            "실패"
                        </span>
                    }
                        .into_any()
                } else {
                    view! {
                        <span class="inline-flex px-2 py-1 text-xs font-semibold rounded-full bg-green-100 text-green-800">
                            "성공"
                        </span>
                    }
                        .into_any()
                }}
            </td>
        </tr>
    }
}

#[component]
fn LogTable(logs_page: LogsPage, set_page: WriteSignal<u32>) -> impl IntoView {
    let pagination = logs_page.pagination;
    let (first, last) = pagination.showing();
    let current = pagination.page;

    view! {
        <div class="overflow-x-auto">
            <table class="w-full">
                <thead class="bg-gray-50">
                    <tr>
                        {["시간", "질문", "응답 시간", "검색 결과", "상태"]
                            .into_iter()
                            .map(|heading| {
                                view! {
                                    <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">
                                        {heading}
                                    </th>
                                }
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    {logs_page
                        .logs
                        .into_iter()
                        .map(|log| view! { <LogRow log=log /> })
                        .collect_view()}
                </tbody>
            </table>
        </div>

        <div class="px-6 py-4 border-t border-gray-200 flex items-center justify-between">
            <div class="text-sm text-gray-500">
                {format!("전체 {}개 중 {first}-{last}개 표시", pagination.total)}
            </div>
            <div class="flex space-x-2">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Small
                    disabled=!pagination.has_previous()
                    on_click=move |_: web_sys::MouseEvent| set_page.set(current.saturating_sub(1).max(1))
                >
                    "이전"
                </Button>
                <span class="px-3 py-1 text-sm">
                    {format!("{current} / {}", pagination.total_pages)}
                </span>
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Small
                    disabled=!pagination.has_next()
                    on_click=move |_: web_sys::MouseEvent| set_page.set(current + 1)
                >
                    "다음"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_avg_ms_rounds() {
        assert_eq!(format_avg_ms(0.0), "0ms");
        assert_eq!(format_avg_ms(1532.4), "1532ms");
        assert_eq!(format_avg_ms(1532.6), "1533ms");
    }
}
