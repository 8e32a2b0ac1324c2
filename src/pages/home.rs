use leptos::prelude::*;

use crate::components::ui::{ButtonSize, LinkButton};
use crate::models::SAMPLE_QUESTIONS;

const FEATURES: [(&str, &str, &str); 3] = [
    ("⚡", "즉시 답변", "질문하는 즉시 AI가 관련 정보를 찾아 답변해드립니다"),
    ("📚", "신뢰할 수 있는 정보", "검증된 여행 가이드를 기반으로 정확한 정보를 제공합니다"),
    ("🇨🇭", "스위스 전문", "스위스 여행에 특화된 상세하고 실용적인 정보를 제공합니다"),
];

pub fn question_href(question: &str) -> String {
    format!("/chat?q={}", urlencoding::encode(question))
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="bg-gradient-to-br from-red-50 via-white to-gray-50">
            <section class="max-w-5xl mx-auto px-4 pt-16 pb-12 text-center">
                <h1 class="text-4xl md:text-6xl font-bold text-gray-900 mb-6 leading-tight">
                    "스위스 여행,"
                    <br />
                    <span class="text-red-600">"AI에게 물어보세요"</span>
                </h1>
                <p class="text-lg md:text-xl text-gray-600 mb-10 max-w-2xl mx-auto">
                    "교통, 숙박, 관광지, 음식까지. 스위스 여행 커뮤니티의 생생한 정보로 답해드립니다."
                </p>
                <LinkButton href="/chat" size=ButtonSize::Large>
                    "지금 질문하기 →"
                </LinkButton>
            </section>

            <section class="max-w-5xl mx-auto px-4 pb-12">
                <h2 class="text-xl font-semibold text-gray-800 mb-4 text-center">
                    "이런 질문을 해보세요"
                </h2>
                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-3">
                    {SAMPLE_QUESTIONS
                        .iter()
                        .map(|question| {
                            view! {
                                <a
                                    href=question_href(question)
                                    class="block p-4 rounded-xl bg-white border border-gray-200 shadow-sm hover:border-red-300 hover:shadow transition"
                                >
                                    <span class="mr-2">"💬"</span>
                                    <span class="font-medium text-gray-800">{*question}</span>
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="max-w-5xl mx-auto px-4 pb-16 grid md:grid-cols-3 gap-6">
                {FEATURES
                    .iter()
                    .map(|(icon, title, desc)| {
                        view! {
                            <div class="p-6 rounded-2xl bg-white border border-gray-200 shadow-sm">
                                <div class="text-4xl mb-3">{*icon}</div>
                                <h3 class="text-lg font-semibold text-gray-900 mb-2">{*title}</h3>
                                <p class="text-gray-600">{*desc}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_href_is_url_encoded() {
        assert_eq!(
            question_href("리기산 가는 방법?"),
            "/chat?q=%EB%A6%AC%EA%B8%B0%EC%82%B0%20%EA%B0%80%EB%8A%94%20%EB%B0%A9%EB%B2%95%3F"
        );
    }
}
