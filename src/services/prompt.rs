use crate::models::{SourceDescriptor, TravelMatch};

pub const SYSTEM_PROMPT: &str = "당신은 스위스 여행 전문 AI 도우미입니다. 

다음 지침을 따라 답변해주세요:
1. 한국어로 친근하고 도움이 되는 톤으로 답변
2. 제공된 컨텍스트를 기반으로 정확한 정보 제공
3. 컨텍스트에 없는 정보는 추측하지 말고 \"제공된 정보에서는 확인할 수 없습니다\"라고 안내
4. 실용적이고 구체적인 조언 제공
5. 가격, 시간, 교통편 등 구체적인 정보가 있으면 명시
6. 답변 마지막에 출처를 명시하지 말 것 (별도로 처리됨)

사용자의 질문에 도움이 되는 답변을 제공하세요.";

const NO_CONTEXT_HINT: &str = " (관련 정보를 찾을 수 없어 일반적인 스위스 여행 정보로 답변해주세요.)";

/// Renders the retrieved chunks as numbered `[문서 N]` blocks and collects
/// the matching source descriptors in the same order.
pub fn build_context(matches: &[TravelMatch]) -> (String, Vec<SourceDescriptor>) {
    let mut context = String::new();
    let mut sources = Vec::with_capacity(matches.len());

    for (index, m) in matches.iter().enumerate() {
        sources.push(SourceDescriptor::from(m));
        context.push_str(&format!(
            "[문서 {}]\n제목: {}\n섹션: {}\n내용: {}\n\n",
            index + 1,
            m.title,
            m.section_title
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("메인"),
            m.content
        ));
    }

    (context, sources)
}

pub fn build_user_prompt(context: &str, question: &str) -> String {
    let hint = if context.is_empty() { NO_CONTEXT_HINT } else { "" };
    format!(
        "컨텍스트:\n{context}\n\n사용자 질문: {question}\n\n위 컨텍스트를 바탕으로 사용자의 질문에 답변해주세요.{hint}"
    )
}

#[cfg(test)]
pub(crate) fn travel_match(id: i64, title: &str, similarity: f64) -> TravelMatch {
    TravelMatch {
        id,
        content: format!("{title} 본문"),
        title: title.to_string(),
        file_name: format!("{id}.md"),
        category: Some("교통".to_string()),
        section_title: None,
        chunk_index: Some(0),
        total_chunks: Some(1),
        similarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_context_numbers_documents() {
        let mut second = travel_match(2, "체르마트", 0.75);
        second.section_title = Some("고르너그라트".to_string());
        let (context, sources) = build_context(&[travel_match(1, "스위스패스", 0.91), second]);

        assert_eq!(
            context,
            "[문서 1]\n제목: 스위스패스\n섹션: 메인\n내용: 스위스패스 본문\n\n\
             [문서 2]\n제목: 체르마트\n섹션: 고르너그라트\n내용: 체르마트 본문\n\n"
        );
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "스위스패스");
        assert_eq!(sources[1].section_title.as_deref(), Some("고르너그라트"));
        assert_eq!(sources[1].similarity, 0.75);
    }

    #[test]
    fn test_user_prompt_hints_when_context_is_empty() {
        let (context, sources) = build_context(&[]);
        assert!(sources.is_empty());
        let prompt = build_user_prompt(&context, "취리히 공항에서 루체른 가는 법?");
        assert!(prompt.starts_with("컨텍스트:\n\n\n사용자 질문: 취리히 공항에서 루체른 가는 법?"));
        assert!(prompt.ends_with(NO_CONTEXT_HINT));

        let prompt = build_user_prompt("[문서 1]\n", "질문");
        assert!(prompt.ends_with("답변해주세요."));
    }
}
