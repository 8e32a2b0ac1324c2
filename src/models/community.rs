use serde::{Deserialize, Serialize};

pub const DEFAULT_EXCLUDED_AUTHOR: &str = "차가운순대";
pub const QA_CATEGORIES: [&str; 2] = ["❓질문게시판 Q&A", "여행 질문 Q&A"];

pub const CATEGORIES: [&str; 52] = [
    "❓질문게시판 Q&A",
    "🍽️스위스 맛집 후기",
    "🏨스위스 숙소 후기",
    "🌤️스위스 날씨",
    "🚂스위스패스/기차",
    "★인터라켄★",
    "★루체른★",
    "★체르마트★",
    "✍🏼끄적끄적 스위스여행기",
    "🔎기타 꿀팁",
    "✈️항공권 꿀팁",
    "🚑나의 여행 실수담",
    "🚗렌트카/자동차",
    "🛒coop, migros, 쇼핑",
    "🧳짐싸기 꿀팁",
    "여행 질문 Q&A",
    "★기타 전체 지역★",
    "📍스위스 여행루트",
    "🇨🇭스위스어디까지가봤니",
    "🇨🇭스위스여행 Top3",
    "쏙닥쏙닥 자유게시판",
    "✈️여행준비콘테스트",
    "⭐스프 인기작가 모아보기",
    "다음에는 어디로?",
    "스위스 기초 정보",
    "스위스 여행 컨설팅",
    "스위스 할인쿠폰",
    "스위스프렌즈 공지사항",
    "자주하는질문모음",
    "🇫🇷프랑스 France",
    "🇮🇹이탈리아 Italia",
    "🇬🇧영국 UK",
    "🇪🇸스페인 Spain",
    "🇦🇹오스트리아 Austria",
    "🇩🇪독일 Germany",
    "🇨🇿체코 Czech",
    "🇵🇱폴란드 Poland",
    "🇰🇷★대한민국★",
    "기타 국가",
    "📷스위스 여행사진",
    "📺스프 TV",
    "🤖스프AI질의응답",
    "가입인사",
    "🦠코로나 테스트",
    "🧑‍🤝‍🧑스위스 동행구함",
    "스프 공식 정모&번개",
    "스프 댓글왕 시상식",
    "읽고 댓글달면 정회원",
    "자기 소개 + 셀카",
    "한국자유여행연합회",
    "(구) 공지사항",
    "(구)질문전! 필수 작성글!",
];

/// A row of `swissfriends_content_all`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityContent {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub view_count: Option<i64>,
    pub comments: Option<i64>,
    pub url: Option<String>,
    /// `None` = not yet classified, `0` = any month, `1..=12` = travel month.
    pub post_month: Option<i32>,
}

impl CommunityContent {
    pub fn is_qa(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| QA_CATEGORIES.contains(&c))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostContent {
    pub id: i64,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostComment {
    pub post_id: i64,
    pub comment_author: Option<String>,
    pub comment_date: Option<String>,
    pub comment_text: Option<String>,
    pub comment_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostDetails {
    pub content: Option<String>,
    pub comments: Vec<PostComment>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentOrder {
    #[default]
    DateDesc,
    DateAsc,
    ViewCount,
    Comments,
}

impl ContentOrder {
    pub fn as_postgrest(&self) -> &'static str {
        match self {
            ContentOrder::DateDesc => "date.desc",
            ContentOrder::DateAsc => "date.asc",
            ContentOrder::ViewCount => "view_count.desc",
            ContentOrder::Comments => "comments.desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentOrder::DateDesc => "최신순",
            ContentOrder::DateAsc => "오래된순",
            ContentOrder::ViewCount => "조회수순",
            ContentOrder::Comments => "댓글순",
        }
    }

    pub const ALL: [ContentOrder; 4] = [
        ContentOrder::DateDesc,
        ContentOrder::DateAsc,
        ContentOrder::ViewCount,
        ContentOrder::Comments,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentFilter {
    pub categories: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub excluded_author: Option<String>,
    #[serde(default)]
    pub order: ContentOrder,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self {
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            start_date: "2025-01-01".to_string(),
            end_date: "2025-12-31".to_string(),
            excluded_author: Some(DEFAULT_EXCLUDED_AUTHOR.to_string()),
            order: ContentOrder::DateDesc,
        }
    }
}

pub fn month_label(post_month: Option<i32>) -> String {
    match post_month {
        None => "미확인".to_string(),
        Some(0) => "전체월".to_string(),
        Some(m @ 1..=12) => format!("{m}월"),
        Some(_) => "-".to_string(),
    }
}

pub fn is_valid_post_month(post_month: Option<i32>) -> bool {
    matches!(post_month, None | Some(0..=12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(None), "미확인");
        assert_eq!(month_label(Some(0)), "전체월");
        assert_eq!(month_label(Some(7)), "7월");
        assert_eq!(month_label(Some(13)), "-");
    }

    #[test]
    fn test_post_month_validation() {
        assert!(is_valid_post_month(None));
        assert!(is_valid_post_month(Some(0)));
        assert!(is_valid_post_month(Some(12)));
        assert!(!is_valid_post_month(Some(13)));
        assert!(!is_valid_post_month(Some(-1)));
    }

    #[test]
    fn test_default_filter_selects_everything_but_default_author() {
        let filter = ContentFilter::default();
        assert_eq!(filter.categories.len(), CATEGORIES.len());
        assert_eq!(filter.excluded_author.as_deref(), Some(DEFAULT_EXCLUDED_AUTHOR));
        assert_eq!(filter.order.as_postgrest(), "date.desc");
    }

    #[test]
    fn test_qa_detection() {
        let mut content = CommunityContent {
            id: 67838,
            title: "패스 질문".to_string(),
            category: Some("여행 질문 Q&A".to_string()),
            author: None,
            date: None,
            view_count: None,
            comments: None,
            url: None,
            post_month: None,
        };
        assert!(content.is_qa());
        content.category = Some("★루체른★".to_string());
        assert!(!content.is_qa());
        content.category = None;
        assert!(!content.is_qa());
    }
}
