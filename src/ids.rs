use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

use crate::models::{month_label, CommunityContent, PostDetails};
use crate::utils::{format_date, format_number};

pub const STORAGE_KEY: &str = "contents_multi_ids";

static CAFE_URL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"swissfriends/(\d{5})").expect("valid regex"));

/// Pulls a post id out of a cafe URL (`.../swissfriends/67838?art=...`)
/// or a bare number.
pub fn extract_id(input: &str) -> Option<i64> {
    if let Some(caps) = CAFE_URL_ID.captures(input) {
        return caps[1].parse().ok();
    }
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        return input.parse().ok();
    }
    None
}

pub fn split_entries(input: &str) -> Vec<&str> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdMerge {
    pub added: Vec<i64>,
    pub duplicates: Vec<i64>,
}

impl IdMerge {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.duplicates.is_empty()
    }

    /// The alert shown after an add; `None` when nothing valid was found.
    pub fn summary(&self) -> Option<String> {
        self.summary_for("입력한 ID")
    }

    /// Same as [`IdMerge::summary`] for ids read from a CSV file.
    pub fn csv_summary(&self) -> Option<String> {
        self.summary_for("CSV 파일의 ID")
    }

    fn summary_for(&self, subject: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        if self.added.is_empty() {
            return Some(format!(
                "{subject}가 모두 중복입니다. (중복 {}개)",
                self.duplicates.len()
            ));
        }
        let mut message = format!("{}개의 ID가 추가되었습니다.", self.added.len());
        if !self.duplicates.is_empty() {
            message.push_str(&format!(
                "\n중복된 ID {}개는 제외되었습니다.",
                self.duplicates.len()
            ));
        }
        Some(message)
    }
}

/// Classifies every id found in `input` against `existing`. A repeat inside
/// the same batch is a duplicate too.
pub fn merge_ids(existing: &[i64], input: &str) -> IdMerge {
    let mut seen: HashSet<i64> = existing.iter().copied().collect();
    let mut merge = IdMerge::default();

    for id in split_entries(input).into_iter().filter_map(extract_id) {
        if seen.insert(id) {
            merge.added.push(id);
        } else {
            merge.duplicates.push(id);
        }
    }
    merge
}

pub fn to_csv(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn details_for<'a>(
    details: Option<&'a BTreeMap<i64, PostDetails>>,
    id: i64,
) -> Option<&'a PostDetails> {
    details.and_then(|d| d.get(&id))
}

/// Plain-text dump used by the copy button. Bodies and comments are only
/// included when `details` is given.
pub fn export_text(
    contents: &[CommunityContent],
    details: Option<&BTreeMap<i64, PostDetails>>,
) -> String {
    let mut text = format!("선택된 게시글 ({}개)\n\n", contents.len());
    for (index, content) in contents.iter().enumerate() {
        push_text_entry(&mut text, index, content, details, true);
    }
    text
}

/// Copy text for one author's page; the travel month line is omitted.
pub fn export_author_text(
    author: &str,
    contents: &[CommunityContent],
    details: Option<&BTreeMap<i64, PostDetails>>,
) -> String {
    let mut text = format!("{author}님의 게시글\n\n");
    for (index, content) in contents.iter().enumerate() {
        push_text_entry(&mut text, index, content, details, false);
    }
    text
}

fn push_text_entry(
    text: &mut String,
    index: usize,
    content: &CommunityContent,
    details: Option<&BTreeMap<i64, PostDetails>>,
    with_month: bool,
) {
    text.push_str(&format!("글 {}\n\n", index + 1));
    text.push_str(&format!("제목: {}\n", content.title));
    text.push_str(&format!(
        "카테고리: {}\n",
        content.category.as_deref().unwrap_or("기타")
    ));
    text.push_str(&format!(
        "작성자: {}\n",
        content.author.as_deref().unwrap_or("-")
    ));
    text.push_str(&format!("날짜: {}\n", format_date(content.date.as_deref())));
    text.push_str(&format!(
        "조회수: {}회 | 댓글수: {}개\n",
        format_number(content.view_count),
        format_number(content.comments)
    ));
    if with_month {
        text.push_str(&format!("여행 월: {}\n", month_label(content.post_month)));
    }
    if let Some(url) = &content.url {
        text.push_str(&format!("URL: {url}\n"));
    }

    if let Some(post) = details_for(details, content.id) {
        if let Some(body) = &post.content {
            text.push_str(&format!("\n본문:\n{body}\n"));
        }
        if !post.comments.is_empty() {
            text.push_str(&format!("\n댓글 ({}개):\n", post.comments.len()));
            for (i, comment) in post.comments.iter().enumerate() {
                text.push_str(&format!(
                    "\n{}. {} ({})\n{}\n",
                    i + 1,
                    comment.comment_author.as_deref().unwrap_or("-"),
                    comment.comment_date.as_deref().unwrap_or("-"),
                    comment.comment_text.as_deref().unwrap_or("")
                ));
            }
        }
    }

    text.push_str(&format!("\n{}\n\n", "=".repeat(10)));
}

pub fn export_markdown(
    contents: &[CommunityContent],
    details: Option<&BTreeMap<i64, PostDetails>>,
) -> String {
    let mut md = format!("# 선택된 게시글 ({}개)\n\n", contents.len());

    for (index, content) in contents.iter().enumerate() {
        md.push_str(&format!("## 글 {}: {}\n\n", index + 1, content.title));
        md.push_str("### 기본 정보\n\n");
        md.push_str(&format!("- **ID**: {}\n", content.id));
        md.push_str(&format!(
            "- **카테고리**: {}\n",
            content.category.as_deref().unwrap_or("기타")
        ));
        md.push_str(&format!(
            "- **작성자**: {}\n",
            content.author.as_deref().unwrap_or("-")
        ));
        md.push_str(&format!("- **날짜**: {}\n", format_date(content.date.as_deref())));
        md.push_str(&format!("- **조회수**: {}회\n", format_number(content.view_count)));
        md.push_str(&format!("- **댓글수**: {}개\n", format_number(content.comments)));
        md.push_str(&format!("- **여행 월**: {}\n", month_label(content.post_month)));
        if let Some(url) = &content.url {
            md.push_str(&format!("- **URL**: [바로가기]({url})\n"));
        }
        md.push('\n');

        if let Some(post) = details_for(details, content.id) {
            if let Some(body) = &post.content {
                md.push_str(&format!("### 본문\n\n{body}\n\n"));
            }
            if !post.comments.is_empty() {
                md.push_str(&format!("### 댓글 ({}개)\n\n", post.comments.len()));
                for (i, comment) in post.comments.iter().enumerate() {
                    md.push_str(&format!(
                        "#### {}. {} ({})\n\n{}\n\n",
                        i + 1,
                        comment.comment_author.as_deref().unwrap_or("-"),
                        comment.comment_date.as_deref().unwrap_or("-"),
                        comment.comment_text.as_deref().unwrap_or("")
                    ));
                }
            }
        }

        md.push_str("---\n\n");
    }
    md
}

/// Browser local storage for the id list. Off the browser there is no
/// storage and every call is a no-op.
pub mod storage {
    use super::STORAGE_KEY;

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn local_storage() -> Option<web_sys::Storage> {
        None
    }

    pub fn load() -> Vec<i64> {
        local_storage()
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
            .and_then(|raw| match serde_json::from_str::<Vec<i64>>(&raw) {
                Ok(ids) => Some(ids),
                Err(e) => {
                    log::error!("Error loading saved IDs: {e}");
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn save(ids: &[i64]) {
        if ids.is_empty() {
            return;
        }
        let Some(storage) = local_storage() else {
            return;
        };
        if let Ok(raw) = serde_json::to_string(ids) {
            if storage.set_item(STORAGE_KEY, &raw).is_err() {
                log::error!("Failed to persist id list");
            }
        }
    }

    pub fn clear() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostComment;

    fn content(id: i64, title: &str) -> CommunityContent {
        CommunityContent {
            id,
            title: title.to_string(),
            category: None,
            author: Some("알프스러버".to_string()),
            date: Some("2025-06-02".to_string()),
            view_count: Some(1520),
            comments: Some(3),
            url: Some(format!("https://cafe.naver.com/swissfriends/{id}")),
            post_month: Some(7),
        }
    }

    #[test]
    fn test_extract_id_from_url_and_number() {
        assert_eq!(
            extract_id("https://cafe.naver.com/swissfriends/67838?art=abc"),
            Some(67838)
        );
        assert_eq!(extract_id("12345"), Some(12345));
        assert_eq!(extract_id("1234567"), Some(1234567));
        assert_eq!(extract_id("abc123"), None);
        assert_eq!(extract_id("https://cafe.naver.com/other/67838"), None);
        assert_eq!(extract_id(""), None);
    }

    #[test]
    fn test_split_entries_on_newlines_and_commas() {
        assert_eq!(
            split_entries(" 1 ,2\n\n 3 ,"),
            vec!["1", "2", "3"]
        );
    }

    #[test]
    fn test_merge_ids_reports_duplicates() {
        let existing = vec![11111, 22222];
        let merge = merge_ids(
            &existing,
            "11111\nhttps://cafe.naver.com/swissfriends/33333, 44444, 44444, junk",
        );
        assert_eq!(merge.added, vec![33333, 44444]);
        assert_eq!(merge.duplicates, vec![11111, 44444]);
        assert_eq!(
            merge.summary().as_deref(),
            Some("2개의 ID가 추가되었습니다.\n중복된 ID 2개는 제외되었습니다.")
        );
    }

    #[test]
    fn test_merge_summary_for_empty_and_all_duplicate_input() {
        assert_eq!(merge_ids(&[], "nothing here").summary(), None);
        let merge = merge_ids(&[5], "5");
        assert!(merge.added.is_empty());
        assert_eq!(
            merge.summary().as_deref(),
            Some("입력한 ID가 모두 중복입니다. (중복 1개)")
        );
        assert_eq!(
            merge.csv_summary().as_deref(),
            Some("CSV 파일의 ID가 모두 중복입니다. (중복 1개)")
        );
    }

    #[test]
    fn test_to_csv_one_id_per_line() {
        assert_eq!(to_csv(&[1, 22, 333]), "1\n22\n333");
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_export_text_without_details() {
        let text = export_text(&[content(67838, "융프라우 후기")], None);
        assert!(text.starts_with("선택된 게시글 (1개)\n\n글 1\n\n제목: 융프라우 후기\n"));
        assert!(text.contains("카테고리: 기타\n"));
        assert!(text.contains("조회수: 1,520회 | 댓글수: 3개\n"));
        assert!(text.contains("여행 월: 7월\n"));
        assert!(text.contains("URL: https://cafe.naver.com/swissfriends/67838\n"));
        assert!(!text.contains("본문"));
        assert!(text.ends_with("\n==========\n\n"));
    }

    #[test]
    fn test_export_markdown_with_details() {
        let mut details = BTreeMap::new();
        details.insert(
            67838,
            PostDetails {
                content: Some("본문입니다".to_string()),
                comments: vec![PostComment {
                    post_id: 67838,
                    comment_author: Some("하이디".to_string()),
                    comment_date: Some("2025.06.03.".to_string()),
                    comment_text: Some("좋은 정보 감사합니다".to_string()),
                    comment_order: Some(1),
                }],
            },
        );
        let md = export_markdown(&[content(67838, "융프라우 후기")], Some(&details));
        assert!(md.starts_with("# 선택된 게시글 (1개)\n\n## 글 1: 융프라우 후기\n\n### 기본 정보\n\n"));
        assert!(md.contains("- **ID**: 67838\n"));
        assert!(md.contains("- **URL**: [바로가기](https://cafe.naver.com/swissfriends/67838)\n"));
        assert!(md.contains("### 본문\n\n본문입니다\n\n"));
        assert!(md.contains("### 댓글 (1개)\n\n#### 1. 하이디 (2025.06.03.)\n\n좋은 정보 감사합니다\n\n"));
        assert!(md.ends_with("---\n\n"));
    }

    #[test]
    fn test_export_author_text_skips_travel_month() {
        let text = export_author_text("알프스러버", &[content(1, "a"), content(2, "b")], None);
        assert!(text.starts_with("알프스러버님의 게시글\n\n글 1\n\n"));
        assert!(text.contains("글 2\n\n제목: b\n"));
        assert!(!text.contains("여행 월"));
    }
}
