use std::collections::BTreeMap;

use async_trait::async_trait;
use postgrest::Postgrest;
use serde_json::json;

use crate::error::ServiceError;
use crate::models::{
    is_valid_post_month, CommunityContent, ContentFilter, PostComment, PostContent, PostDetails,
};
use crate::supabase;

const CONTENT_TABLE: &str = "swissfriends_content_all";
const POST_CONTENTS_TABLE: &str = "swissfriends_post_contents";
const POST_COMMENTS_TABLE: &str = "swissfriends_post_comments";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list(&self, filter: &ContentFilter) -> Result<Vec<CommunityContent>, ServiceError>;
    async fn by_ids(&self, ids: &[i64]) -> Result<Vec<CommunityContent>, ServiceError>;
    async fn by_author(&self, author: &str) -> Result<Vec<CommunityContent>, ServiceError>;
    async fn update_post_month(&self, id: i64, post_month: Option<i32>) -> Result<(), ServiceError>;
    async fn post_details(&self, ids: &[i64]) -> Result<BTreeMap<i64, PostDetails>, ServiceError>;
}

/// Groups bodies and comments per post. Every requested post gets an entry,
/// comments keep their incoming order.
pub fn group_details(
    ids: &[i64],
    contents: Vec<PostContent>,
    comments: Vec<PostComment>,
) -> BTreeMap<i64, PostDetails> {
    let mut grouped: BTreeMap<i64, PostDetails> =
        ids.iter().map(|id| (*id, PostDetails::default())).collect();

    for content in contents {
        grouped.entry(content.id).or_default().content = content.content;
    }
    for comment in comments {
        grouped.entry(comment.post_id).or_default().comments.push(comment);
    }
    grouped
}

pub fn exclude_qa(contents: Vec<CommunityContent>) -> Vec<CommunityContent> {
    contents.into_iter().filter(|c| !c.is_qa()).collect()
}

fn id_strings(ids: &[i64]) -> Vec<String> {
    ids.iter().map(i64::to_string).collect()
}

pub struct SupabaseContentStore {
    client: Postgrest,
}

impl SupabaseContentStore {
    pub fn new(client: Postgrest) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentStore for SupabaseContentStore {
    async fn list(&self, filter: &ContentFilter) -> Result<Vec<CommunityContent>, ServiceError> {
        let mut query = self
            .client
            .from(CONTENT_TABLE)
            .select("*")
            .gte("date", &filter.start_date)
            .lte("date", &filter.end_date);

        if !filter.categories.is_empty() {
            query = query.in_("category", &filter.categories);
        }
        if let Some(author) = filter.excluded_author.as_deref() {
            query = query.neq("author", author);
        }

        supabase::read_json(query.order(filter.order.as_postgrest())).await
    }

    async fn by_ids(&self, ids: &[i64]) -> Result<Vec<CommunityContent>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        supabase::read_json(
            self.client
                .from(CONTENT_TABLE)
                .select("*")
                .in_("id", id_strings(ids))
                .order("date.desc"),
        )
        .await
    }

    async fn by_author(&self, author: &str) -> Result<Vec<CommunityContent>, ServiceError> {
        supabase::read_json(
            self.client
                .from(CONTENT_TABLE)
                .select("*")
                .eq("author", author)
                .order("date.desc"),
        )
        .await
    }

    async fn update_post_month(&self, id: i64, post_month: Option<i32>) -> Result<(), ServiceError> {
        if !is_valid_post_month(post_month) {
            return Err(ServiceError::Invalid(format!(
                "post_month must be empty or between 0 and 12, got {post_month:?}"
            )));
        }

        let body = json!({ "post_month": post_month }).to_string();
        supabase::send(
            self.client
                .from(CONTENT_TABLE)
                .update(body)
                .eq("id", id.to_string()),
        )
        .await?
        .error_for_status()?;

        log::info!("Updated post_month of {id} to {post_month:?}");
        Ok(())
    }

    async fn post_details(&self, ids: &[i64]) -> Result<BTreeMap<i64, PostDetails>, ServiceError> {
        if ids.is_empty() {
            return Ok(BTreeMap::new());
        }

        let contents: Vec<PostContent> = supabase::read_json(
            self.client
                .from(POST_CONTENTS_TABLE)
                .select("*")
                .in_("id", id_strings(ids)),
        )
        .await?;

        let comments: Vec<PostComment> = supabase::read_json(
            self.client
                .from(POST_COMMENTS_TABLE)
                .select("*")
                .in_("post_id", id_strings(ids))
                .order("comment_order.asc"),
        )
        .await?;

        Ok(group_details(ids, contents, comments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(post_id: i64, order: i32) -> PostComment {
        PostComment {
            post_id,
            comment_author: Some(format!("작성자{order}")),
            comment_date: None,
            comment_text: Some(format!("댓글 {order}")),
            comment_order: Some(order),
        }
    }

    #[test]
    fn test_group_details_per_post() {
        let grouped = group_details(
            &[1, 2, 3],
            vec![
                PostContent { id: 1, content: Some("본문 1".into()) },
                PostContent { id: 2, content: None },
            ],
            vec![comment(1, 1), comment(2, 1), comment(1, 2)],
        );

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[&1].content.as_deref(), Some("본문 1"));
        assert_eq!(
            grouped[&1].comments.iter().map(|c| c.comment_order).collect::<Vec<_>>(),
            vec![Some(1), Some(2)]
        );
        assert_eq!(grouped[&2].comments.len(), 1);
        assert_eq!(grouped[&3], PostDetails::default());
    }

    #[test]
    fn test_exclude_qa() {
        let make = |id, category: &str| CommunityContent {
            id,
            title: format!("글 {id}"),
            category: Some(category.to_string()),
            author: None,
            date: None,
            view_count: None,
            comments: None,
            url: None,
            post_month: None,
        };
        let kept = exclude_qa(vec![
            make(1, "❓질문게시판 Q&A"),
            make(2, "★루체른★"),
            make(3, "여행 질문 Q&A"),
        ]);
        assert_eq!(kept.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    }
}
