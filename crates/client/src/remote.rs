use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use domain::protocol::{BookmarkRequest, CountLikesRequest, LikeRequest, PostCommentRequest};
use domain::{CommentId, CommentView, Slug};
use reqwest::{RequestBuilder, Response, Url};
use tracing::debug;

use crate::traits::RemoteApi;

/// [`RemoteApi`] over the JSON HTTP service.
#[derive(Clone)]
pub struct HttpRemote {
    http: reqwest::Client,
    base_url: String,
    session_token: Option<String>,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>, session_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_token,
        }
    }

    // 每段单独做百分号编码
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Base URL {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let req = match &self.session_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Request failed with {}: {}", status, body);
        }
        Ok(resp)
    }
}

#[async_trait]
impl RemoteApi for HttpRemote {
    async fn post_comment(
        &self,
        comment: &str,
        slug: &Slug,
        parent_id: Option<CommentId>,
    ) -> Result<()> {
        let body = PostCommentRequest {
            comment: comment.to_string(),
            slug: slug.clone(),
            parent_id,
        };
        let url = self.endpoint(&["api", "comments"])?;
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        let url = self.endpoint(&["api", "comments", &id.to_string()])?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn comments_by_slug(&self, slug: &Slug) -> Result<Vec<CommentView>> {
        let url = self.endpoint(&["api", "comments", slug.as_str()])?;
        let resp = self.send(self.http.get(url)).await?;
        let comments: Vec<CommentView> = resp.json().await?;
        debug!("Fetched {} comment(s) for {}", comments.len(), slug);
        Ok(comments)
    }

    async fn like_comment(&self, comment_id: CommentId, like: bool) -> Result<()> {
        let url = self.endpoint(&["api", "comments", &comment_id.to_string(), "like"])?;
        self.send(self.http.put(url).json(&LikeRequest { like })).await?;
        Ok(())
    }

    async fn delete_like(&self, comment_id: CommentId) -> Result<()> {
        let url = self.endpoint(&["api", "comments", &comment_id.to_string(), "like"])?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn count_likes(&self, id: CommentId, like_count: i64) -> Result<()> {
        let url = self.endpoint(&["api", "comments", &id.to_string(), "like-count"])?;
        self.send(self.http.put(url).json(&CountLikesRequest { like_count }))
            .await?;
        Ok(())
    }

    async fn like_slug(&self, slug: &Slug, like: bool) -> Result<()> {
        let url = self.endpoint(&["api", "slugs", slug.as_str(), "like"])?;
        self.send(self.http.put(url).json(&LikeRequest { like })).await?;
        Ok(())
    }

    async fn delete_like_slug(&self, slug: &Slug) -> Result<()> {
        let url = self.endpoint(&["api", "slugs", slug.as_str(), "like"])?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn bookmark_slug(&self, slug: &Slug, bookmark: bool) -> Result<()> {
        let url = self.endpoint(&["api", "slugs", slug.as_str(), "bookmark"])?;
        self.send(self.http.put(url).json(&BookmarkRequest { bookmark }))
            .await?;
        Ok(())
    }

    async fn delete_bookmark_slug(&self, slug: &Slug) -> Result<()> {
        let url = self.endpoint(&["api", "slugs", slug.as_str(), "bookmark"])?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let remote = HttpRemote::new("http://127.0.0.1:3000/", None);
        assert_eq!(
            remote.endpoint(&["api", "comments"]).unwrap().as_str(),
            "http://127.0.0.1:3000/api/comments"
        );
    }

    #[test]
    fn slug_segments_are_percent_encoded() {
        let remote = HttpRemote::new("http://127.0.0.1:3000", None);
        let slug = Slug::new("Café-Notes?v=2").unwrap();
        let url = remote.endpoint(&["api", "slugs", slug.as_str(), "like"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:3000/api/slugs/Caf%C3%A9-Notes%3Fv=2/like"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let remote = HttpRemote::new("http://example.com/rafiki/", None);
        assert_eq!(
            remote.endpoint(&["api", "comments"]).unwrap().as_str(),
            "http://example.com/rafiki/api/comments"
        );
    }
}
