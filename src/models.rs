//! Wire models for the remote feed API.
//!
//! Only the fields the core reads are modeled; unknown fields in server
//! responses are ignored. Everything is camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response from the session-creation and session-refresh endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Access token authorizing API calls.
    pub access_token: String,
    /// Refresh token, when the server issues one.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// The account that authored or reposted an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Stable decentralized identifier.
    pub did: String,
    /// Human-readable handle.
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Actor {
    /// Display name when set, otherwise the handle.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.handle)
    }
}

/// The authored record inside a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(rename = "$type")]
    pub record_type: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A post in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Record URI (`at://<did>/<collection>/<rkey>`).
    pub uri: String,
    /// Content identifier; stable for identical content.
    pub cid: String,
    pub author: Actor,
    pub record: PostRecord,
    #[serde(default)]
    pub reply_count: Option<u32>,
    #[serde(default)]
    pub repost_count: Option<u32>,
    #[serde(default)]
    pub like_count: Option<u32>,
    #[serde(default)]
    pub quote_count: Option<u32>,
    #[serde(default)]
    pub indexed_at: Option<DateTime<Utc>>,
}

/// Why an item appears in the feed (a repost, for instance).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    /// The actor who surfaced the item.
    pub by: Actor,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Reply context for an item that is a reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default)]
    pub grandparent_author: Option<Actor>,
}

/// A single feed entry. Each item may carry a post, reply context, a
/// repost reason, and a free-text feed context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default)]
    pub reply: Option<Reply>,
    #[serde(default)]
    pub reason: Option<Reason>,
    #[serde(default)]
    pub feed_context: Option<String>,
}

impl FeedItem {
    /// Derive the deterministic part of this item's identity.
    ///
    /// Priority: the post's content identifier, then the reposting actor's
    /// DID, then a non-empty feed context. Returns `None` when all three
    /// are absent; the synchronizer generates an identifier in that last
    /// resort so this function stays pure.
    pub fn stable_key(&self) -> Option<String> {
        if let Some(post) = &self.post {
            return Some(post.cid.clone());
        }
        if let Some(reason) = &self.reason {
            return Some(reason.by.did.clone());
        }
        match self.feed_context.as_deref() {
            Some(ctx) if !ctx.is_empty() => Some(ctx.to_string()),
            _ => None,
        }
    }
}

/// Response from the feed endpoint: one page plus the next cursor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    /// Pagination cursor for the next page; absent means the server has
    /// nothing further to hand out right now.
    #[serde(default)]
    pub cursor: Option<String>,
    pub feed: Vec<FeedItem>,
}

/// Translate a record URI (`at://<did>/<collection>/<rkey>`) into the
/// public web URL for the post. Returns `None` for URIs that are not
/// post records.
pub fn post_web_url(uri: &str) -> Option<String> {
    let components: Vec<&str> = uri.split('/').filter(|s| !s.is_empty()).collect();
    if components.len() < 4 || components[0] != "at:" || components[2] != "app.bsky.feed.post" {
        return None;
    }

    let did = components[1];
    let post_id = components[3];
    Some(format!("https://bsky.app/profile/{}/post/{}", did, post_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor_json(did: &str) -> String {
        format!(
            r#"{{"did":"{}","handle":"user.example.social","displayName":"User"}}"#,
            did
        )
    }

    fn post_json(uri: &str, cid: &str) -> String {
        format!(
            r#"{{
                "uri": "{}",
                "cid": "{}",
                "author": {},
                "record": {{
                    "$type": "app.bsky.feed.post",
                    "createdAt": "2025-02-22T10:30:00.000Z",
                    "text": "hello"
                }},
                "replyCount": 1,
                "likeCount": 5,
                "indexedAt": "2025-02-22T10:30:01.123Z"
            }}"#,
            uri,
            cid,
            actor_json("did:plc:author")
        )
    }

    #[test]
    fn test_session_response_deserialize() {
        let json = r#"{"accessToken":"access-123","refreshToken":"refresh-456"}"#;
        let response: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "access-123");
        assert_eq!(response.refresh_token, Some("refresh-456".to_string()));
    }

    #[test]
    fn test_session_response_without_refresh_token() {
        let json = r#"{"accessToken":"access-123"}"#;
        let response: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "access-123");
        assert!(response.refresh_token.is_none());
    }

    #[test]
    fn test_post_deserialize() {
        let post: Post =
            serde_json::from_str(&post_json("at://did:plc:author/app.bsky.feed.post/abc", "cid1"))
                .unwrap();
        assert_eq!(post.cid, "cid1");
        assert_eq!(post.author.did, "did:plc:author");
        assert_eq!(post.record.text, Some("hello".to_string()));
        assert_eq!(post.like_count, Some(5));
        assert!(post.indexed_at.is_some());
        assert!(post.repost_count.is_none());
    }

    #[test]
    fn test_actor_name_prefers_display_name() {
        let actor: Actor = serde_json::from_str(&actor_json("did:plc:a")).unwrap();
        assert_eq!(actor.name(), "User");

        let bare: Actor =
            serde_json::from_str(r#"{"did":"did:plc:b","handle":"bare.example"}"#).unwrap();
        assert_eq!(bare.name(), "bare.example");
    }

    #[test]
    fn test_timeline_response_deserialize() {
        let json = format!(
            r#"{{"cursor":"abc123","feed":[{{"post":{}}}]}}"#,
            post_json("at://did:plc:author/app.bsky.feed.post/abc", "cid1")
        );
        let response: TimelineResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response.cursor, Some("abc123".to_string()));
        assert_eq!(response.feed.len(), 1);
        assert!(response.feed[0].post.is_some());
    }

    #[test]
    fn test_timeline_response_null_cursor() {
        let json = r#"{"cursor":null,"feed":[]}"#;
        let response: TimelineResponse = serde_json::from_str(json).unwrap();
        assert!(response.cursor.is_none());

        let json = r#"{"feed":[]}"#;
        let response: TimelineResponse = serde_json::from_str(json).unwrap();
        assert!(response.cursor.is_none());
    }

    #[test]
    fn test_stable_key_prefers_post_cid() {
        let json = format!(
            r#"{{"post":{},"reason":{{"by":{}}},"feedContext":"ctx"}}"#,
            post_json("at://did:plc:author/app.bsky.feed.post/abc", "cid1"),
            actor_json("did:plc:reposter")
        );
        let item: FeedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item.stable_key(), Some("cid1".to_string()));
    }

    #[test]
    fn test_stable_key_falls_back_to_reposter_did() {
        let json = format!(
            r#"{{"reason":{{"by":{}}},"feedContext":"ctx"}}"#,
            actor_json("did:plc:reposter")
        );
        let item: FeedItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item.stable_key(), Some("did:plc:reposter".to_string()));
    }

    #[test]
    fn test_stable_key_falls_back_to_feed_context() {
        let item: FeedItem = serde_json::from_str(r#"{"feedContext":"ranked-by-engagement"}"#)
            .unwrap();
        assert_eq!(item.stable_key(), Some("ranked-by-engagement".to_string()));
    }

    #[test]
    fn test_stable_key_empty_context_is_none() {
        let item: FeedItem = serde_json::from_str(r#"{"feedContext":""}"#).unwrap();
        assert_eq!(item.stable_key(), None);

        let bare: FeedItem = serde_json::from_str("{}").unwrap();
        assert_eq!(bare.stable_key(), None);
    }

    #[test]
    fn test_post_web_url() {
        assert_eq!(
            post_web_url("at://did:plc:abc123/app.bsky.feed.post/3k44aaa").as_deref(),
            Some("https://bsky.app/profile/did:plc:abc123/post/3k44aaa")
        );
    }

    #[test]
    fn test_post_web_url_rejects_non_post_records() {
        assert!(post_web_url("at://did:plc:abc/app.bsky.feed.like/xyz").is_none());
        assert!(post_web_url("https://example.com/not-an-at-uri").is_none());
        assert!(post_web_url("at://did:plc:abc").is_none());
        assert!(post_web_url("").is_none());
    }
}
