use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kind prefix of link fullnames.
pub const LINK_KIND: &str = "t3";

/// A single link (post) as returned by the listing endpoints.
///
/// Missing fields take their default and `null` strings or counts decode as
/// empty/zero. The fields whose shape the API does not pin down are kept as
/// raw [`Value`]s.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,

    #[serde(deserialize_with = "nullable")]
    pub author: String,
    #[serde(deserialize_with = "nullable")]
    pub approved_by: String,
    #[serde(deserialize_with = "nullable")]
    pub banned_by: String,

    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub selftext: String,
    #[serde(deserialize_with = "nullable")]
    pub selftext_html: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub domain: String,
    #[serde(deserialize_with = "nullable")]
    pub permalink: String,
    #[serde(deserialize_with = "nullable")]
    pub thumbnail: String,
    #[serde(deserialize_with = "nullable")]
    pub subreddit: String,
    #[serde(deserialize_with = "nullable")]
    pub subreddit_id: String,

    #[serde(deserialize_with = "nullable")]
    pub is_self: bool,
    #[serde(deserialize_with = "nullable")]
    pub archived: bool,
    #[serde(deserialize_with = "nullable")]
    pub locked: bool,
    #[serde(deserialize_with = "nullable")]
    pub stickied: bool,
    #[serde(deserialize_with = "nullable")]
    pub over_18: bool,
    #[serde(deserialize_with = "nullable")]
    pub quarantine: bool,
    #[serde(deserialize_with = "nullable")]
    pub clicked: bool,
    #[serde(deserialize_with = "nullable")]
    pub hidden: bool,
    #[serde(deserialize_with = "nullable")]
    pub saved: bool,
    #[serde(deserialize_with = "nullable")]
    pub visited: bool,
    /// `true` once the author edited the post. The API reports the edit time
    /// instead of `true`; that timestamp is not kept.
    #[serde(deserialize_with = "edited_flag")]
    pub edited: bool,
    #[serde(deserialize_with = "nullable")]
    pub contest_mode: bool,
    #[serde(deserialize_with = "nullable")]
    pub hide_score: bool,

    #[serde(deserialize_with = "nullable")]
    pub score: i64,
    #[serde(deserialize_with = "nullable")]
    pub ups: i64,
    #[serde(deserialize_with = "nullable")]
    pub downs: i64,
    #[serde(deserialize_with = "nullable")]
    pub num_comments: i64,
    #[serde(deserialize_with = "nullable")]
    pub num_reports: i64,
    #[serde(deserialize_with = "nullable")]
    pub gilded: i64,

    // Both are epoch seconds; `created` is offset by the server, `created_utc` is not.
    #[serde(deserialize_with = "epoch_seconds")]
    pub created: i64,
    #[serde(deserialize_with = "epoch_seconds")]
    pub created_utc: i64,

    #[serde(deserialize_with = "nullable")]
    pub author_flair_css_class: String,
    #[serde(deserialize_with = "nullable")]
    pub author_flair_text: String,
    #[serde(deserialize_with = "nullable")]
    pub link_flair_css_class: String,
    #[serde(deserialize_with = "nullable")]
    pub link_flair_text: String,
    #[serde(deserialize_with = "nullable")]
    pub distinguished: String,
    #[serde(deserialize_with = "nullable")]
    pub suggested_sort: String,
    pub removal_reason: Value,

    pub likes: Likes,

    pub media: Option<Media>,
    pub media_embed: Value,
    pub secure_media: Value,
    pub secure_media_embed: Value,
    #[serde(deserialize_with = "nullable")]
    pub mod_reports: Vec<Value>,
    #[serde(deserialize_with = "nullable")]
    pub report_reasons: Vec<Value>,
    #[serde(deserialize_with = "nullable")]
    pub user_reports: Vec<Value>,
}

impl Link {
    /// The `t3_`-prefixed fullname built from `id`.
    pub fn fullname(&self) -> String {
        link_fullname(&self.id)
    }
}

pub fn link_fullname(id: &str) -> String {
    format!("{}_{}", LINK_KIND, id)
}

/// The current user's vote on a link. Encoded on the wire as
/// `true`, `false` or `null`.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Likes {
    Upvoted,
    Downvoted,
    #[default]
    NoVote,
}

impl From<Option<bool>> for Likes {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Likes::Upvoted,
            Some(false) => Likes::Downvoted,
            None => Likes::NoVote,
        }
    }
}

impl From<Likes> for Option<bool> {
    fn from(value: Likes) -> Self {
        match value {
            Likes::Upvoted => Some(true),
            Likes::Downvoted => Some(false),
            Likes::NoVote => None,
        }
    }
}

/// Embedded media metadata attached to a link.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Media {
    /// Provider domain, e.g. `youtube.com`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub oembed: Option<OEmbed>,
    /// Hosted video descriptor, left undecoded.
    pub reddit_video: Option<Value>,
}

/// oEmbed description of third-party media.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct OEmbed {
    pub provider_name: Option<String>,
    pub provider_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub html: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub thumbnail_width: Option<u32>,
    pub thumbnail_height: Option<u32>,
    pub version: Option<String>,
}

/// One page of a link listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkPage {
    /// Links in the order the server ranked them.
    pub links: Vec<Link>,
    /// Cursor for the following page, `None` on the last page.
    pub after: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub(crate) struct Child {
    pub(crate) kind: String,
    pub(crate) data: Link,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub(crate) struct ListingData {
    #[serde(default)]
    pub(crate) modhash: Option<String>,
    pub(crate) children: Vec<Child>,
    #[serde(default)]
    pub(crate) after: Option<String>,
    #[serde(default)]
    pub(crate) before: Value,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub(crate) struct ListingResponse {
    pub(crate) kind: String,
    pub(crate) data: ListingData,
}

impl From<ListingResponse> for LinkPage {
    fn from(response: ListingResponse) -> Self {
        let data = response.data;
        LinkPage {
            links: data.children.into_iter().map(|child| child.data).collect(),
            after: data.after.filter(|after| !after.is_empty()),
        }
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Epoch {
        Whole(i64),
        Fractional(f64),
    }

    Ok(match Option::<Epoch>::deserialize(deserializer)? {
        Some(Epoch::Whole(secs)) => secs,
        Some(Epoch::Fractional(secs)) => secs as i64,
        None => 0,
    })
}

fn edited_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Edited {
        Flag(bool),
        At(f64),
    }

    Ok(match Option::<Edited>::deserialize(deserializer)? {
        Some(Edited::Flag(edited)) => edited,
        Some(Edited::At(_)) => true,
        None => false,
    })
}
