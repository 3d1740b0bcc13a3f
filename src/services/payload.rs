//! Typed content payload codec. Every node stores its payload in a single
//! opaque string column; this module is the only place that interprets it.

use crate::errors::{AppError, AppResult};
use crate::models::domain::{ContentKind, QuizPayload};

/// Decoded form of a node's `content` column, one variant per kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentPayload {
    Text {
        html: String,
    },
    Video {
        url: String,
        /// None when the host failed allow-list validation; the renderer
        /// shows an "unsupported for security reasons" notice instead.
        embed_url: Option<String>,
    },
    Audio {
        url: String,
        source_url: Option<String>,
    },
    H5p {
        embed_id: String,
    },
    Quiz(QuizPayload),
}

impl ContentPayload {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentPayload::Text { .. } => ContentKind::Text,
            ContentPayload::Video { .. } => ContentKind::Video,
            ContentPayload::Audio { .. } => ContentKind::Audio,
            ContentPayload::H5p { .. } => ContentKind::H5p,
            ContentPayload::Quiz(_) => ContentKind::Quiz,
        }
    }
}

/// Marker for quiz JSON that was stored under a TEXT tag by the legacy
/// editor.
const QUIZ_SNIFF_MARKER: &str = "\"questions\":[";

const VIDEO_ALLOWED_HOSTS: &[&str] = &[
    "www.youtube.com",
    "youtube.com",
    "youtu.be",
    "www.youtube-nocookie.com",
    "vimeo.com",
    "player.vimeo.com",
];

const AUDIO_ALLOWED_HOSTS: &[&str] = &["soundcloud.com", "w.soundcloud.com", "on.soundcloud.com"];

/// Serializes a payload back into the string column plus its declared kind.
pub fn encode(payload: &ContentPayload) -> AppResult<(ContentKind, String)> {
    let raw = match payload {
        ContentPayload::Text { html } => html.clone(),
        ContentPayload::Video { url, .. } => url.clone(),
        ContentPayload::Audio { url, .. } => url.clone(),
        ContentPayload::H5p { embed_id } => embed_id.clone(),
        ContentPayload::Quiz(quiz) => serde_json::to_string(quiz)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize quiz: {}", e)))?,
    };
    Ok((payload.kind(), raw))
}

/// Interprets a stored `content` string according to the node's declared
/// kind.
pub fn decode(kind: ContentKind, raw: &str) -> AppResult<ContentPayload> {
    match kind {
        ContentKind::Text => {
            if raw.contains(QUIZ_SNIFF_MARKER) {
                if let Ok(quiz) = serde_json::from_str::<QuizPayload>(raw) {
                    log::warn!("TEXT node carries quiz JSON; rendering as quiz (legacy data)");
                    return Ok(ContentPayload::Quiz(quiz));
                }
            }
            Ok(ContentPayload::Text {
                html: raw.to_string(),
            })
        }
        ContentKind::Video => {
            let embed_url = match video_embed_url(raw) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::warn!("video URL rejected: {}", err);
                    None
                }
            };
            Ok(ContentPayload::Video {
                url: raw.to_string(),
                embed_url,
            })
        }
        ContentKind::Audio => {
            let source_url = match audio_source_url(raw) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::warn!("audio URL rejected: {}", err);
                    None
                }
            };
            Ok(ContentPayload::Audio {
                url: raw.to_string(),
                source_url,
            })
        }
        ContentKind::H5p => Ok(ContentPayload::H5p {
            embed_id: raw.to_string(),
        }),
        ContentKind::Quiz => {
            let quiz: QuizPayload = serde_json::from_str(raw)
                .map_err(|e| AppError::MalformedPayload(format!("Invalid quiz JSON: {}", e)))?;
            Ok(ContentPayload::Quiz(quiz))
        }
    }
}

/// Builds a safe embed URL for an allow-listed video host. Anything else is
/// an `UnsafeUrl` rejection, never a best-effort embed.
pub fn video_embed_url(url: &str) -> AppResult<String> {
    let host = allowed_host(url, VIDEO_ALLOWED_HOSTS)?;

    match host {
        "youtu.be" => {
            let id = first_path_segment(url)
                .filter(|id| is_youtube_id(id))
                .ok_or_else(|| AppError::UnsafeUrl(format!("Unrecognized YouTube URL: {}", url)))?;
            Ok(format!("https://www.youtube.com/embed/{}", id))
        }
        "youtube.com" | "www.youtube.com" | "www.youtube-nocookie.com" => {
            if let Some(id) = query_param(url, "v").filter(|id| is_youtube_id(id)) {
                return Ok(format!("https://www.youtube.com/embed/{}", id));
            }
            if let Some(rest) = path_after(url, "/embed/").filter(|id| is_youtube_id(id)) {
                return Ok(format!("https://www.youtube.com/embed/{}", rest));
            }
            Err(AppError::UnsafeUrl(format!(
                "Unrecognized YouTube URL: {}",
                url
            )))
        }
        "vimeo.com" => {
            let id = first_path_segment(url)
                .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| AppError::UnsafeUrl(format!("Unrecognized Vimeo URL: {}", url)))?;
            Ok(format!("https://player.vimeo.com/video/{}", id))
        }
        "player.vimeo.com" => {
            let id = path_after(url, "/video/")
                .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| AppError::UnsafeUrl(format!("Unrecognized Vimeo URL: {}", url)))?;
            Ok(format!("https://player.vimeo.com/video/{}", id))
        }
        _ => Err(AppError::UnsafeUrl(format!(
            "Video host '{}' is not allow-listed",
            host
        ))),
    }
}

/// Same allow-list pattern for audio URLs. Allow-listed hosts pass through
/// unchanged for the client-side widget.
pub fn audio_source_url(url: &str) -> AppResult<String> {
    allowed_host(url, AUDIO_ALLOWED_HOSTS)?;
    Ok(url.to_string())
}

fn allowed_host<'a>(url: &'a str, allow_list: &[&str]) -> AppResult<&'a str> {
    let host = host_of(url)
        .ok_or_else(|| AppError::UnsafeUrl(format!("Not a valid https URL: {}", url)))?;

    if allow_list.contains(&host) {
        Ok(host)
    } else {
        Err(AppError::UnsafeUrl(format!(
            "Host '{}' is not allow-listed",
            host
        )))
    }
}

/// Host of an https URL. Plain http, other schemes, userinfo tricks and
/// explicit ports all fail the parse.
fn host_of(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = &rest[..end];
    if host.is_empty() || host.contains('@') || host.contains(':') {
        return None;
    }
    Some(host)
}

fn first_path_segment(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://")?;
    let path = &rest[rest.find('/')?..];
    let segment = path.trim_start_matches('/');
    let end = segment.find(['/', '?', '#']).unwrap_or(segment.len());
    Some(&segment[..end])
}

fn path_after<'a>(url: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = url.strip_prefix("https://")?;
    let path_start = rest.find('/')?;
    let path = &rest[path_start..];
    let after = path.strip_prefix(prefix)?;
    let end = after.find(['/', '?', '#']).unwrap_or(after.len());
    Some(&after[..end])
}

fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key == name {
            return Some(value);
        }
    }
    None
}

fn is_youtube_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
