//! Message templates for outbound notifications.
//!
//! Templates are plain strings with `{placeholder}` fields drawn from a
//! closed set (`actor`, `actor_url`, `repo`, `repo_url`, `count`). They are
//! parsed when the repository registry is loaded, so an unknown or unclosed
//! placeholder is a configuration error rather than a delivery-time failure.

use thiserror::Error;

use crate::types::NotificationJob;

/// Default star message (Slack `<url|label>` link markup).
pub const DEFAULT_STAR_FORMAT: &str = "<{actor_url}|{actor}> starred <{repo_url}|{repo}> ★ {count}";

/// Default fork message.
pub const DEFAULT_FORK_FORMAT: &str = "<{actor_url}|{actor}> forked <{repo_url}|{repo}> ⑂ {count}";

/// Errors raised while parsing a template string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),

    #[error("unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),
}

/// The fields a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Actor,
    ActorUrl,
    Repo,
    RepoUrl,
    Count,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "actor" => Some(Field::Actor),
            "actor_url" => Some(Field::ActorUrl),
            "repo" => Some(Field::Repo),
            "repo_url" => Some(Field::RepoUrl),
            "count" => Some(Field::Count),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed, validated message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Parse a template string, rejecting placeholders outside the known set.
    pub fn parse(input: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = input;
        let mut offset = 0usize;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or(TemplateError::UnclosedPlaceholder(offset + open))?;
            let name = &after[..close];
            let field = Field::from_name(name)
                .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(field));
            offset += open + 1 + close + 1;
            rest = &after[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Render the template against a notification job.
    pub fn render(&self, job: &NotificationJob) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Actor) => out.push_str(&job.actor_name),
                Segment::Field(Field::ActorUrl) => out.push_str(&job.actor_url),
                Segment::Field(Field::Repo) => out.push_str(&job.repo_full_name),
                Segment::Field(Field::RepoUrl) => out.push_str(&job.repo_url),
                Segment::Field(Field::Count) => out.push_str(&job.count.to_string()),
            }
        }
        out
    }

    /// The built-in star template.
    pub fn default_star() -> Self {
        Self::parse(DEFAULT_STAR_FORMAT).expect("default star template is valid")
    }

    /// The built-in fork template.
    pub fn default_fork() -> Self {
        Self::parse(DEFAULT_FORK_FORMAT).expect("default fork template is valid")
    }
}
