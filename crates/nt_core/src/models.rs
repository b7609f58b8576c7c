use std::fmt;

use async_trait::async_trait;

use crate::Result;

/// Which kind of report the generator is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// A single long-form article in free markdown.
    Narrative,
    /// Category headers and numbered items that the parser can split.
    Structured,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPrompt {
    pub style: ReportStyle,
    pub text: String,
}

impl ReportPrompt {
    pub fn narrative(text: impl Into<String>) -> Self {
        Self {
            style: ReportStyle::Narrative,
            text: text.into(),
        }
    }

    pub fn structured(text: impl Into<String>) -> Self {
        Self {
            style: ReportStyle::Structured,
            text: text.into(),
        }
    }
}

/// Output of a report generator.
///
/// Generators that know their payload hand it over as `Text`. Generators
/// that return a response object use `Wrapped`, naming the object type in
/// `kind`. Untyped producers that only give back a stringified object also
/// end up as `Text`; the parser's envelope heuristic deals with those.
#[derive(Debug, Clone, PartialEq)]
pub enum RawReport {
    Text(String),
    Wrapped { kind: String, content: String },
}

impl RawReport {
    pub fn wrapped(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Wrapped {
            kind: kind.into(),
            content: content.into(),
        }
    }
}

impl From<String> for RawReport {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RawReport {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Renders the report the way a response object prints itself, with the
/// payload escaped inside a `content="..."` field.
///
/// Reading this form back is lossy for content holding a literal backslash
/// followed by `n`: the unwrapper decodes `\n` before `\\`, so `C:\new`
/// comes back as `C:\` and a line break. Use [`RawReport::Wrapped`] directly
/// when the exact content matters.
impl fmt::Display for RawReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawReport::Text(text) => f.write_str(text),
            RawReport::Wrapped { kind, content } => {
                let escaped = content
                    .replace('\\', "\\\\")
                    .replace('"', "\\\"")
                    .replace('\n', "\\n");
                write!(f, "{}(content=\"{}\")", kind, escaped)
            }
        }
    }
}

#[async_trait]
pub trait ReportGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Produce a raw news report for the given prompt
    async fn generate(&self, prompt: &ReportPrompt) -> Result<RawReport>;
}
