//! Serializer options.

/// Default annotation trigger.
pub const DEFAULT_TRIGGER: &str = "#";
/// Default annotation separator.
pub const DEFAULT_SEPARATOR: &str = " ";

/// Plain-data serializer options.
///
/// Hooks (entity transform, property override) are set on
/// [`DraftSerializer`](crate::DraftSerializer) directly since they are not data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Trigger-based annotation detection; `None` disables it.
    pub annotations: Option<AnnotationConfig>,
    /// Emit `dir="auto"` on block and list item tags.
    pub directional: bool,
}

/// What a detected trigger token becomes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AnnotationKind {
    /// Every non-empty token is a hashtag.
    #[default]
    Hashtag,
    /// Only tokens matching a suggestion by exact text are mentions.
    Mention {
        /// Allowed mention targets.
        suggestions: Vec<MentionSuggestion>,
    },
}

/// A mention target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionSuggestion {
    /// Token text after the trigger.
    pub value: String,
    /// Link target; the token text is used when absent.
    pub url: Option<String>,
}

impl MentionSuggestion {
    /// Create a suggestion without a URL.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            url: None,
        }
    }

    /// Set the link target.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Trigger/separator pattern for annotation detection.
///
/// A token starts with `trigger` at the start of the text or right after
/// `separator`, and runs to the next `separator` or the end of the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationConfig {
    /// Token kind.
    pub kind: AnnotationKind,
    /// Token prefix, `#` by default.
    pub trigger: String,
    /// Token delimiter, a single space by default.
    pub separator: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self::hashtag()
    }
}

impl AnnotationConfig {
    /// Hashtag detection with the default `#` trigger and space separator.
    #[must_use]
    pub fn hashtag() -> Self {
        Self {
            kind: AnnotationKind::Hashtag,
            trigger: DEFAULT_TRIGGER.to_owned(),
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }

    /// Mention detection with an `@` trigger.
    #[must_use]
    pub fn mention(suggestions: Vec<MentionSuggestion>) -> Self {
        Self {
            kind: AnnotationKind::Mention { suggestions },
            trigger: "@".to_owned(),
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }

    /// Override the trigger. An empty trigger keeps the default.
    #[must_use]
    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        let trigger = trigger.into();
        if !trigger.is_empty() {
            self.trigger = trigger;
        }
        self
    }

    /// Override the separator. An empty separator keeps the default.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.separator = separator;
        }
        self
    }
}
