//! Error types for assembling the block graph

use thiserror::Error;

use crate::error::Span;

/// Errors that can occur while building a workspace from a description
#[derive(Debug, Error)]
pub enum ModelError {
    /// Two blocks share an id
    #[error("duplicate block id '{id}'")]
    DuplicateBlock { id: String, span: Option<Span> },

    /// Reference to a block id that was never declared
    #[error("unknown block '{id}'")]
    UnknownBlock {
        id: String,
        span: Option<Span>,
        suggestions: Vec<String>,
    },

    /// A block declares an Output connector next to a Previous or Next one
    #[error("block '{id}' cannot combine an output connector with previous or next")]
    ConflictingConnectors { id: String, span: Option<Span> },

    /// A block was attached to a Dummy input
    #[error("input '{input}' of block '{block}' is a dummy input and cannot hold a block")]
    DummyInputWithBlock {
        block: String,
        input: String,
        span: Option<Span>,
    },

    /// The attached block lacks the connector the slot requires
    #[error("block '{child}' needs a{} {expected} connector to attach to '{parent}'", if expected.starts_with('o') { "n" } else { "" })]
    MissingConnector {
        parent: String,
        child: String,
        expected: &'static str,
        span: Option<Span>,
    },

    /// The parent lacks the slot the child is attached to
    #[error("block '{parent}' has no {slot} to attach '{child}' to")]
    MissingSlot {
        parent: String,
        child: String,
        slot: String,
        span: Option<Span>,
    },

    /// A block is attached in more than one place
    #[error("block '{id}' is already attached to '{attached_to}'")]
    AlreadyAttached {
        id: String,
        attached_to: String,
        span: Option<Span>,
    },

    /// Input index past the end of the block's inputs
    #[error("block '{block}' has {len} inputs, no input at index {index}")]
    InputOutOfRange {
        block: String,
        index: usize,
        len: usize,
    },

    /// Blocks attached to each other in a loop
    #[error("cyclic block attachment: {}", cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },

    /// Colour string that is neither `#rgb`, `#rrggbb` nor a hue
    #[error("invalid colour '{value}' on block '{id}'")]
    InvalidColour {
        id: String,
        value: String,
        span: Option<Span>,
    },
}

impl ModelError {
    /// Create an unknown block error with suggestions
    pub fn unknown(id: impl Into<String>, span: Option<Span>, suggestions: Vec<String>) -> Self {
        Self::UnknownBlock {
            id: id.into(),
            span,
            suggestions,
        }
    }

    /// Create a missing connector error
    pub fn missing_connector(
        parent: impl Into<String>,
        child: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::MissingConnector {
            parent: parent.into(),
            child: child.into(),
            expected,
            span: None,
        }
    }

    /// Create an already attached error
    pub fn already_attached(id: impl Into<String>, attached_to: impl Into<String>) -> Self {
        Self::AlreadyAttached {
            id: id.into(),
            attached_to: attached_to.into(),
            span: None,
        }
    }

    /// Attach a source span to errors raised before the location was known
    pub fn with_span(mut self, at: Span) -> Self {
        match &mut self {
            Self::DuplicateBlock { span, .. }
            | Self::UnknownBlock { span, .. }
            | Self::ConflictingConnectors { span, .. }
            | Self::DummyInputWithBlock { span, .. }
            | Self::MissingConnector { span, .. }
            | Self::MissingSlot { span, .. }
            | Self::AlreadyAttached { span, .. }
            | Self::InvalidColour { span, .. } => {
                if span.is_none() {
                    *span = Some(at);
                }
            }
            Self::Cycle { .. } | Self::InputOutOfRange { .. } => {}
        }
        self
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::DuplicateBlock { span, .. }
            | Self::UnknownBlock { span, .. }
            | Self::ConflictingConnectors { span, .. }
            | Self::DummyInputWithBlock { span, .. }
            | Self::MissingConnector { span, .. }
            | Self::MissingSlot { span, .. }
            | Self::AlreadyAttached { span, .. }
            | Self::InvalidColour { span, .. } => span.as_ref(),
            Self::Cycle { .. } | Self::InputOutOfRange { .. } => None,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownBlock { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}
