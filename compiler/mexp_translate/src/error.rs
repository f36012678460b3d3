use mexp_ir::{Name, Span};

/// Translation failure.
///
/// Resolution rules these out for a [`Resolved`](mexp_resolve::Resolved)
/// program; seeing one means the two phases disagree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("`{name}` has no binding in the current frame (at {span:?})")]
    UnboundIdentifier { name: Name, span: Span },

    #[error("call to unregistered function `{name}` (at {span:?})")]
    UnknownFunction { name: Name, span: Span },

    #[error("statement used where a value is required")]
    EffectAsValue,

    #[error("frame of `{function}` has no formal at index {index}")]
    MissingFormal { function: Name, index: usize },
}
