use thiserror::Error;

/// Conditions that stop a declaration pass.
///
/// Unknown types and malformed records never end up here; they degrade to
/// best-effort output instead.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write declarations: {0}")]
    Io(#[from] std::io::Error),

    /// The class lists a mixin the flattened hierarchy does not contain.
    #[error("class {class} includes mixin {mixin}, which is missing from its hierarchy")]
    MissingMixin { class: String, mixin: String },

    #[error("cyclic mixin inclusion while emitting {class}: {chain}")]
    MixinCycle { class: String, chain: String },
}

pub type Result<T> = std::result::Result<T, EmitError>;
