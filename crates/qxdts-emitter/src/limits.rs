//! Centralized limits for the declaration emitter.

/// Maximum number of substitution passes when rewriting a legacy type name.
///
/// Each pass replaces every mapping key found in the type string; a mapping
/// value may itself contain a key, so passes repeat until nothing changes.
/// A configuration with a mapping cycle (`A -> B`, `B -> A`) never settles,
/// so rewriting stops here and keeps the last result.
///
/// ```text
/// "Boolean|Map"  ->  "boolean|Record<string, any>"   (1 pass + 1 confirming pass)
/// ```
pub const MAX_TYPE_REWRITE_PASSES: usize = 32;
