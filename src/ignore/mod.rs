//! Ignore-pattern resolution and per-directory filtering
//!
//! Patterns come from the repository's `.gitignore`, the user's global git
//! excludes file and a built-in supplementary list. They are merged into one
//! flat [`PatternSet`](crate::core::PatternSet) and matched against bare entry
//! names at every directory level. Unlike git itself there is no anchoring,
//! negation or per-directory scoping.

pub mod filter;
pub mod git_config;
pub mod parser;
pub mod resolver;

// Re-export commonly used items
pub use filter::{excluded_entries, DirectoryFilter};
pub use git_config::{ExcludesLookup, GitConfigLookup, NoGlobalExcludes};
pub use parser::read_patterns;
pub use resolver::{PatternResolver, SUPPLEMENTARY_PATTERNS};
