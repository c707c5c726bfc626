/// Build metadata embedded by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub revision: &'static str,
    pub tree: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

impl BuildMetadata {
    /// One-line description used by the `version` command.
    pub fn summary(&self) -> String {
        format!(
            "expense_core {} ({} {}, {} build, {})",
            self.version, self.revision, self.tree, self.profile, self.timestamp
        )
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        revision: option_env!("EXPENSE_CORE_BUILD_REVISION").unwrap_or("unknown"),
        tree: option_env!("EXPENSE_CORE_BUILD_TREE").unwrap_or("unknown"),
        timestamp: option_env!("EXPENSE_CORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        profile: option_env!("EXPENSE_CORE_BUILD_PROFILE").unwrap_or("unknown"),
    }
}
