//! Git hook stages a hook can be bound to

/// Stages understood by pre-commit style runners
pub const KNOWN_STAGES: &[&str] = &[
    "pre-commit",
    "pre-merge-commit",
    "pre-push",
    "prepare-commit-msg",
    "commit-msg",
    "post-checkout",
    "post-commit",
    "post-merge",
    "post-rewrite",
    "pre-rebase",
    "manual",
];

/// Map legacy stage names onto their current spelling.
///
/// Returns `None` for names that are not stages at all.
pub fn normalize_stage(stage: &str) -> Option<&'static str> {
    let canonical = match stage {
        "commit" => "pre-commit",
        "push" => "pre-push",
        "merge-commit" => "pre-merge-commit",
        other => other,
    };
    KNOWN_STAGES.iter().copied().find(|known| *known == canonical)
}
