/// Compute effective limit with precedence: local arg -> configured default.
#[must_use]
pub fn effective_limit(local: Option<u32>, configured: u32) -> usize {
    usize::try_from(local.unwrap_or(configured)).unwrap_or(usize::MAX)
}
