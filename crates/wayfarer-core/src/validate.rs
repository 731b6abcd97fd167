//! Context presence checks shared by every agent.

use tracing::warn;

use wayfarer_contracts::{
    agent::AgentKind,
    context::RequiredFields,
    error::{WayfarerError, WayfarerResult},
};

/// Fail with `MissingContext` if `ctx` is missing any required field.
///
/// The error lists every missing field at once so the caller can fix the
/// context in one pass.
pub fn require_complete<C>(agent: AgentKind, ctx: &C) -> WayfarerResult<()>
where
    C: RequiredFields + ?Sized,
{
    let missing = ctx.missing_fields();
    if missing.is_empty() {
        return Ok(());
    }

    warn!(
        agent = %agent,
        missing = %missing.join(", "),
        "agent context incomplete"
    );

    Err(WayfarerError::MissingContext {
        agent,
        fields: missing.into_iter().map(str::to_string).collect(),
    })
}
