use crate::project::ActionKind;
use thiserror::Error;

/// Structural defects in an action sequence. The legacy converter indexed
/// argument lists unchecked; here an underflowing argument list is rejected
/// instead of read out of bounds.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(
        "Action {position} ({kind:?}) is ill-formed: expected at least {expected} argument(s), found {found}"
    )]
    MissingArgument {
        position: usize,
        kind: ActionKind,
        expected: usize,
        found: usize,
    },
}
