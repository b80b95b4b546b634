use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No object reachable from the receiver holds a slot with this name.
    #[error("message '{0}' not found in slots or parent slots")]
    MessageNotFound(String),

    /// The receiver has no direct slot with this name.
    #[error("slot '{0}' does not exist")]
    SlotNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
