//! The protocol-level fault type.
//!
//! A handler that hits a negative case (no such group, bad argument count,
//! policy denial…) returns `Ok(true)` after writing the matching reply; it
//! never returns `Err` for those. `ProtocolFault` exists for the one
//! remaining path §7 reserves for it: internal faults severe enough that
//! the engine should log them and fall back to a generic 500/403, and for
//! tagging the numeric code a lower layer already decided on so the engine
//! doesn't have to re-derive it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolFault {
    #[error("syntax error")]
    Syntax,

    #[error("unknown command")]
    UnknownCommand,

    #[error("absent resource: {0}")]
    AbsentResource(&'static str),

    #[error("wrong state: {0}")]
    WrongState(&'static str),

    #[error("policy denied: {0}")]
    PolicyDenied(&'static str),

    #[error("transfer failure: {0}")]
    TransferFailure(&'static str),

    #[error("internal fault: {0}")]
    Internal(String),

    #[error("stream failure: {0}")]
    StreamFailure(#[from] std::io::Error),
}

impl ProtocolFault {
    /// The numeric reply this fault maps to, per §7's error-kind table.
    pub fn response_code(&self) -> u16 {
        match self {
            ProtocolFault::Syntax => 501,
            ProtocolFault::UnknownCommand => 500,
            ProtocolFault::AbsentResource(_) => 430,
            ProtocolFault::WrongState(_) => 412,
            ProtocolFault::PolicyDenied(_) => 440,
            ProtocolFault::TransferFailure(_) => 441,
            ProtocolFault::Internal(_) => 403,
            ProtocolFault::StreamFailure(_) => 500,
        }
    }
}
