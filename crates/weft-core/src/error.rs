//! Error types for the weft protocol.
use thiserror::Error;

use crate::types::PostHash;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("score missing for known parent {0}")] MissingParentScore(PostHash),
    #[error("cumulative score overflow at {0}")] ScoreOverflow(PostHash),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed hex")] BadHex,
    #[error("empty payload")] Empty,
    #[error("oversized payload: {0} hex chars")] Oversized(usize),
    #[error("unknown message tag {0}")] UnknownTag(u8),
    #[error("wrong payload length: expected {expected}, got {got}")] WrongLength { expected: usize, got: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("not an IPv4 endpoint: {0}")] NotIpv4(String),
    #[error("malformed endpoint: {0}")] Malformed(String),
}

#[derive(Error, Debug)]
pub enum WeftError {
    #[error(transparent)] Store(#[from] StoreError),
    #[error(transparent)] Decode(#[from] DecodeError),
    #[error(transparent)] Address(#[from] AddressError),
    #[error("transport: {0}")] Transport(String),
}

impl From<std::io::Error> for WeftError {
    fn from(err: std::io::Error) -> Self {
        WeftError::Transport(err.to_string())
    }
}
