//! Ready-made restriction values for delegation certificates.
//!
//! Heavyweight delegation certifies a single starting epoch; lightweight
//! delegation certifies an inclusive epoch range. Any `minicbor::Encode`
//! type works as a restriction; these two cover block signing.

use std::fmt;

use minicbor::{Decode, Encode};

/// An epoch number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct EpochIndex(#[n(0)] pub u64);

impl EpochIndex {
    /// Predicate for heavyweight delegations: the delegation took effect at or
    /// before `current`.
    pub fn active_at(current: EpochIndex) -> impl Fn(&EpochIndex) -> bool {
        move |start| *start <= current
    }
}

impl fmt::Display for EpochIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch #{}", self.0)
    }
}

/// Inclusive range of epochs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct EpochRange {
    #[n(0)]
    from: EpochIndex,
    #[n(1)]
    to: EpochIndex,
}

impl EpochRange {
    /// `None` if `from` is after `to`.
    pub fn new(from: EpochIndex, to: EpochIndex) -> Option<Self> {
        (from <= to).then_some(EpochRange { from, to })
    }

    /// First epoch of the range.
    pub fn first(&self) -> EpochIndex {
        self.from
    }

    /// Last epoch of the range, inclusive.
    pub fn last(&self) -> EpochIndex {
        self.to
    }

    /// Whether `epoch` lies within the range.
    pub fn contains(&self, epoch: EpochIndex) -> bool {
        self.from <= epoch && epoch <= self.to
    }

    /// Predicate for lightweight delegations: the range covers `epoch`.
    pub fn covering(epoch: EpochIndex) -> impl Fn(&EpochRange) -> bool {
        move |range| range.contains(epoch)
    }
}

impl fmt::Display for EpochRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epochs {}..={}", self.from.0, self.to.0)
    }
}
