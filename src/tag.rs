//! Signature tags for domain separation.
//!
//! Every tagged signature covers `tag_bytes(tag) || payload`. A signature made
//! under one tag never verifies under another, so a transaction witness cannot
//! be replayed as, say, a block signature.

use std::fmt;

/// The protocol context a signature is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignTag {
    /// Anything signed in tests and examples
    Testing,
    /// Transaction witness
    Tx,
    /// Redemption transaction witness
    RedeemTx,
    /// VSS certificate
    VssCert,
    /// Update system proposal
    UsProposal,
    /// Shared-seed commitment
    Commitment,
    /// Update system vote
    UsVote,
    /// Main block header
    MainBlock,
    /// Main block signed under a lightweight delegation
    MainBlockLight,
    /// Main block signed under a heavyweight delegation
    MainBlockHeavy,
    /// Proxy secret key certificate
    ProxySk,
}

impl SignTag {
    /// All tags, in encoding order.
    pub const ALL: [SignTag; 11] = [
        SignTag::Testing,
        SignTag::Tx,
        SignTag::RedeemTx,
        SignTag::VssCert,
        SignTag::UsProposal,
        SignTag::Commitment,
        SignTag::UsVote,
        SignTag::MainBlock,
        SignTag::MainBlockLight,
        SignTag::MainBlockHeavy,
        SignTag::ProxySk,
    ];

    /// Fixed-width byte encoding of the tag.
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            SignTag::Testing => b"\x00",
            SignTag::Tx => b"\x01",
            SignTag::RedeemTx => b"\x02",
            SignTag::VssCert => b"\x03",
            SignTag::UsProposal => b"\x04",
            SignTag::Commitment => b"\x05",
            SignTag::UsVote => b"\x06",
            SignTag::MainBlock => b"\x07",
            SignTag::MainBlockLight => b"\x08",
            SignTag::MainBlockHeavy => b"\x09",
            SignTag::ProxySk => b"\x0a",
        }
    }
}

impl fmt::Display for SignTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignTag::Testing => "testing",
            SignTag::Tx => "tx",
            SignTag::RedeemTx => "redeem-tx",
            SignTag::VssCert => "vss-cert",
            SignTag::UsProposal => "us-proposal",
            SignTag::Commitment => "commitment",
            SignTag::UsVote => "us-vote",
            SignTag::MainBlock => "main-block",
            SignTag::MainBlockLight => "main-block-light",
            SignTag::MainBlockHeavy => "main-block-heavy",
            SignTag::ProxySk => "proxy-sk",
        };
        f.write_str(name)
    }
}

/// Prefix bytes for an optional tag. `None` signs the payload as-is.
pub const fn tag_bytes(tag: Option<SignTag>) -> &'static [u8] {
    match tag {
        Some(tag) => tag.as_bytes(),
        None => b"",
    }
}

/// `tag_bytes(tag) || payload`
pub(crate) fn tagged_payload(tag: Option<SignTag>, payload: &[u8]) -> Vec<u8> {
    let prefix = tag_bytes(tag);
    let mut message = Vec::with_capacity(prefix.len() + payload.len());
    message.extend_from_slice(prefix);
    message.extend_from_slice(payload);
    message
}
