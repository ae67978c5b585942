use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const NONCE_LEN: usize = 16;
const PAYLOAD_LEN: usize = NONCE_LEN + 8;
// Tokens stamped slightly in the future are tolerated (clock drift between workers).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CsrfError {
    #[error("the csrf token is malformed")]
    Malformed,
    #[error("the csrf token signature does not match")]
    BadSignature,
    #[error("the csrf token has expired")]
    Expired,
    #[error("the csrf token has already been used")]
    AlreadyUsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub nonce: String,
    pub issued_at: i64,
}

/// Issues and checks signed, single-use form tokens.
///
/// A token is `base64url(nonce || issued_at) "." base64url(hmac)`. Nothing is
/// stored when a token is issued; the nonce is only recorded once a
/// submission spends it.
pub struct CsrfProtector {
    mac: HmacSha256,
    time_limit: Duration,
    spent: DashMap<String, i64>,
}

impl CsrfProtector {
    pub fn new(secret_key: &[u8], time_limit: Duration) -> Self {
        let mac = match HmacSha256::new_from_slice(secret_key) {
            Ok(mac) => mac,
            Err(_) => unreachable!("hmac accepts keys of any length"),
        };
        Self {
            mac,
            time_limit,
            spent: DashMap::new(),
        }
    }

    pub fn issue(&self) -> String {
        self.issue_at(Utc::now().timestamp())
    }

    pub fn issue_at(&self, now: i64) -> String {
        let mut payload = [0u8; PAYLOAD_LEN];
        rand::thread_rng().fill_bytes(&mut payload[..NONCE_LEN]);
        payload[NONCE_LEN..].copy_from_slice(&now.to_be_bytes());

        let mut mac = self.mac.clone();
        mac.update(&payload);
        let tag = mac.finalize().into_bytes();

        format!("{}.{}", URL_SAFE_NO_PAD.encode(payload), URL_SAFE_NO_PAD.encode(tag))
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedToken, CsrfError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Result<VerifiedToken, CsrfError> {
        let (payload_b64, tag_b64) = token.split_once('.').ok_or(CsrfError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| CsrfError::Malformed)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| CsrfError::Malformed)?;
        if payload.len() != PAYLOAD_LEN {
            return Err(CsrfError::Malformed);
        }

        let mut mac = self.mac.clone();
        mac.update(&payload);
        mac.verify_slice(&tag).map_err(|_| CsrfError::BadSignature)?;

        let mut stamp = [0u8; 8];
        stamp.copy_from_slice(&payload[NONCE_LEN..]);
        let issued_at = i64::from_be_bytes(stamp);
        let age = now - issued_at;
        if age > self.time_limit_secs() || age < -MAX_CLOCK_SKEW_SECS {
            return Err(CsrfError::Expired);
        }

        let nonce = hex::encode(&payload[..NONCE_LEN]);
        if self.spent.contains_key(&nonce) {
            return Err(CsrfError::AlreadyUsed);
        }
        Ok(VerifiedToken { nonce, issued_at })
    }

    /// Verifies the token and reserves it. The reservation is released
    /// again unless the returned claim is committed.
    pub fn claim(&self, token: &str) -> Result<CsrfClaim<'_>, CsrfError> {
        self.claim_at(token, Utc::now().timestamp())
    }

    pub fn claim_at(&self, token: &str, now: i64) -> Result<CsrfClaim<'_>, CsrfError> {
        let verified = self.verify_at(token, now)?;
        self.prune(now);
        match self.spent.entry(verified.nonce.clone()) {
            Entry::Occupied(_) => Err(CsrfError::AlreadyUsed),
            Entry::Vacant(slot) => {
                slot.insert(verified.issued_at);
                Ok(CsrfClaim {
                    protector: self,
                    nonce: verified.nonce,
                    committed: false,
                })
            }
        }
    }

    pub fn spent_count(&self) -> usize {
        self.spent.len()
    }

    // Spent nonces only matter while their token could still verify.
    fn prune(&self, now: i64) {
        let limit = self.time_limit_secs();
        self.spent.retain(|_, issued_at| now - *issued_at <= limit);
    }

    fn time_limit_secs(&self) -> i64 {
        i64::try_from(self.time_limit.as_secs()).unwrap_or(i64::MAX)
    }
}

pub struct CsrfClaim<'a> {
    protector: &'a CsrfProtector,
    nonce: String,
    committed: bool,
}

impl CsrfClaim<'_> {
    /// Marks the token as spent for good.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for CsrfClaim<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.protector.spent.remove(&self.nonce);
        }
    }
}
