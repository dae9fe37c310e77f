//! Compact token encoding and signature verification

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::{crypto, encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde::de::DeserializeOwned;

use crate::domain::ClaimSet;
use crate::errors::TokenError;

/// The only algorithm this codec produces or accepts
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS512;

/// Encodes claim sets into `header.payload.signature` tokens and back
///
/// No claim is interpreted here; expiry, issuer and revocation are the
/// validator's business.
#[derive(Clone)]
pub struct ClaimsCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl ClaimsCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Serializes and signs `claims`
    pub fn encode(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        let header = Header::new(SIGNING_ALGORITHM);
        encode(&header, claims, &self.encoding_key).map_err(|e| TokenError::GenerationFailed {
            message: e.to_string(),
        })
    }

    /// Verifies the signature of `token` and returns its claims
    ///
    /// # Errors
    /// * `TokenError::MalformedToken` - not three non-empty segments, undecodable
    ///   header or payload, or a header naming any algorithm other than HS512
    /// * `TokenError::SignatureMismatch` - signature does not match header and payload
    pub fn decode(&self, token: &str) -> Result<ClaimSet, TokenError> {
        let (message, signature) = token.rsplit_once('.').ok_or(TokenError::MalformedToken)?;
        let (header, payload) = message.split_once('.').ok_or(TokenError::MalformedToken)?;
        if header.is_empty() || payload.is_empty() || signature.is_empty() || payload.contains('.')
        {
            return Err(TokenError::MalformedToken);
        }

        let header: Header = decode_segment(header)?;
        if header.alg != SIGNING_ALGORITHM {
            return Err(TokenError::MalformedToken);
        }

        // Constant-time comparison happens inside `crypto::verify`
        let verified = crypto::verify(
            signature,
            message.as_bytes(),
            &self.decoding_key,
            SIGNING_ALGORITHM,
        )
        .map_err(|_| TokenError::SignatureMismatch)?;
        if !verified {
            return Err(TokenError::SignatureMismatch);
        }

        decode_segment(payload)
    }
}

impl std::fmt::Debug for ClaimsCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimsCodec")
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::MalformedToken)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::MalformedToken)
}
