//! Encoding and decoding of authentication tokens.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::user::UserID;

/// How long an issued token stays valid.
pub const TOKEN_DURATION: Duration = Duration::hours(24);

/// The contents of an authentication token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
    /// The id of the authenticated user.
    pub sub: UserID,
}

/// Create a signed token identifying `user_id`, valid for [TOKEN_DURATION].
pub fn encode_token(
    user_id: UserID,
    encoding_key: &EncodingKey,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = OffsetDateTime::now_utc();

    let claims = Claims {
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
        sub: user_id,
    };

    encode(&Header::default(), &claims, encoding_key)
}

/// Decode and verify `token`, including its expiry.
pub fn decode_token(
    token: &str,
    decoding_key: &DecodingKey,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
}
