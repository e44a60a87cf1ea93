//! Token lifecycle engine: issuance, verification, and single-use
//! refresh rotation.

use chrono::Duration;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Number of random alphanumeric characters in a refresh-token value,
/// ahead of the UUID suffix
const REFRESH_VALUE_RANDOM_LEN: usize = 35;

/// Service managing signed access tokens and their paired refresh
/// records
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    rotation_validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh-token record store
    /// * `config` - Token service configuration
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.leeway = config.clock_skew_secs.max(0) as u64;

        // Rotation exists to service expired access tokens, so this
        // path checks structure and signature only; expiry is
        // re-examined by hand in the opposite direction.
        let mut rotation_validation = Validation::new(Algorithm::HS256);
        rotation_validation.validate_aud = false;
        rotation_validation.validate_exp = false;
        rotation_validation.required_spec_claims.clear();

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
            rotation_validation,
        }
    }

    /// Mints a signed access token plus an opaque refresh token for an
    /// already-authenticated user and persists the pairing record
    ///
    /// The record's `jwt_id` is the freshly minted `jti`, which is what
    /// later binds the pair during rotation. Nothing is returned unless
    /// the record is durable: a storage failure aborts the whole
    /// issuance.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The issued pair
    /// * `Err(DomainError)` - Signing or persistence failed
    pub async fn issue_tokens(&self, user: &User) -> Result<TokenPair, DomainError> {
        let claims = Claims::new_access_token(
            user,
            Duration::seconds(self.config.access_token_lifetime_secs),
        );
        let access_token = self.encode_jwt(&claims)?;

        let refresh_value = generate_refresh_value();
        let record = RefreshToken::new(
            user.id,
            refresh_value.clone(),
            claims.jti.clone(),
            Duration::seconds(self.config.refresh_token_lifetime_secs),
        );

        self.repository.insert(record).await?;

        debug!(user_id = %user.id, jti = %claims.jti, "issued token pair");
        Ok(TokenPair::new(access_token, refresh_value))
    }

    /// Verifies an access token for a protected call and returns its
    /// claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                        DomainError::Token(TokenError::InvalidAlgorithm)
                    }
                    _ => DomainError::Token(TokenError::InvalidTokenFormat),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validates an access/refresh pair and consumes the refresh record
    ///
    /// Runs the ordered check sequence of the rotation protocol; the
    /// first failing check determines the outcome. On success the
    /// stored record has transitioned `is_used` false to true and the
    /// owning user id is returned so the caller can reissue.
    ///
    /// The consumption itself is an atomic check-and-set in the record
    /// store: of two racing rotations, the loser fails here with
    /// `TokenAlreadyUsed` and must not be retried.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - Owner of the consumed record
    /// * `Err(DomainError)` - The specific failed check, or a storage
    ///   error
    pub async fn consume_refresh_token(
        &self,
        access_token: &str,
        refresh_value: &str,
    ) -> Result<Uuid, DomainError> {
        // Check 1 + 2: structure, signature, and declared algorithm
        let claims = self.decode_for_rotation(access_token)?;

        // Check 3: rotation is exclusively for renewing expired access
        // tokens; a still-live token is refused
        if !claims.is_expired(Duration::seconds(self.config.clock_skew_secs)) {
            return Err(DomainError::Token(TokenError::TokenNotExpired));
        }

        // Check 4: the presented refresh value must be on record
        let record = self
            .repository
            .find_by_token(refresh_value)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenNotFound))?;

        // Check 5: revocation wins over every other record state
        if record.is_revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        // Check 6: single use; a used record means replay
        if record.is_used {
            return Err(DomainError::Token(TokenError::TokenAlreadyUsed));
        }

        // Check 7: the record's own horizon
        if record.is_expired() {
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }

        // Check 8: the pairing; mixing a refresh token with an
        // unrelated access token is rejected
        if record.jwt_id != claims.jti {
            return Err(DomainError::Token(TokenError::TokenMismatch));
        }

        // Check 9: consume. The conditional update decides concurrent
        // races; a lost race reads as replay.
        if !self.repository.mark_used(record.id).await? {
            return Err(DomainError::Token(TokenError::TokenAlreadyUsed));
        }

        debug!(user_id = %record.user_id, jti = %claims.jti, "refresh token consumed");
        Ok(record.user_id)
    }

    /// Decodes an access token for the rotation path: signature and
    /// structure are enforced, expiry is not
    pub(crate) fn decode_for_rotation(&self, token: &str) -> Result<Claims, DomainError> {
        let header = decode_header(token)
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))?;

        // Pin the declared algorithm to block algorithm-confusion
        // attacks before any signature work
        if header.alg != Algorithm::HS256 {
            return Err(DomainError::Token(TokenError::InvalidAlgorithm));
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.rotation_validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })?;

        Ok(token_data.claims)
    }

    /// Encodes claims into a signed JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

/// Generates an opaque refresh-token value: 35 alphanumeric characters
/// from the thread-local CSPRNG plus a UUID v4 suffix
fn generate_refresh_value() -> String {
    let mut rng = rand::thread_rng();
    let random: String = (0..REFRESH_VALUE_RANDOM_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..62);
            match idx {
                0..10 => (b'0' + idx) as char,
                10..36 => (b'a' + idx - 10) as char,
                36..62 => (b'A' + idx - 36) as char,
                _ => unreachable!(),
            }
        })
        .collect();

    format!("{}{}", random, Uuid::new_v4())
}
