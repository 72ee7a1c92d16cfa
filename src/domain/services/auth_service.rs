use std::sync::Arc;
use crate::domain::{
    models::{auth::{Claims, ADMIN_AUDIENCE}, user::User},
    ports::UserRepository,
};
use crate::error::AppError;
use crate::config::Config;
use argon2::{password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString}, Argon2};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use chrono::{Utc, Duration};
use rand::{distributions::Alphanumeric, Rng};
use tracing::{error, info};

pub const ACCESS_TOKEN_MINUTES: i64 = 60;

pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>, config: &Config) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            repo,
            issuer: config.auth_issuer.clone(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Creates the configured administrator unless an account with that name exists.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<User, AppError> {
        if let Some(existing) = self.repo.find_by_username(username).await? {
            return Ok(existing);
        }

        let user = User::new(username.to_string(), hash_password(password)?);
        let created = self.repo.create(&user).await?;
        info!("Administrator account created: {}", created.username);
        Ok(created)
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self.repo.find_by_username(username).await?
            .ok_or(AppError::Unauthorized)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::InternalWithMsg(format!("Stored password hash is invalid: {}", e)))?;

        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)?;

        Ok(user)
    }

    /// Returns `(access_token, csrf_token)`.
    pub fn issue_token(&self, user: &User) -> Result<(String, String), AppError> {
        let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();
        let now = Utc::now();

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user.id.clone(),
            aud: ADMIN_AUDIENCE.to_string(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_MINUTES)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            username: user.username.clone(),
            csrf_token: csrf_token.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                error!("JWT encoding failed: {}", e);
                AppError::InternalWithMsg("token encoding failed".into())
            })?;

        Ok((access_token, csrf_token))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[ADMIN_AUDIENCE]);
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))
}
