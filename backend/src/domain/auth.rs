//! Account registry: registration, login, profile, and password reset.
//!
//! This is a collaborator surface, not the catalogue core: accounts live in
//! an in-process registry keyed by email, passwords are hashed with Argon2,
//! and reset tokens are opaque one-shot values. Validation failures are
//! structured data (`field -> messages`) so the HTTP layer can surface them
//! in the `{success, message, errors}` envelope without string parsing.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Minimum accepted password length.
const MIN_PASSWORD_CHARS: usize = 8;

/// Registration input.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Login email, unique across the registry.
    pub email: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
    /// Confirmation that must match `password`.
    pub password_confirmation: String,
}

/// Partial profile update; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New avatar URL.
    pub avatar: Option<String>,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AccountProfile {
    /// Account identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Avatar URL, empty when unset.
    pub avatar: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Account operation failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation; `errors` maps fields to messages.
    #[error("validation failed")]
    Validation {
        /// Field-keyed validation messages.
        errors: BTreeMap<String, Vec<String>>,
    },
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// No account matches the requested identifier.
    #[error("account not found")]
    NotFound,
    /// The reset token is unknown or already used.
    #[error("reset token is invalid or expired")]
    InvalidResetToken,
    /// Password hashing failed; effectively unreachable with valid input.
    #[error("password hashing failed")]
    Hashing,
}

impl AuthError {
    fn single(field: &str, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_owned(), vec![message.to_owned()]);
        Self::Validation { errors }
    }
}

struct Account {
    id: Uuid,
    name: String,
    email: String,
    avatar: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl Account {
    fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            created_at: self.created_at,
        }
    }
}

/// In-process account store.
pub struct AccountRegistry {
    clock: Arc<dyn Clock>,
    accounts: RwLock<HashMap<Uuid, Account>>,
    reset_tokens: RwLock<HashMap<String, Uuid>>,
}

impl AccountRegistry {
    /// Build an empty registry.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            accounts: RwLock::new(HashMap::new()),
            reset_tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    /// [`AuthError::Validation`] for malformed input or an email already in
    /// use; [`AuthError::Hashing`] when the password cannot be hashed.
    pub fn register(&self, input: &NewAccount) -> Result<AccountProfile, AuthError> {
        let mut errors = BTreeMap::new();
        if input.name.trim().is_empty() {
            errors.insert("name".to_owned(), vec!["Name is required.".to_owned()]);
        }
        let email = input.email.trim().to_lowercase();
        if !is_plausible_email(&email) {
            errors.insert(
                "email".to_owned(),
                vec!["A valid email address is required.".to_owned()],
            );
        }
        let password_errors = password_violations(&input.password, &input.password_confirmation);
        if !password_errors.is_empty() {
            errors.insert("password".to_owned(), password_errors);
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation { errors });
        }

        let mut accounts = self.write_accounts();
        if accounts
            .values()
            .any(|account| account.email == email)
        {
            return Err(AuthError::single(
                "email",
                "This email address is already registered.",
            ));
        }

        let account = Account {
            id: Uuid::new_v4(),
            name: input.name.trim().to_owned(),
            email,
            avatar: String::new(),
            password_hash: hash_password(&input.password)?,
            created_at: self.clock.utc(),
        };
        let profile = account.profile();
        accounts.insert(account.id, account);
        Ok(profile)
    }

    /// Authenticate by email and password.
    ///
    /// # Errors
    /// [`AuthError::InvalidCredentials`] for unknown emails and wrong
    /// passwords alike; the two cases are indistinguishable on purpose.
    pub fn login(&self, email: &str, password: &str) -> Result<AccountProfile, AuthError> {
        let email = email.trim().to_lowercase();
        let accounts = self.read_accounts();
        let account = accounts
            .values()
            .find(|account| account.email == email)
            .ok_or(AuthError::InvalidCredentials)?;
        if verify_password(&account.password_hash, password) {
            Ok(account.profile())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Look up a profile by account id.
    #[must_use]
    pub fn profile(&self, id: Uuid) -> Option<AccountProfile> {
        self.read_accounts().get(&id).map(Account::profile)
    }

    /// Apply a partial profile update.
    ///
    /// # Errors
    /// [`AuthError::NotFound`] for unknown ids; [`AuthError::Validation`]
    /// when the new name is blank.
    pub fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<AccountProfile, AuthError> {
        let mut accounts = self.write_accounts();
        let account = accounts.get_mut(&id).ok_or(AuthError::NotFound)?;
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AuthError::single("name", "Name is required."));
            }
            account.name = name.trim().to_owned();
        }
        if let Some(avatar) = &update.avatar {
            account.avatar = avatar.trim().to_owned();
        }
        Ok(account.profile())
    }

    /// Issue a password reset token for `email`.
    ///
    /// Returns `None` for unknown emails; callers answer identically either
    /// way so the endpoint does not leak which addresses exist.
    #[must_use]
    pub fn issue_reset_token(&self, email: &str) -> Option<String> {
        let email = email.trim().to_lowercase();
        let id = self
            .read_accounts()
            .values()
            .find(|account| account.email == email)
            .map(|account| account.id)?;
        let token = Uuid::new_v4().simple().to_string();
        self.write_tokens().insert(token.clone(), id);
        Some(token)
    }

    /// Consume a reset token and set a new password.
    ///
    /// # Errors
    /// [`AuthError::InvalidResetToken`] for unknown tokens;
    /// [`AuthError::Validation`] when the new password breaks the rules.
    pub fn reset_password(
        &self,
        token: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<(), AuthError> {
        let violations = password_violations(password, confirmation);
        if !violations.is_empty() {
            let mut errors = BTreeMap::new();
            errors.insert("password".to_owned(), violations);
            return Err(AuthError::Validation { errors });
        }

        let id = self
            .write_tokens()
            .remove(token)
            .ok_or(AuthError::InvalidResetToken)?;
        let mut accounts = self.write_accounts();
        let account = accounts.get_mut(&id).ok_or(AuthError::InvalidResetToken)?;
        account.password_hash = hash_password(password)?;
        Ok(())
    }

    fn read_accounts(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, Account>> {
        self.accounts
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_accounts(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Account>> {
        self.accounts
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_tokens(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Uuid>> {
        self.reset_tokens
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Password policy: at least eight characters with an uppercase letter, a
/// lowercase letter, and a digit; the confirmation must match.
fn password_violations(password: &str, confirmation: &str) -> Vec<String> {
    let mut violations = Vec::new();
    if password.chars().count() < MIN_PASSWORD_CHARS {
        violations.push("Password must be at least 8 characters long.".to_owned());
    }
    if !password.chars().any(char::is_uppercase) {
        violations.push("Password must contain an uppercase letter.".to_owned());
    }
    if !password.chars().any(char::is_lowercase) {
        violations.push("Password must contain a lowercase letter.".to_owned());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain a digit.".to_owned());
    }
    if password != confirmation {
        violations.push("Password confirmation does not match.".to_owned());
    }
    violations
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::Hashing)
}

fn verify_password(hash: &str, password: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> AccountRegistry {
        AccountRegistry::new(Arc::new(DefaultClock))
    }

    fn valid_account() -> NewAccount {
        NewAccount {
            name: "Claire Dubois".to_owned(),
            email: "claire@example.test".to_owned(),
            password: "Sup3rSecret".to_owned(),
            password_confirmation: "Sup3rSecret".to_owned(),
        }
    }

    #[rstest]
    fn register_then_login_round_trips(registry: AccountRegistry) {
        let profile = registry
            .register(&valid_account())
            .expect("valid registration should succeed");
        assert_eq!(profile.email, "claire@example.test");

        let logged_in = registry
            .login("Claire@Example.Test", "Sup3rSecret")
            .expect("login should succeed with case-insensitive email");
        assert_eq!(logged_in.id, profile.id);
    }

    #[rstest]
    fn wrong_password_is_rejected(registry: AccountRegistry) {
        registry
            .register(&valid_account())
            .expect("registration should succeed");
        let result = registry.login("claire@example.test", "WrongPass1");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[rstest]
    fn duplicate_email_is_a_validation_error(registry: AccountRegistry) {
        registry
            .register(&valid_account())
            .expect("first registration should succeed");
        let result = registry.register(&valid_account());
        let Err(AuthError::Validation { errors }) = result else {
            panic!("duplicate email must fail validation");
        };
        assert!(errors.contains_key("email"));
    }

    #[rstest]
    #[case::too_short("Ab1", "Ab1")]
    #[case::no_uppercase("lowercase1", "lowercase1")]
    #[case::no_digit("NoDigitsHere", "NoDigitsHere")]
    #[case::mismatch("Sup3rSecret", "Sup3rSecreX")]
    fn weak_passwords_are_rejected(#[case] password: &str, #[case] confirmation: &str) {
        let violations = password_violations(password, confirmation);
        assert!(!violations.is_empty());
    }

    #[rstest]
    fn reset_flow_consumes_the_token(registry: AccountRegistry) {
        registry
            .register(&valid_account())
            .expect("registration should succeed");

        let token = registry
            .issue_reset_token("claire@example.test")
            .expect("known email should yield a token");
        registry
            .reset_password(&token, "N3wPassword", "N3wPassword")
            .expect("reset should succeed");

        assert!(registry.login("claire@example.test", "N3wPassword").is_ok());
        assert!(
            matches!(
                registry.reset_password(&token, "An0therPass", "An0therPass"),
                Err(AuthError::InvalidResetToken)
            ),
            "tokens are single use"
        );
    }

    #[rstest]
    fn unknown_email_yields_no_reset_token(registry: AccountRegistry) {
        assert!(registry.issue_reset_token("ghost@example.test").is_none());
    }

    #[rstest]
    fn profile_update_changes_name_and_avatar(registry: AccountRegistry) {
        let profile = registry
            .register(&valid_account())
            .expect("registration should succeed");
        let updated = registry
            .update_profile(
                profile.id,
                &ProfileUpdate {
                    name: Some("Claire D.".to_owned()),
                    avatar: Some("https://cdn.example/c.png".to_owned()),
                },
            )
            .expect("update should succeed");
        assert_eq!(updated.name, "Claire D.");
        assert_eq!(updated.avatar, "https://cdn.example/c.png");
    }
}
