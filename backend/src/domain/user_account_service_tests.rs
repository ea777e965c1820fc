//! Tests for the account service.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::UserAccountService;
use crate::domain::ports::{
    LoginService, MockPasswordHasher, MockTokenService, MockUserRepository, PasswordHashError,
    RegistrationService, TokenError, UserPersistenceError, UserProfileCommand, UsersQuery,
};
use crate::domain::{
    AccessToken, AuthContext, AvatarUrl, Email, ErrorCode, LoginCredentials, PasswordHash,
    Profile, ProfileUpdate, Registration, StoredCredentials, User, UserId, VerifiedCredential,
};

type Service = UserAccountService<MockUserRepository, MockPasswordHasher, MockTokenService>;

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenService,
) -> Service {
    UserAccountService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
}

fn users_only(users: MockUserRepository) -> Service {
    make_service(users, MockPasswordHasher::new(), MockTokenService::new())
}

#[fixture]
fn ada() -> User {
    User::new(
        UserId::random(),
        Profile::from_optional(Some("Ada"), None, None).expect("valid profile"),
        Email::new("ada@example.com").expect("valid email"),
    )
}

fn auth_for(user: &User) -> AuthContext {
    AuthContext::from(VerifiedCredential::new(*user.id(), Utc::now()))
}

fn stored(user: &User) -> StoredCredentials {
    StoredCredentials {
        user: user.clone(),
        password_hash: PasswordHash::new("$argon2id$stored"),
    }
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("ada@example.com", password).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn register_hashes_password_and_stores_user() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|password| {
            assert_eq!(password.expose(), "secret1");
            Ok(PasswordHash::new("$argon2id$hashed"))
        });
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .withf(|user, hash| {
            user.email().as_ref() == "new@example.com" && hash.as_str() == "$argon2id$hashed"
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let service = make_service(users, hasher, MockTokenService::new());
    let registration =
        Registration::try_from_parts("New@Example.com", "secret1", None, None, None)
            .expect("valid registration");

    let user = service.register(registration).await.expect("registered");

    assert_eq!(user.email().as_ref(), "new@example.com");
    assert_eq!(user.name(), &Profile::default().name);
}

#[rstest]
#[tokio::test]
async fn register_maps_duplicate_email_to_conflict() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("$argon2id$hashed")));
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .return_once(|_, _| Err(UserPersistenceError::duplicate_email("a@b.com")));

    let service = make_service(users, hasher, MockTokenService::new());
    let registration = Registration::try_from_parts("a@b.com", "secret1", None, None, None)
        .expect("valid registration");

    let err = service.register(registration).await.expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn register_does_not_store_when_hashing_fails() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hash("out of memory")));
    let mut users = MockUserRepository::new();
    users.expect_insert().never();

    let service = make_service(users, hasher, MockTokenService::new());
    let registration = Registration::try_from_parts("a@b.com", "secret1", None, None, None)
        .expect("valid registration");

    let err = service.register(registration).await.expect_err("hash failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn login_issues_token_for_matching_password(ada: User) {
    let record = stored(&ada);
    let subject = *ada.id();
    let mut users = MockUserRepository::new();
    users
        .expect_find_credentials_by_email()
        .with(eq(Email::new("ada@example.com").expect("valid email")))
        .return_once(move |_| Ok(Some(record)));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().return_once(|_, _| Ok(true));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .with(eq(subject))
        .times(1)
        .return_once(|_| Ok(AccessToken::new("signed")));

    let sign_in = make_service(users, hasher, tokens)
        .login(&credentials("secret1"))
        .await
        .expect("login succeeds");

    assert_eq!(sign_in.token.as_str(), "signed");
    assert_eq!(sign_in.user, ada);
}

#[rstest]
#[tokio::test]
async fn login_rejects_wrong_password(ada: User) {
    let record = stored(&ada);
    let mut users = MockUserRepository::new();
    users
        .expect_find_credentials_by_email()
        .return_once(move |_| Ok(Some(record)));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().return_once(|_, _| Ok(false));
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();

    let err = make_service(users, hasher, tokens)
        .login(&credentials("wrong-password"))
        .await
        .expect_err("mismatch");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn unknown_email_and_wrong_password_look_alike(ada: User) {
    let mut unknown_users = MockUserRepository::new();
    unknown_users
        .expect_find_credentials_by_email()
        .return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().never();
    let unknown = make_service(unknown_users, hasher, MockTokenService::new())
        .login(&credentials("secret1"))
        .await
        .expect_err("unknown email");

    let record = stored(&ada);
    let mut known_users = MockUserRepository::new();
    known_users
        .expect_find_credentials_by_email()
        .return_once(move |_| Ok(Some(record)));
    let mut mismatching = MockPasswordHasher::new();
    mismatching.expect_verify().return_once(|_, _| Ok(false));
    let mismatch = make_service(known_users, mismatching, MockTokenService::new())
        .login(&credentials("wrong-password"))
        .await
        .expect_err("wrong password");

    assert_eq!(unknown.code(), mismatch.code());
    assert_eq!(unknown.message(), mismatch.message());
}

#[rstest]
#[tokio::test]
async fn login_signing_failure_is_internal(ada: User) {
    let record = stored(&ada);
    let mut users = MockUserRepository::new();
    users
        .expect_find_credentials_by_email()
        .return_once(move |_| Ok(Some(record)));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().return_once(|_, _| Ok(true));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .return_once(|_| Err(TokenError::signing("invalid key")));

    let err = make_service(users, hasher, tokens)
        .login(&credentials("secret1"))
        .await
        .expect_err("signing failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn find_user_reports_missing_record() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let err = users_only(users)
        .find_user(&UserId::random())
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_users_surfaces_storage_failure() {
    let mut users = MockUserRepository::new();
    users
        .expect_list()
        .return_once(|| Err(UserPersistenceError::connection("pool exhausted")));

    let err = users_only(users).list_users().await.expect_err("failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn update_profile_targets_authenticated_subject(ada: User) {
    let update = ProfileUpdate::try_from_parts(Some("Countess"), None).expect("valid update");
    let updated = ada.with_update(&update);
    let subject = *ada.id();
    let mut users = MockUserRepository::new();
    users
        .expect_update_profile()
        .withf(move |id, _| *id == subject)
        .times(1)
        .return_once(move |_, _| Ok(Some(updated)));

    let user = users_only(users)
        .update_profile(&auth_for(&ada), &update)
        .await
        .expect("updated");

    assert_eq!(user.name().as_ref(), "Countess");
}

#[rstest]
#[tokio::test]
async fn update_avatar_for_vanished_subject_is_not_found(ada: User) {
    let mut users = MockUserRepository::new();
    users.expect_update_avatar().return_once(|_, _| Ok(None));
    let avatar = AvatarUrl::new("https://x.test/a.png").expect("valid avatar");

    let err = users_only(users)
        .update_avatar(&auth_for(&ada), &avatar)
        .await
        .expect_err("vanished subject");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
