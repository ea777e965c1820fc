//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Each test clones a migrated template into its own database, so the
//! constraints under test are the ones the migrations create. Steps run on a
//! Tokio runtime owned by the test context.

use diesel::pg::PgConnection;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{Connection, RunQueryDsl};
use mesto::domain::ports::{UserPersistenceError, UserRepository};
use mesto::domain::{AvatarUrl, Email, PasswordHash, Profile, ProfileUpdate, User, UserId};
use mesto::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{handle_cluster_setup_failure, provision_template_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    repository: DieselUserRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn raw_connection(&self) -> PgConnection {
        PgConnection::establish(&self.database_url).expect("raw connection")
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_template_database(cluster).map_err(|err| err.to_string())?;
    let database_url = temp_db.url().to_string();

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselUserRepository::new(pool),
        database_url,
        _database: temp_db,
    })
}

#[fixture]
fn diesel_world() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn user_with_email(email: &str) -> User {
    let profile = Profile::from_optional(Some("Ada"), Some("Mathematician"), None)
        .expect("valid profile");
    User::new(UserId::random(), profile, Email::new(email).expect("valid email"))
}

fn hash() -> PasswordHash {
    PasswordHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g")
}

#[rstest]
fn inserted_users_are_found_by_email_with_their_hash(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: inserted_users_are_found_by_email_with_their_hash skipped");
        return;
    };
    let user = user_with_email("Ada@Example.com");

    let stored = ctx.block_on(async {
        ctx.repository.insert(&user, &hash()).await.expect("insert");
        let lookup = Email::new("ADA@example.COM").expect("valid email");
        ctx.repository
            .find_credentials_by_email(&lookup)
            .await
            .expect("lookup")
    });

    let stored = stored.expect("credentials exist");
    assert_eq!(stored.user, user);
    assert_eq!(stored.password_hash, hash());
}

#[rstest]
fn email_unique_constraint_maps_to_duplicate_email(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: email_unique_constraint_maps_to_duplicate_email skipped");
        return;
    };
    let first = user_with_email("ada@example.com");
    let second = user_with_email("ADA@example.com");

    let result = ctx.block_on(async {
        ctx.repository.insert(&first, &hash()).await.expect("first insert");
        ctx.repository.insert(&second, &hash()).await
    });

    assert_eq!(
        result,
        Err(UserPersistenceError::duplicate_email("ada@example.com"))
    );
    let listed = ctx.block_on(ctx.repository.list()).expect("list");
    assert_eq!(listed, vec![first]);
}

#[rstest]
fn mixed_case_emails_are_rejected_by_the_schema(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: mixed_case_emails_are_rejected_by_the_schema skipped");
        return;
    };
    let mut conn = ctx.raw_connection();

    let result = diesel::sql_query(
        "INSERT INTO users (id, name, about, avatar, email, password_hash) \
         VALUES ('7d8f0c4e-2b1a-4c3d-9e5f-6a7b8c9d0e1f', 'Ada', 'Explorer', 'https://x.test/a.png', \
         'Ada@Example.com', 'hash')",
    )
    .execute(&mut conn);

    match result {
        Err(DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info)) => {
            assert_eq!(info.constraint_name(), Some("users_email_lowercase"));
        }
        other => panic!("expected a check violation, got {other:?}"),
    }
}

#[rstest]
fn profile_updates_touch_only_the_given_fields(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: profile_updates_touch_only_the_given_fields skipped");
        return;
    };
    let user = user_with_email("grace@example.com");
    let update = ProfileUpdate::try_from_parts(None, Some("Admiral")).expect("valid update");
    let avatar = AvatarUrl::new("https://x.test/grace.png").expect("valid avatar");

    let (updated, with_avatar) = ctx.block_on(async {
        ctx.repository.insert(&user, &hash()).await.expect("insert");
        let updated = ctx
            .repository
            .update_profile(user.id(), &update)
            .await
            .expect("update profile");
        let with_avatar = ctx
            .repository
            .update_avatar(user.id(), &avatar)
            .await
            .expect("update avatar");
        (updated, with_avatar)
    });

    assert_eq!(updated, Some(user.with_update(&update)));
    assert_eq!(
        with_avatar,
        Some(user.with_update(&update).with_avatar(avatar))
    );
}

#[rstest]
fn updates_for_unknown_users_return_none(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: updates_for_unknown_users_return_none skipped");
        return;
    };
    let update = ProfileUpdate::try_from_parts(Some("Nobody"), None).expect("valid update");

    let (found, updated) = ctx.block_on(async {
        let id = UserId::random();
        let found = ctx.repository.find_by_id(&id).await.expect("find");
        let updated = ctx
            .repository
            .update_profile(&id, &update)
            .await
            .expect("update");
        (found, updated)
    });

    assert!(found.is_none());
    assert!(updated.is_none());
}
