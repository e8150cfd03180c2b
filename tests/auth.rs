use chrono::Utc;
use custom_shop::{
    dto::auth::Claims,
    entity::users,
    middleware::auth::{AuthUser, ROLE_ADMIN, ensure_admin},
    error::AppError,
    services::auth_service::{hash_password, issue_token, verify_password},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

#[test]
fn password_hash_round_trip() {
    let hash = hash_password("s3cret-pass").expect("hash");
    assert_ne!(hash, "s3cret-pass");
    assert!(verify_password("s3cret-pass", &hash).expect("verify"));
    assert!(!verify_password("wrong", &hash).expect("verify"));
}

#[test]
fn corrupt_hash_is_an_internal_error() {
    assert!(matches!(
        verify_password("x", "not-a-phc-string"),
        Err(AppError::Internal(_))
    ));
}

#[test]
fn issued_token_carries_subject_and_role() {
    let user = users::Model {
        id: Uuid::new_v4(),
        email: "staff@example.com".into(),
        password_hash: String::new(),
        role: ROLE_ADMIN.into(),
        created_at: Utc::now().into(),
    };
    let token = issue_token(&user, "test-secret").expect("token");

    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(b"test-secret"),
        &Validation::default(),
    )
    .expect("decode");
    assert_eq!(decoded.claims.sub, user.id.to_string());
    assert_eq!(decoded.claims.role, ROLE_ADMIN);
    assert!(decoded.claims.exp as i64 > Utc::now().timestamp() + 23 * 3600);
}

#[test]
fn only_admins_pass_the_role_check() {
    let staff = AuthUser {
        user_id: Uuid::new_v4(),
        role: "staff".into(),
    };
    assert!(matches!(ensure_admin(&staff), Err(AppError::Forbidden)));

    let admin = AuthUser {
        user_id: Uuid::new_v4(),
        role: ROLE_ADMIN.into(),
    };
    assert!(ensure_admin(&admin).is_ok());
}
