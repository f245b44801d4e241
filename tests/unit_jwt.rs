use parceltrack::config::jwt::JwtConfig;
use parceltrack::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 1800,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let result = create_access_token(user_id, "test@example.com", &jwt_config);

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_verify_token_round_trip() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let email = "test@example.com";

    let token = create_access_token(user_id, email, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, email);
    assert_eq!(claims.exp, claims.iat + 1800);
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("invalid.token.here", &jwt_config);

    assert!(result.is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token =
        create_access_token(Uuid::new_v4(), "test@example.com", &jwt_config).unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 1800,
    };

    assert!(verify_token(&token, &wrong_jwt_config).is_err());
}

#[test]
fn test_verify_token_expired() {
    let jwt_config = JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        // Already in the past at issue time; jsonwebtoken's default
        // leeway is 60 seconds, so go well beyond it.
        access_token_expiry: -120,
    };

    let token = create_access_token(Uuid::new_v4(), "test@example.com", &jwt_config).unwrap();

    assert!(verify_token(&token, &jwt_config).is_err());
}

#[test]
fn test_tampered_token_rejected() {
    let jwt_config = get_test_jwt_config();
    let token =
        create_access_token(Uuid::new_v4(), "test@example.com", &jwt_config).unwrap();

    let mut tampered = token.clone();
    tampered.pop();
    tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

    assert!(verify_token(&tampered, &jwt_config).is_err());
}
