//! Auth claims and payload tests.

#[cfg(test)]
mod tests {
    use super::super::{
        Claims, TokenPair,
        auth::{
            LoginRequest, RefreshRequest, RegisterRequest, TOKEN_TYPE_ACCESS,
            UpdateProfileRequest,
        },
    };
    use chrono::{Duration, Utc};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn claims_sets_expiration_and_iat() {
        let user = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::minutes(30);
        let before = Utc::now().timestamp();
        let claims = Claims::new(user, false, TOKEN_TYPE_ACCESS, expires_at);
        let after = Utc::now().timestamp();

        assert_eq!(claims.sub, user);
        assert!(!claims.is_staff);
        assert!(claims.iat >= before);
        assert!(claims.iat <= after);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn claims_round_trips_through_json() {
        let user = Uuid::new_v4();
        let claims = Claims::new(user, true, TOKEN_TYPE_ACCESS, Utc::now() + Duration::hours(1));

        let encoded = serde_json::to_string(&claims).unwrap();
        let decoded: Claims = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.sub, user);
        assert!(decoded.is_staff);
        assert_eq!(decoded.token_type, TOKEN_TYPE_ACCESS);
    }

    #[test]
    fn token_pair_carries_expiry() {
        let pair = TokenPair::new("acc".to_string(), "ref".to_string(), 900);
        assert_eq!(pair.access_token, "acc");
        assert_eq!(pair.refresh_token, "ref");
        assert_eq!(pair.expires_in, 900);
    }

    #[test]
    fn login_request_deserializes() {
        let req: LoginRequest =
            serde_json::from_value(json!({"email": "reader@example.com", "password": "secret"}))
                .unwrap();
        assert_eq!(req.email, "reader@example.com");
        assert_eq!(req.password, "secret");
    }

    #[test]
    fn register_request_requires_name_fields() {
        let missing: Result<RegisterRequest, _> =
            serde_json::from_value(json!({"email": "a@b.c", "password": "12345"}));
        assert!(missing.is_err());

        let full: RegisterRequest = serde_json::from_value(json!({
            "email": "a@b.c",
            "password": "12345",
            "first_name": "Ada",
            "last_name": "Lovelace"
        }))
        .unwrap();
        assert_eq!(full.first_name, "Ada");
        assert_eq!(full.last_name, "Lovelace");
    }

    #[test]
    fn refresh_request_deserializes() {
        let req: RefreshRequest =
            serde_json::from_value(json!({"refresh_token": "token"})).unwrap();
        assert_eq!(req.refresh_token, "token");
    }

    #[test]
    fn profile_update_fields_default_to_none() {
        let req: UpdateProfileRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.email.is_none());
        assert!(req.first_name.is_none());
        assert!(req.last_name.is_none());
        assert!(req.password.is_none());

        let partial: UpdateProfileRequest =
            serde_json::from_value(json!({"first_name": "Grace"})).unwrap();
        assert_eq!(partial.first_name.as_deref(), Some("Grace"));
        assert!(partial.email.is_none());
    }
}
