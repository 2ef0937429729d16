use crate::error::ApiError;
use crate::session::SupabaseClient;
use crate::transport::Transport;
use crate::types::UserMetadata;

/// Profile metadata of the signed-in user, returned as stored by the service.
///
/// Fails with `ApiError::NoActiveSession` when nobody is signed in; every
/// other failure from `get_user` is passed through as-is.
pub async fn get_user_information<T: Transport>(
    client: &SupabaseClient<T>,
) -> Result<UserMetadata, ApiError> {
    let response = client.get_user().await?;
    response
        .user
        .map(|user| user.user_metadata)
        .ok_or(ApiError::NoActiveSession)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::error::TransportError;
    use crate::http::HttpResponse;
    use crate::transport::mock::MockTransport;
    use crate::types::Session;

    const ANA: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","user_metadata":{"name":"Ana"}}"#;

    fn client(transport: MockTransport) -> SupabaseClient<MockTransport> {
        SupabaseClient::with_transport(
            ClientConfig::new("http://auth.test", "anon").unwrap(),
            transport,
        )
    }

    async fn signed_in(transport: MockTransport) -> SupabaseClient<MockTransport> {
        let client = client(transport);
        client
            .set_session(Session {
                access_token: "tok".into(),
                token_type: "bearer".into(),
                expires_in: 3600,
                refresh_token: None,
                user: None,
            })
            .await;
        client
    }

    #[tokio::test]
    async fn returns_metadata_unmodified() {
        let client = signed_in(MockTransport::new(|_| Ok(HttpResponse::new(200, ANA)))).await;
        let metadata = get_user_information(&client).await.unwrap();
        assert_eq!(serde_json::Value::Object(metadata), json!({ "name": "Ana" }));
    }

    #[tokio::test]
    async fn no_session_is_a_typed_error() {
        let client = client(MockTransport::new(|_| panic!("no request expected")));
        let err = get_user_information(&client).await.unwrap_err();
        assert!(matches!(err, ApiError::NoActiveSession));
    }

    #[tokio::test]
    async fn rejected_session_is_a_typed_error() {
        let client =
            signed_in(MockTransport::new(|_| Ok(HttpResponse::new(401, "expired")))).await;
        let err = get_user_information(&client).await.unwrap_err();
        assert!(matches!(err, ApiError::NoActiveSession));
    }

    #[tokio::test]
    async fn wrong_api_key_surfaces_as_config_failure() {
        let client = signed_in(MockTransport::new(|_| {
            Ok(HttpResponse::new(401, r#"{"message":"Invalid API key"}"#))
        }))
        .await;
        let err = get_user_information(&client).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidApiKey { .. }));
    }

    #[tokio::test]
    async fn network_error_propagates_unchanged() {
        let original = TransportError("connection reset by peer".into());
        let returned = original.clone();
        let client = signed_in(MockTransport::new(move |_| Err(returned.clone()))).await;
        let err = get_user_information(&client).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(e) if e == original));
    }

    #[tokio::test]
    async fn server_error_propagates() {
        let client = signed_in(MockTransport::new(|_| Ok(HttpResponse::new(500, "boom")))).await;
        let err = get_user_information(&client).await.unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[tokio::test]
    async fn concurrent_calls_resolve_independently() {
        let client = signed_in(MockTransport::new(|_| {
            Ok(HttpResponse::new(
                200,
                r#"{"id":"00000000-0000-0000-0000-000000000001","user_metadata":{"name":"Ana","plan":"pro"}}"#,
            ))
        }))
        .await;
        let (a, b) = tokio::join!(get_user_information(&client), get_user_information(&client));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a, b);
        assert_eq!(a["plan"], "pro");
        assert_eq!(client.transport().request_count(), 2);
    }
}
