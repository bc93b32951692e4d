use super::*;
use crate::config::AuthScheme;
use crate::request::{MockHttpClient, RequestBody};
use crate::session::MemoryStorage;
use icycon_shared::{
    ExportFormat, ExportRequest, MarketplaceProduct, ProductDraft, SeoKeywordCluster, SeoSite,
    SeoSiteDraft, SocialPost,
};
use serde_json::json;

const BASE: &str = "http://api.test";

// =========================================================
// Helpers
// =========================================================

type TestClient = ResourceClient<Rc<MockHttpClient>, MemoryStorage>;

fn setup() -> (TestClient, Rc<MockHttpClient>, MemoryStorage) {
    let mock = Rc::new(MockHttpClient::new());
    let storage = MemoryStorage::new();
    let client = ResourceClient::new(
        ClientConfig::new(BASE),
        mock.clone(),
        SessionContext::new(storage.clone()),
    );
    (client, mock, storage)
}

fn signed_in() -> (TestClient, Rc<MockHttpClient>, MemoryStorage) {
    let (client, mock, storage) = setup();
    storage.set("authToken", "T0");
    (client, mock, storage)
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn draft() -> SeoSiteDraft {
    SeoSiteDraft {
        domain: "icycon.io".to_string(),
        sitemaps_url: None,
        default_locale: "en".to_string(),
    }
}

// =========================================================
// Authentication gate
// =========================================================

#[tokio::test]
async fn list_without_token_fails_fast_for_every_resource() {
    let (client, mock, _) = setup();

    let sites = client.list::<SeoSite>().await;
    let keywords = client.list::<SeoKeywordCluster>().await;
    let posts = client.list::<SocialPost>().await;
    let raw = client.list_at::<Value>("/api/anything/", "Anything").await;

    assert_eq!(sites.unwrap_err(), ClientError::Unauthenticated);
    assert_eq!(keywords.unwrap_err(), ClientError::Unauthenticated);
    assert_eq!(posts.unwrap_err(), ClientError::Unauthenticated);
    assert_eq!(raw.unwrap_err(), ClientError::Unauthenticated);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn mutations_without_token_fail_fast() {
    let (client, mock, _) = setup();

    assert_eq!(
        client.create::<SeoSite>(&draft()).await.unwrap_err(),
        ClientError::Unauthenticated
    );
    assert_eq!(
        client.remove::<SeoSite>(&RecordId::Int(1)).await.unwrap_err(),
        ClientError::Unauthenticated
    );
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn login_persists_token_used_by_later_calls() {
    let (client, mock, storage) = setup();
    mock.mock_json(
        HttpMethod::Post,
        &url("/api/auth/login/"),
        200,
        json!({"token": "T1", "user": {"email": "a@b.com"}}),
    );
    mock.mock_json(HttpMethod::Get, &url("/api/seo/sites/"), 200, json!([]));

    let session = client.login("a@b.com", "pw").await.unwrap();
    assert_eq!(session.token, "T1");
    assert_eq!(storage.get("authToken").as_deref(), Some("T1"));
    assert_eq!(client.current_user().unwrap().email, "a@b.com");

    let login_req = mock.last_request().unwrap();
    assert_eq!(login_req.header("Authorization"), None);
    assert_eq!(
        login_req.body,
        RequestBody::Json(json!({"email": "a@b.com", "password": "pw"}).to_string())
    );

    client.list::<SeoSite>().await.unwrap();
    let list_req = mock.last_request().unwrap();
    assert!(list_req.header("Authorization").unwrap().contains("T1"));
}

#[tokio::test]
async fn login_with_blank_fields_never_reaches_the_network() {
    let (client, mock, _) = setup();
    let err = client.login("", "pw").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn rejected_login_surfaces_server_message_and_stores_nothing() {
    let (client, mock, storage) = setup();
    mock.mock_json(
        HttpMethod::Post,
        &url("/api/auth/login/"),
        400,
        json!({"non_field_errors": ["Unable to log in with provided credentials."]}),
    );

    let err = client.login("a@b.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Unable to log in with provided credentials.");
    assert_eq!(storage.get("authToken"), None);
}

#[tokio::test]
async fn signup_accepts_flat_response() {
    let (client, mock, storage) = setup();
    mock.mock_json(
        HttpMethod::Post,
        &url("/api/auth/signup/"),
        201,
        json!({"email": "n@b.com", "username": "n", "token": "T9"}),
    );

    let req = SignupRequest {
        email: "n@b.com".into(),
        username: "n".into(),
        password: "secret123".into(),
        password_confirm: "secret123".into(),
    };
    let session = client.signup(&req).await.unwrap();
    assert_eq!(session.user.username, "n");
    assert_eq!(storage.get("authToken").as_deref(), Some("T9"));
}

#[tokio::test]
async fn signup_with_mismatched_passwords_is_rejected_locally() {
    let (client, mock, _) = setup();
    let req = SignupRequest {
        email: "n@b.com".into(),
        username: "n".into(),
        password: "secret123".into(),
        password_confirm: "secret124".into(),
    };
    assert!(matches!(
        client.signup(&req).await,
        Err(ClientError::Validation(_))
    ));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn logout_clears_token_and_user() {
    let (client, _, storage) = signed_in();
    storage.set("user", r#"{"email":"a@b.com"}"#);

    client.logout();

    assert_eq!(storage.get("authToken"), None);
    assert_eq!(storage.get("user"), None);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn bearer_scheme_is_honoured() {
    let mock = Rc::new(MockHttpClient::new());
    let storage = MemoryStorage::new();
    storage.set("authToken", "abc");
    let client = ResourceClient::new(
        ClientConfig::new(BASE).with_auth_scheme(AuthScheme::Bearer),
        mock.clone(),
        SessionContext::new(storage),
    );
    mock.mock_json(HttpMethod::Get, &url("/api/seo/sites/"), 200, json!([]));

    client.list::<SeoSite>().await.unwrap();
    assert_eq!(
        mock.last_request().unwrap().header("authorization"),
        Some("Bearer abc")
    );
}

// =========================================================
// Resource operations
// =========================================================

#[tokio::test]
async fn create_returns_the_parsed_body_exactly() {
    let (client, mock, _) = signed_in();
    let body = json!({
        "id": 12,
        "title": "Audit pack",
        "description": "",
        "category": "seo",
        "price": 49.5,
        "pricing_type": "one-time",
        "featured_image": null,
        "rating": null,
        "review_count": 0
    });
    mock.mock_json(HttpMethod::Post, &url("/api/marketplace/products/"), 201, body.clone());

    let created = client
        .create::<MarketplaceProduct>(&ProductDraft {
            title: "Audit pack".into(),
            description: String::new(),
            category: "seo".into(),
            price: 49.5,
            pricing_type: "one-time".into(),
            featured_image: None,
        })
        .await
        .unwrap();

    let expected: MarketplaceProduct = serde_json::from_value(body).unwrap();
    assert_eq!(created, Mutation::Record(expected));

    let req = mock.last_request().unwrap();
    assert_eq!(req.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn update_patches_item_path() {
    let (client, mock, _) = signed_in();
    mock.mock_json(
        HttpMethod::Patch,
        &url("/api/seo/sites/4/"),
        200,
        json!({"id": 4, "domain": "icycon.io"}),
    );

    let updated = client
        .update::<SeoSite>(&RecordId::Int(4), &draft())
        .await
        .unwrap();
    assert_eq!(updated.into_record().unwrap().domain, "icycon.io");
}

#[tokio::test]
async fn no_content_mutation_yields_marker() {
    let (client, mock, _) = signed_in();
    mock.mock_no_content(HttpMethod::Patch, &url("/api/seo/sites/4/"));
    mock.mock_no_content(HttpMethod::Delete, &url("/api/seo/sites/4/"));

    let updated = client
        .update::<SeoSite>(&RecordId::Int(4), &draft())
        .await
        .unwrap();
    assert!(updated.is_no_content());

    let removed = client.remove::<SeoSite>(&RecordId::Int(4)).await.unwrap();
    assert!(removed);
}

#[tokio::test]
async fn list_is_never_cached() {
    let (client, mock, _) = signed_in();
    mock.mock_json(HttpMethod::Get, &url("/api/seo/sites/"), 200, json!([{"id": 1, "domain": "a.io"}]));

    let first = client.list::<SeoSite>().await.unwrap();
    let second = client.list::<SeoSite>().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn list_unwraps_paginated_envelope() {
    let (client, mock, _) = signed_in();
    mock.mock_json(
        HttpMethod::Get,
        &url("/api/seo/sites/"),
        200,
        json!({"count": 2, "next": null, "previous": null, "results": [
            {"id": 1, "domain": "a.io"}, {"id": 2, "domain": "b.io"}
        ]}),
    );

    let sites = client.list::<SeoSite>().await.unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[1].domain, "b.io");
}

#[tokio::test]
async fn unstructured_error_uses_generic_message() {
    let (client, mock, _) = signed_in();
    mock.mock_raw(
        HttpMethod::Get,
        &url("/api/seo/sites/9/"),
        404,
        Some("text/html"),
        b"<h1>Not Found</h1>",
    );

    let err = client.get::<SeoSite>(&RecordId::Int(9)).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Server {
            status: 404,
            message: "SEO sites request failed".to_string()
        }
    );
}

#[tokio::test]
async fn field_error_is_surfaced() {
    let (client, mock, _) = signed_in();
    mock.mock_json(
        HttpMethod::Post,
        &url("/api/seo/sites/"),
        400,
        json!({"domain": ["site with this domain already exists."]}),
    );

    let err = client.create::<SeoSite>(&draft()).await.unwrap_err();
    assert_eq!(err.to_string(), "domain: site with this domain already exists.");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn transport_failure_is_distinct() {
    let (client, mock, _) = signed_in();
    mock.mock_failure(HttpMethod::Get, &url("/api/seo/sites/"), "connection refused");

    let err = client.list::<SeoSite>().await.unwrap_err();
    assert_eq!(err, ClientError::Transport("connection refused".to_string()));
    assert!(err.is_retryable_by_user());
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let (client, mock, _) = signed_in();
    mock.mock_json(HttpMethod::Get, &url("/api/seo/sites/"), 200, json!({"unexpected": true}));

    assert!(matches!(
        client.list::<SeoSite>().await,
        Err(ClientError::Decode(_))
    ));
}

// =========================================================
// Files and exports
// =========================================================

#[tokio::test]
async fn export_returns_binary_without_parsing() {
    let (client, mock, _) = signed_in();
    mock.mock_raw(
        HttpMethod::Post,
        &url("/api/analytics/export/"),
        200,
        Some("text/csv"),
        b"url,views\n/,10\n",
    );

    let payload = client
        .export_analytics(&ExportRequest {
            format: ExportFormat::Csv,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        payload,
        ApiPayload::Binary {
            content_type: Some("text/csv".to_string()),
            bytes: b"url,views\n/,10\n".to_vec()
        }
    );
}

#[tokio::test]
async fn blank_download_is_still_a_download() {
    let (client, mock, _) = signed_in();
    mock.mock_raw(
        HttpMethod::Post,
        &url("/api/analytics/export/"),
        200,
        Some("text/plain"),
        b"\n",
    );
    mock.mock_raw(
        HttpMethod::Post,
        &url("/api/analytics/export/"),
        200,
        Some("application/json"),
        b" \n",
    );
    let request = ExportRequest::default();

    let text = client.export_analytics(&request).await.unwrap();
    assert_eq!(
        text,
        ApiPayload::Binary {
            content_type: Some("text/plain".to_string()),
            bytes: b"\n".to_vec()
        }
    );
    let json = client.export_analytics(&request).await.unwrap();
    assert_eq!(json, ApiPayload::Empty);
}

#[tokio::test]
async fn export_returns_json_when_declared() {
    let (client, mock, _) = signed_in();
    mock.mock_json(
        HttpMethod::Post,
        &url("/api/analytics/export/"),
        200,
        json!({"download_url": "/media/export.csv"}),
    );

    let payload = client.export_analytics(&ExportRequest::default()).await.unwrap();
    assert_eq!(
        payload,
        ApiPayload::Json(json!({"download_url": "/media/export.csv"}))
    );
}

#[tokio::test]
async fn avatar_upload_sends_multipart_and_returns_url() {
    let (client, mock, _) = signed_in();
    mock.mock_json(
        HttpMethod::Post,
        &url("/api/profile/avatar/"),
        200,
        json!({"avatar_url": "/media/avatars/me.png"}),
    );

    let file = FileUpload {
        file_name: "me.png".into(),
        mime: "image/png".into(),
        bytes: vec![0x89, 0x50],
    };
    let location = client.upload_avatar(file.clone()).await.unwrap();
    assert_eq!(location, "/media/avatars/me.png");

    let req = mock.last_request().unwrap();
    assert_eq!(req.header("Content-Type"), None);
    assert_eq!(
        req.body,
        RequestBody::Multipart(vec![FormPart::File {
            name: "avatar".into(),
            file
        }])
    );
}

#[tokio::test]
async fn change_email_refreshes_user_snapshot() {
    let (client, mock, storage) = signed_in();
    storage.set("user", r#"{"email":"old@b.com"}"#);
    mock.mock_no_content(HttpMethod::Post, &url("/api/auth/email/"));

    client
        .change_email(&ChangeEmailRequest {
            new_email: "new@b.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();

    assert_eq!(client.current_user().unwrap().email, "new@b.com");
}
