// /pos-dashboard/services/pos-service/src/core/storage.rs

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use crate::{
    models::SignedUploadUrl,
    utils::config::StorageConfig,
    utils::error::{AppError, AppResult},
};

/// Response Supabase untuk signed upload, `url` relatif terhadap /storage/v1
#[derive(Debug, Deserialize)]
struct SignUploadResponse {
    url: String,
}

/// Client Supabase Storage untuk gambar product
pub struct StorageClient {
    client: Client,
    base_url: String,
    service_role_key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(config: &StorageConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: format!("{}/storage/v1", config.supabase_url),
            service_role_key: config.service_role_key.clone(),
            bucket: config.product_images_bucket.clone(),
        })
    }

    /// Minta signed upload URL untuk file `<unix_millis>.jpeg`
    pub async fn create_product_image_upload_url(&self) -> AppResult<SignedUploadUrl> {
        let path = format!("{}.jpeg", Utc::now().timestamp_millis());
        self.create_signed_upload_url(&path).await
    }

    async fn create_signed_upload_url(&self, path: &str) -> AppResult<SignedUploadUrl> {
        let response = self.client
            .post(format!("{}/object/upload/sign/{}/{}", self.base_url, self.bucket, path))
            .bearer_auth(&self.service_role_key)
            .header("apikey", &self.service_role_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|json| json["message"].as_str().map(|m| m.to_string()))
                .unwrap_or(body);

            return Err(AppError::ExternalService(format!(
                "Storage signed upload error ({}): {}",
                status, message
            )));
        }

        let signed: SignUploadResponse = response.json().await
            .map_err(|e| AppError::ExternalService(format!("Failed to parse storage response: {}", e)))?;

        let token = signed.url
            .split_once("token=")
            .map(|(_, rest)| rest.split('&').next().unwrap_or(rest).to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::ExternalService("Storage response tidak memiliki token".to_string())
            })?;

        tracing::debug!("Signed upload URL created for {}/{}", self.bucket, path);

        Ok(SignedUploadUrl {
            signed_url: format!("{}{}", self.base_url, signed.url),
            token,
            path: path.to_string(),
            public_url: format!("{}/object/public/{}/{}", self.base_url, self.bucket, path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> StorageClient {
        StorageClient::new(&StorageConfig {
            supabase_url: server.url(),
            service_role_key: "service-role".to_string(),
            product_images_bucket: "product-images".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_signed_upload_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/storage/v1/object/upload/sign/product-images/1700000000000.jpeg")
            .match_header("authorization", "Bearer service-role")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"url":"/object/upload/sign/product-images/1700000000000.jpeg?token=abc.def"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let signed = client.create_signed_upload_url("1700000000000.jpeg").await.unwrap();

        mock.assert_async().await;
        assert_eq!(signed.token, "abc.def");
        assert_eq!(signed.path, "1700000000000.jpeg");
        assert_eq!(
            signed.signed_url,
            format!("{}/storage/v1/object/upload/sign/product-images/1700000000000.jpeg?token=abc.def", server.url())
        );
        assert_eq!(
            signed.public_url,
            format!("{}/storage/v1/object/public/product-images/1700000000000.jpeg", server.url())
        );
    }

    #[tokio::test]
    async fn test_product_image_path_is_jpeg() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", mockito::Matcher::Regex(r"^/storage/v1/object/upload/sign/product-images/\d+\.jpeg$".to_string()))
            .with_status(200)
            .with_body(r#"{"url":"/object/upload/sign/product-images/x.jpeg?token=t1"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let signed = client.create_product_image_upload_url().await.unwrap();
        assert!(signed.path.ends_with(".jpeg"));
        assert_eq!(signed.token, "t1");
    }

    #[tokio::test]
    async fn test_storage_error_is_upstream_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"statusCode":"404","error":"Bucket not found","message":"Bucket not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.create_product_image_upload_url().await.unwrap_err();
        match err {
            AppError::ExternalService(msg) => assert!(msg.contains("Bucket not found")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
