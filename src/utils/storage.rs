use crate::types::StorageContext;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde::{Deserialize, Serialize};
use axum_typed_multipart::FieldData;
use sha2::{Digest, Sha256};
use std::io::Read;
use tempfile::NamedTempFile;
use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    UploadFailed,
    DeleteFailed,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Serialize, Clone, Debug, Deserialize, PartialEq)]
pub struct UploadedMedia {
    pub public_id: String,
    pub url: String,
    pub timestamp: i64,
}

/// Signs `params` (already sorted by key) the way Cloudinary expects.
fn sign(params: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}{}", params, api_secret));
    base16ct::lower::encode_string(&hasher.finalize())
}

/// Reads a multipart upload buffered to disk back into memory.
pub fn read_upload(mut file: FieldData<NamedTempFile>) -> Result<Vec<u8>, Error> {
    let mut buf: Vec<u8> = vec![];

    file.contents.read_to_end(&mut buf).map_err(|err| {
        tracing::error!("Failed to read the uploaded file {:?}", err);
        Error::UploadFailed
    })?;

    Ok(buf)
}

pub async fn upload_file(cfg: StorageContext, contents: Vec<u8>) -> Result<UploadedMedia, Error> {
    let file_name = Ulid::new().to_string();
    let part = Part::bytes(contents).file_name(file_name);

    let timestamp = chrono::Utc::now().timestamp();
    let signature = sign(
        &format!(
            "timestamp={}&upload_preset={}",
            timestamp, cfg.upload_preset
        ),
        &cfg.api_secret,
    );

    let form = Form::new()
        .text("upload_preset", cfg.upload_preset.clone())
        .text("api_key", cfg.api_key.clone())
        .text("timestamp", format!("{}", timestamp))
        .text("signature", signature)
        .text("signature_algorithm", "sha256")
        .part("file", part);

    let res = Client::new()
        .post(cfg.upload_endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to upload a file: {:?}", err);
            Error::UploadFailed
        })?;

    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!("Error occurred while processing return data: {:?}", err);
        Error::UploadFailed
    })?;

    if status != StatusCode::OK {
        tracing::error!("Failed to upload file: {}", data);
        return Err(Error::UploadFailed);
    }

    serde_json::de::from_str::<UploadResponse>(data.as_ref())
        .map(|res| UploadedMedia {
            url: res.secure_url,
            public_id: res.public_id,
            timestamp,
        })
        .map_err(|err| {
            tracing::error!("Failed to parse upload response: {}", err);
            Error::UploadFailed
        })
}

pub async fn delete_file(cfg: StorageContext, media: UploadedMedia) -> Result<(), Error> {
    let timestamp = chrono::Utc::now().timestamp();
    let signature = sign(
        &format!("public_id={}&timestamp={}", media.public_id, timestamp),
        &cfg.api_secret,
    );

    let form = Form::new()
        .text("public_id", media.public_id.clone())
        .text("api_key", cfg.api_key.clone())
        .text("timestamp", format!("{}", timestamp))
        .text("signature", signature)
        .text("signature_algorithm", "sha256");

    let res = Client::new()
        .post(cfg.delete_endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to delete a file: {:?}", err);
            Error::DeleteFailed
        })?;

    if res.status() != StatusCode::OK {
        tracing::error!(
            "Failed to delete file {}: {}",
            media.public_id,
            res.text().await.unwrap_or_default()
        );
        return Err(Error::DeleteFailed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_lowercase_sha256_hex() {
        let signature = sign("timestamp=1&upload_preset=p", "secret");
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(signature, sign("timestamp=1&upload_preset=p", "secret"));
        assert_ne!(signature, sign("timestamp=2&upload_preset=p", "secret"));
    }
}
