//! Request body extraction for create and update routes.
//!
//! Both `multipart/form-data` (with an optional `image` file part) and JSON
//! bodies end up as the same map of field values.

use axum::{
    Form, Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Map, Value, map::Entry};
use std::path::Path;

use super::ApiError;
use crate::config::UploadsConfig;
use crate::models::UploadedImage;

const IMAGE_FIELD: &str = "image";

/// A file part as received, before the upload rules are applied.
#[derive(Debug)]
pub struct ImagePart {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct CatalogForm {
    pub fields: Map<String, Value>,
    pub image: Option<ImagePart>,
}

impl<S> FromRequest<S> for CatalogForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            let mut form = Self::default();
            for (name, value) in pairs {
                form.push_text(name, value);
            }
            return Ok(form);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let Json(value) = Json::<Value>::from_bytes(&bytes)
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        match value {
            Value::Object(fields) => Ok(Self {
                fields,
                image: None,
            }),
            _ => Err(ApiError::bad_request("Request body must be a JSON object")),
        }
    }
}

impl CatalogForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_some() {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty part when no file was chosen.
                let empty = bytes.is_empty() && file_name.as_deref().is_none_or(str::is_empty);
                if name == IMAGE_FIELD && !empty {
                    form.image = Some(ImagePart {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                continue;
            }

            let text = field.text().await.map_err(multipart_error)?;
            form.push_text(name, text);
        }

        Ok(form)
    }

    /// Repeated keys collect into an array.
    fn push_text(&mut self, name: String, text: String) {
        match self.fields.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(Value::String(text));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(Value::String(text)),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(text)]);
                }
            },
        }
    }

    /// Applies the upload rules to the received image, if any.
    pub fn take_image(&mut self, rules: &UploadsConfig) -> Result<Option<UploadedImage>, ApiError> {
        self.image
            .take()
            .map(|part| accept_image(&part, rules))
            .transpose()
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        ApiError::bad_request(err.body_text())
    }
}

/// Checks type and size and picks the extension the stored file will carry.
pub fn accept_image(part: &ImagePart, rules: &UploadsConfig) -> Result<UploadedImage, ApiError> {
    let extension = image_extension(part.content_type.as_deref(), part.file_name.as_deref())
        .filter(|ext| rules.allows(ext))
        .ok_or_else(|| ApiError::bad_request("File format is not allowed"))?;

    if part.bytes.len() > rules.max_image_bytes {
        return Err(ApiError::bad_request(format!(
            "File is too heavy. Max allowed is {}",
            describe_limit(rules.max_image_bytes)
        )));
    }

    Ok(UploadedImage::new(extension, part.bytes.to_vec()))
}

/// Subtype of the declared content type (`svg+xml` counts as `svg`), or the
/// file extension when no specific type was declared.
fn image_extension(content_type: Option<&str>, file_name: Option<&str>) -> Option<String> {
    let subtype = content_type
        .and_then(|ct| ct.split(';').next())
        .and_then(|essence| essence.split_once('/'))
        .map(|(_, sub)| sub.trim().to_ascii_lowercase())
        .filter(|sub| sub != "octet-stream" && !sub.is_empty());

    match subtype {
        Some(sub) if sub == "svg+xml" => Some("svg".to_string()),
        Some(sub) => Some(sub),
        None => file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .or_else(|| {
                file_name
                    .and_then(|name| mime_guess::from_path(name).first())
                    .map(|mime| mime.subtype().as_str().to_ascii_lowercase())
            }),
    }
}

fn describe_limit(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}mb", bytes / MIB)
    } else {
        format!("{}kb", bytes.div_ceil(1024))
    }
}
