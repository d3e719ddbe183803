//! Multipart form extractor
//!
//! Category and product writes arrive as `multipart/form-data`. Text parts
//! are collected as strings, file parts as raw bytes; content checks happen
//! in the service layer.

use axum::{
    async_trait,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::StatusCode,
};
use market_service::dto::{CategoryForm, ProductForm, UploadedImage};

use crate::response::ApiError;

/// A form that can be filled part by part from a multipart body
pub trait FromMultipart: Default + Send {
    /// Field names whose parts carry file content
    const FILE_FIELDS: &'static [&'static str];

    fn text(&mut self, name: &str, value: String);

    fn file(&mut self, name: &str, file: UploadedImage);
}

impl FromMultipart for CategoryForm {
    const FILE_FIELDS: &'static [&'static str] = &["image"];

    fn text(&mut self, name: &str, value: String) {
        if name == "name" {
            self.name = Some(value);
        }
    }

    fn file(&mut self, _name: &str, file: UploadedImage) {
        self.image = Some(file);
    }
}

impl FromMultipart for ProductForm {
    const FILE_FIELDS: &'static [&'static str] = &["upload_images"];

    fn text(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = Some(value),
            "price" => self.price = Some(value),
            "category" => self.category = Some(value),
            "description" => self.description = Some(value),
            _ => {}
        }
    }

    fn file(&mut self, _name: &str, file: UploadedImage) {
        self.upload_images.push(file);
    }
}

/// Multipart body parsed into a form type
#[derive(Debug)]
pub struct MultipartForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for MultipartForm<T>
where
    S: Send + Sync,
    T: FromMultipart,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let mut form = T::default();

        while let Some(field) = multipart.next_field().await.map_err(read_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if T::FILE_FIELDS.contains(&name.as_str()) {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(read_error)?;

                // Browsers send an empty part for an untouched file input
                if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                    continue;
                }

                form.file(
                    &name,
                    UploadedImage {
                        file_name,
                        bytes: bytes.to_vec(),
                    },
                );
            } else {
                let value = field.text().await.map_err(read_error)?;
                form.text(&name, value);
            }
        }

        Ok(MultipartForm(form))
    }
}

fn read_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        tracing::debug!(error = %err, "Malformed multipart body");
        ApiError::invalid_body(err.body_text())
    }
}
