//! Uploaded image checks and storage
//!
//! Every file of a request is checked before any of them is written, and a
//! failed request removes what it already stored.

use market_core::value_objects::ImageFormat;
use tracing::warn;

use crate::dto::UploadedImage;

use super::context::ServiceContext;
use super::error::{FieldErrors, ServiceError, ServiceResult};

const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";

pub(crate) struct ImageStore<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ImageStore<'a> {
    pub(crate) fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sniff the format of every file, reporting all failures under `field`
    fn check(&self, field: &str, images: &[UploadedImage]) -> ServiceResult<Vec<ImageFormat>> {
        let max_bytes = self.ctx.max_upload_bytes();
        let mut messages = Vec::new();
        let mut formats = Vec::with_capacity(images.len());

        for image in images {
            let name = image.file_name.as_deref().unwrap_or("upload");
            if image.bytes.len() > max_bytes {
                messages.push(format!(
                    "{name}: file too large. Maximum size is {} MB.",
                    max_bytes / (1024 * 1024)
                ));
                continue;
            }
            match ImageFormat::sniff(&image.bytes) {
                Some(format) => formats.push(format),
                None => messages.push(format!("{name}: {INVALID_IMAGE}")),
            }
        }

        if messages.is_empty() {
            Ok(formats)
        } else {
            let mut fields = FieldErrors::new();
            fields.insert(field.to_string(), messages);
            Err(ServiceError::fields(fields))
        }
    }

    /// Check and store `images` under `folder`, returning storage paths
    pub(crate) async fn save_all(
        &self,
        folder: &str,
        field: &str,
        images: &[UploadedImage],
    ) -> ServiceResult<Vec<String>> {
        let formats = self.check(field, images)?;
        let storage = self.ctx.file_storage();
        let mut paths = Vec::with_capacity(images.len());

        for (image, format) in images.iter().zip(formats) {
            match storage.save(folder, format.extension(), &image.bytes).await {
                Ok(path) => paths.push(path),
                Err(e) => {
                    self.discard(&paths).await;
                    return Err(e.into());
                }
            }
        }

        Ok(paths)
    }

    /// Best-effort removal; failures are logged and swallowed
    pub(crate) async fn discard(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.ctx.file_storage().delete(path).await {
                warn!(path = %path, error = %e, "Failed to remove stored image");
            }
        }
    }
}
