use crate::error::PreviewError;
use crate::event::{AppEvent, EventSender};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info};

pub const NOT_AN_IMAGE_MESSAGE: &str = "Please choose an image file.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub file_name: String,
    pub mime: &'static str,
    pub data_url: String,
    pub bytes: Arc<[u8]>,
}

pub fn build_preview(path: &Path, bytes: Vec<u8>) -> Result<ImagePreview, PreviewError> {
    let format = image::guess_format(&bytes).map_err(|_| PreviewError::NotAnImage {
        path: path.to_path_buf(),
    })?;
    let mime = format.to_mime_type();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());

    Ok(ImagePreview {
        data_url: format!("data:{mime};base64,{}", B64.encode(&bytes)),
        file_name,
        mime,
        bytes: Arc::from(bytes),
    })
}

pub async fn read_preview(path: PathBuf) -> Result<ImagePreview, PreviewError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| PreviewError::Io {
            path: path.clone(),
            source,
        })?;
    build_preview(&path, bytes)
}

pub fn pick_image(runtime_handle: &Handle, events: EventSender) {
    runtime_handle.spawn(async move {
        let Some(handle) = rfd::AsyncFileDialog::new()
            .set_title("Choose an image")
            .pick_file()
            .await
        else {
            debug!("image picker cancelled");
            return;
        };
        let path = handle.path().to_path_buf();
        info!("reading image {}", path.display());
        events.send(AppEvent::ImageRead(read_preview(path).await));
    });
}

#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    current: Option<ImagePreview>,
    rejection: Option<String>,
}

impl PreviewState {
    pub fn current(&self) -> Option<&ImagePreview> {
        self.current.as_ref()
    }

    pub fn rejection(&self) -> Option<&str> {
        self.rejection.as_deref()
    }

    pub fn apply(&mut self, result: Result<ImagePreview, PreviewError>) {
        match result {
            Ok(preview) => {
                self.current = Some(preview);
                self.rejection = None;
            }
            Err(PreviewError::NotAnImage { .. }) => {
                self.rejection = Some(NOT_AN_IMAGE_MESSAGE.to_string());
            }
            Err(PreviewError::Io { path, .. }) => {
                self.rejection = Some(format!(
                    "Could not read {}.",
                    path.file_name()
                        .map(|name| name.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string())
                ));
            }
        }
    }
}
