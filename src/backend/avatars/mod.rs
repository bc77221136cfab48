//! Avatars Module
//!
//! Upload handling for user avatars. An upload is staged in the temp
//! directory, decoded, resized to a square, written back in the format its
//! extension names and finally moved under `{public_dir}/avatars`, which the
//! router serves at `/avatars`.
//!
//! # Module Structure
//!
//! ```text
//! avatars/
//! ├── mod.rs      - AvatarStore and AvatarError
//! └── handlers.rs - PATCH /auth/avatars
//! ```

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Utc;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;
use uuid::Uuid;

/// Avatar upload handler
pub mod handlers;

pub use handlers::update_avatar;

/// URL prefix under which stored avatars are served
pub const AVATARS_URL_PREFIX: &str = "/avatars";

/// Avatar processing errors
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Filesystem failure while staging or moving the file
    #[error("avatar file operation failed: {0}")]
    Io(#[from] io::Error),

    /// Upload could not be decoded or re-encoded
    #[error("avatar image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// Extension does not name a writable image format
    #[error("unsupported avatar format: {name}")]
    UnsupportedFormat { name: String },

    /// Processing task panicked
    #[error("avatar processing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// An avatar that has been written to the public directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAvatar {
    /// Public URL, `/avatars/{name}`
    pub url: String,
    path: PathBuf,
}

/// Where avatars are staged and stored, and their size
#[derive(Debug, Clone)]
pub struct AvatarStore {
    public_dir: PathBuf,
    temp_dir: PathBuf,
    size: u32,
}

impl AvatarStore {
    pub fn new(public_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>, size: u32) -> Self {
        Self {
            public_dir: public_dir.into(),
            temp_dir: temp_dir.into(),
            size,
        }
    }

    /// Directory served at `/avatars`
    pub fn avatars_dir(&self) -> PathBuf {
        self.public_dir.join("avatars")
    }

    /// Create the staging and avatar directories if they are missing
    pub async fn prepare(&self) -> Result<(), AvatarError> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        tokio::fs::create_dir_all(self.avatars_dir()).await?;
        Ok(())
    }

    /// `{user_id}_{unix_millis}{.ext}`, keeping the original extension
    pub fn file_name(user_id: Uuid, original_name: &str, unix_millis: i64) -> String {
        format!("{user_id}_{unix_millis}{}", extension(original_name))
    }

    /// Stage, resize and publish an upload
    ///
    /// The staged file is gone when this returns, whatever the outcome.
    pub async fn store(
        &self,
        user_id: Uuid,
        original_name: &str,
        data: Bytes,
    ) -> Result<StoredAvatar, AvatarError> {
        let extension = extension(original_name);
        let format = ImageFormat::from_extension(extension.trim_start_matches('.')).ok_or_else(
            || AvatarError::UnsupportedFormat {
                name: original_name.to_string(),
            },
        )?;

        // Staged names are per request; only the published name is user-facing
        let staged = self.temp_dir.join(format!("{}{extension}", Uuid::new_v4()));

        let result = match self.process(&staged, format, data).await {
            Ok(()) => self.publish(&staged, user_id, &extension).await,
            Err(e) => Err(e),
        };
        discard(&staged).await;
        result
    }

    /// Remove a published avatar, used when the user update fails
    pub async fn remove(&self, avatar: &StoredAvatar) {
        discard(&avatar.path).await;
    }

    async fn process(&self, staged: &Path, format: ImageFormat, data: Bytes) -> Result<(), AvatarError> {
        tokio::fs::write(staged, &data).await?;

        let size = self.size;
        let staged_path = staged.to_path_buf();
        tokio::task::spawn_blocking(move || resize_in_place(&staged_path, format, size)).await??;
        Ok(())
    }

    async fn publish(
        &self,
        staged: &Path,
        user_id: Uuid,
        extension: &str,
    ) -> Result<StoredAvatar, AvatarError> {
        let (name, target) = self.reserve(user_id, extension).await?;
        if let Err(e) = move_file(staged, &target).await {
            discard(&target).await;
            return Err(e.into());
        }

        tracing::debug!("Avatar written to {}", target.display());
        Ok(StoredAvatar {
            url: format!("{AVATARS_URL_PREFIX}/{name}"),
            path: target,
        })
    }

    /// Claim an unused public name, moving to the next millisecond on a clash
    async fn reserve(&self, user_id: Uuid, extension: &str) -> io::Result<(String, PathBuf)> {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let name = format!("{user_id}_{millis}{extension}");
            let path = self.avatars_dir().join(&name);
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => return Ok((name, path)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => millis += 1,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Lower-cased `.ext` of an upload name, or empty
fn extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

fn resize_in_place(path: &Path, format: ImageFormat, size: u32) -> Result<(), AvatarError> {
    let image = image::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()?;
    let resized = image.resize_exact(size, size, FilterType::Lanczos3);

    // JPEG has no alpha channel
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        _ => resized,
    };
    resized.save_with_format(path, format)?;
    Ok(())
}

async fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    // rename fails across filesystems
    tokio::fs::copy(from, to).await?;
    tokio::fs::remove_file(from).await
}

async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
    }
}
