use std::fs;
use std::io::Cursor;
use std::path::Path;
use chrono::{DateTime, Utc};
use image::ImageReader;
use crate::config::constants::{DICOM_EXTENSION, DICOM_MIME_TYPE};
use crate::errors::{LungLensError, LungLensResult};
use crate::structs::data_uri::DataUri;
use crate::structs::file_info::FileInfo;
use crate::structs::loaded_image::LoadedImage;

const NOT_AVAILABLE: &str = "N/A";
const SELECT_IMAGE_MESSAGE: &str = "Please select an image file (e.g., JPG, PNG, DICOM).";

pub struct ImageLoader;

impl ImageLoader {
    /// Read an image from disk into a data URI plus the details shown beside the result.
    pub fn load(path: &Path) -> LungLensResult<LoadedImage> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let mime_type = Self::accepted_mime_type(&name)?;

        let bytes = fs::read(path)
            .map_err(|e| LungLensError::file_error(&path.display().to_string(), "read", &e.to_string()))?;

        let last_modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map(|t| DateTime::<Utc>::from(t).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| NOT_AVAILABLE.to_string());

        log::info!("📂 Loaded {} ({} bytes, {})", name, bytes.len(), mime_type);

        let data_uri = DataUri::from_bytes(&mime_type, &bytes);
        let file_info = Self::describe(&name, &mime_type, &bytes, &last_modified);

        Ok(LoadedImage { data_uri, file_info })
    }

    /// MIME type for an accepted file name: any `image/*`, or DICOM by extension.
    pub fn accepted_mime_type(name: &str) -> LungLensResult<String> {
        let is_dicom = Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DICOM_EXTENSION));
        if is_dicom {
            return Ok(DICOM_MIME_TYPE.to_string());
        }

        match mime_guess::from_path(name).first() {
            Some(mime) if mime.type_().as_str() == "image" => Ok(mime.essence_str().to_string()),
            _ => Err(LungLensError::user_input_error(name, "an image file", SELECT_IMAGE_MESSAGE)),
        }
    }

    /// File details for an upload that arrived already encoded.
    pub fn inspect(name: &str, data_uri: &DataUri, last_modified: Option<&str>) -> LungLensResult<FileInfo> {
        let bytes = data_uri.decode()?;
        let mime_type = if data_uri.mime_type().is_empty() {
            NOT_AVAILABLE
        } else {
            data_uri.mime_type()
        };

        Ok(Self::describe(name, mime_type, &bytes, last_modified.unwrap_or(NOT_AVAILABLE)))
    }

    pub fn describe(name: &str, mime_type: &str, bytes: &[u8], last_modified: &str) -> FileInfo {
        FileInfo {
            name: name.to_string(),
            size: format_size(bytes.len()),
            mime_type: mime_type.to_string(),
            dimensions: dimensions(bytes).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            last_modified: last_modified.to_string(),
        }
    }
}

fn format_size(bytes: usize) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

// DICOM and anything else the decoder does not know reports no dimensions.
fn dimensions(bytes: &[u8]) -> Option<String> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;

    Some(format!("{} x {} px", width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_images_and_dicom() {
        assert_eq!(ImageLoader::accepted_mime_type("scan.PNG").expect("png"), "image/png");
        assert_eq!(ImageLoader::accepted_mime_type("scan.jpg").expect("jpg"), "image/jpeg");
        assert_eq!(ImageLoader::accepted_mime_type("series.dcm").expect("dcm"), "application/dicom");
    }

    #[test]
    fn rejects_other_files() {
        let error = ImageLoader::accepted_mime_type("notes.txt").expect_err("not an image");
        assert!(error.user_message().contains(SELECT_IMAGE_MESSAGE));
    }

    #[test]
    fn undecodable_bytes_have_no_dimensions() {
        let info = ImageLoader::describe("x.dcm", "application/dicom", &[0u8; 2048], "2024-07-28");
        assert_eq!(info.dimensions, "N/A");
        assert_eq!(info.size, "2.00 KB");
    }
}
