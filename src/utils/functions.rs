use std::{fs, path::Path};

use crate::{backend::Document, error::AppError};

const PDF_MAGIC: &[u8] = b"%PDF-";

pub fn load_document(file_path: &str) -> Result<Document, AppError> {
    let path = Path::new(file_path);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::from(&format!("Not a file path: {}", file_path)))?;

    let content = fs::read(path)?;

    if !is_pdf(path, &content) {
        return Err(AppError::NotPdf(file_path.to_string()));
    }

    Ok(Document { file_name, content })
}

fn is_pdf(path: &Path, content: &[u8]) -> bool {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    has_extension || content.starts_with(PDF_MAGIC)
}

pub fn save_json<T: serde::Serialize>(file_path: &str, value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(file_path, json)?;
    Ok(())
}
