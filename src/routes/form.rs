use std::collections::HashMap;

use axum::extract::Multipart;

use crate::{error::AppError, media::ImageUpload};

/// A multipart body split into text fields and file parts. File parts sent
/// without a file (empty name and body) are dropped.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<ImageUpload>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?;
                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    form.files.push(ImageUpload {
                        field: name,
                        file_name,
                        data: data.to_vec(),
                    });
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?;
                    form.fields.insert(name, value);
                }
            }
        }
        Ok(form)
    }

    pub fn take(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<ImageUpload> {
        let index = self.files.iter().position(|f| f.field == name)?;
        Some(self.files.remove(index))
    }
}
