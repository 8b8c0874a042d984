use contracts::domain::a003_document_submission::aggregate::{
    DocumentSubmission, DocumentSubmissionQuery, DocumentUpload, UPLOAD_FILE_FIELD,
};
use contracts::system::auth::Session;
use web_sys::{File, FormData};

use crate::shared::api_utils::{delete, get_json, post_form, ApiError};

pub async fn fetch_submissions(
    query: &DocumentSubmissionQuery,
    session: &Session,
) -> Result<Vec<DocumentSubmission>, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Request(e.to_string()))?;
    let path = if qs.is_empty() {
        "/document-submissions".to_string()
    } else {
        format!("/document-submissions?{}", qs)
    };
    get_json(&path, session).await
}

pub async fn delete_submission(id: &str, session: &Session) -> Result<(), ApiError> {
    delete(&format!("/document-submissions/{}", id), session).await
}

/// Multipart payload: text parts from the upload DTO plus the selected file
pub fn build_form_data(upload: &DocumentUpload, file: &File) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Request(format!("{e:?}")))?;
    for (name, value) in upload.text_parts() {
        form.append_with_str(name, &value)
            .map_err(|e| ApiError::Request(format!("{e:?}")))?;
    }
    form.append_with_blob_and_filename(UPLOAD_FILE_FIELD, file, &file.name())
        .map_err(|e| ApiError::Request(format!("{e:?}")))?;
    Ok(form)
}

pub async fn upload_document(
    upload: &DocumentUpload,
    file: &File,
    session: &Session,
) -> Result<(), ApiError> {
    upload.validate().map_err(ApiError::Invalid)?;
    let form = build_form_data(upload, file)?;
    post_form(
        &format!("/document-submissions/{}/documents", upload.submission_id),
        session,
        form,
    )
    .await
}
