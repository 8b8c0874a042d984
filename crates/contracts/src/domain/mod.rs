pub mod a001_category;
pub mod a002_subcategory;
pub mod a003_document_submission;
pub mod a004_payment_request;
pub mod common;
