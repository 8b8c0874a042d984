pub mod applicant_name;
pub mod grouping;
pub mod masking;
