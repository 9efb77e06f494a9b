pub mod applicant;
pub mod enrichment;
pub mod team;
