pub mod expression_ext;
pub mod statement_ext;
