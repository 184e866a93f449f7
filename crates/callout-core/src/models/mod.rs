//! 도메인 데이터 모델.

pub mod advisory;
pub mod frame;
