pub mod gemini;
pub mod storage;
