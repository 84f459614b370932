pub mod gemini;
pub mod health;
pub mod solutions;
