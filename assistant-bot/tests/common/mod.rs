pub mod mock_bot;
#[allow(dead_code)]
pub mod mock_llm;
