//! 天天基金各接口的响应解析
//!
//! 每个解析函数都是纯函数：原始文本或 JSON 输入，规范化记录输出。
//! `Ok(None)` 表示接口对该代码没有数据，`Err` 表示响应结构不符合预期。

pub mod detail;
pub mod estimate;
pub mod history;
pub mod holdings;

pub use detail::parse_detail;
pub use estimate::parse_estimate;
pub use history::parse_history;
pub use holdings::parse_holdings;
