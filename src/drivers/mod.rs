// src/drivers/mod.rs
// 采集 -> 解析 -> 后处理 -> 导出
pub mod capture;
pub mod error;
pub mod parse;
pub mod plot;
pub mod source;
pub mod transform;
// 公开导出这些模块里的结构体，方便外部调用
pub use capture::{capture_from_port, SessionEnd, StopToken};
pub use error::AcquireError;
pub use parse::LinePattern;
pub use plot::{render_table_png, PlotStyle};
pub use source::{LineSource, SerialLineSource};
#[cfg(test)]
pub use source::ManualSource;
pub use transform::{transform, DerivedTable};
