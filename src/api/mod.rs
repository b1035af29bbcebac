//! 入站边界模块
//!
//! 请求校验与结果载荷组装；展示层（页面、表单、路由）不在本 crate 范围内，
//! 它们作为外部协作方调用这里的接口并渲染返回的结构。

pub mod generate;

pub use generate::{handle_generate, GenerateRequest};
