//! 调谐与配置错误
//!
//! host 栈回调接口沿用负 errno（Result<_, i32>），内部用枚举区分失败原因，
//! 通过 axerrno 转成 AxError / LinuxError 码。

use axerrno::{AxError, LinuxError};

/// 调谐失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningError {
    /// delay code 全域扫描没有得到任何完整通过窗口，已恢复配置的 delay code
    DelayCodeExhausted { fallback: u16 },
    /// phase code 全域扫描没有任何一次通过，相位已恢复为 0
    PhaseCodeExhausted,
}

impl TuningError {
    /// host 栈看到的返回值（-EIO）
    pub fn errno(&self) -> i32 {
        -LinuxError::EIO.code()
    }
}

impl From<TuningError> for AxError {
    fn from(_: TuningError) -> Self {
        AxError::Io
    }
}

/// 配置解析错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `key=` 存在但值无法解析
    InvalidValue { key: &'static str },
}

impl ConfigError {
    pub fn errno(&self) -> i32 {
        -LinuxError::EINVAL.code()
    }
}

impl From<ConfigError> for AxError {
    fn from(_: ConfigError) -> Self {
        AxError::InvalidInput
    }
}
