//! # eic7700：EIC7700 SDIO 控制器（DWC MSHC）平台驱动
//!
//! 在 `sdhci` 寄存器原语之上实现芯片相关部分：PHY pad 与 SDCLK 延时线、核心时钟分频、
//! 复位后的 PHY 重配，以及 SDR50/SDR104/HS200 下的软件调谐。
//!
//! ## 模块
//!
//! | 模块     | 说明 |
//! |----------|------|
//! | regs     | PHY / 厂商调谐 / 核心时钟寄存器，扫描域上界 |
//! | config   | 板级 `KEY=value` 配置 → SdioConfig |
//! | phy      | config_phy、config_phy_delay |
//! | core_clk | 核心时钟源选择与分频 |
//! | tuning   | delay code / phase code 扫描（TuningTarget 注入硬件操作） |
//! | host     | Eic7700SdioHost：execute_tuning、reset、set_clock |
//! | error    | TuningError、ConfigError → errno / AxError |
//! | sync     | SpinDelay 忙等延时 |
//!
//! ## 调谐流程
//!
//! 1. 未开 `ENABLE_SW_TUNING`：写静态 `PHASE_CODE`（若配置）后返回。
//! 2. 关卡时钟，清 TUNED_CLK，置 SW_TUNE_ENABLE，相位归零，开卡时钟。
//! 3. delay code 扫描（取最宽窗口中点，窗口宽度 > 20 提前结束；失败恢复配置值）。
//! 4. phase code 扫描（取第一个完整窗口中点；失败相位归零）。

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod core_clk;
pub mod error;
pub mod host;
pub mod phy;
pub mod regs;
pub mod sync;
pub mod tuning;

#[cfg(test)]
mod testing;

pub use config::{parse_configfile, DriveImpedance, SdioConfig, SdioQuirks};
pub use core_clk::{core_clock_divisor, set_core_clock, CoreClkReg, CoreClockSetting, MmioCoreClk};
pub use error::{ConfigError, TuningError};
pub use host::{Eic7700SdioHost, TuningOutcome, CLOCK_UNSTABLE_SETTLE_MS, TUNING_RESET_SETTLE_US};
pub use phy::{config_phy, config_phy_delay};
pub use regs::{MAX_PHASE_CODE, PHY_DELAY_CODE_MAX};
pub use sync::SpinDelay;
pub use tuning::{
    sweep_delay_code, sweep_phase_code, PassWindow, SweepReport, TuningTarget, Window,
    DELAY_RANGE_THRESHOLD,
};
