//! SDHCI 标准寄存器与控制器原语
//!
//! 与 Linux drivers/mmc/host/sdhci.c / sdhci.h 对齐：
//! - sdhci.h 寄存器偏移与位定义
//! - sdhci_readl/writel 等访问接口（SdhciIo），MMIO 实现
//! - 卡时钟门控（sdhci_enable_clk 的卡时钟部分）、sdhci_set_clock、sdhci_reset
//!
//! 平台 host 驱动（如 eic7700）在此之上实现 PHY、核心时钟与调谐。

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod io;
pub mod reset;
pub mod sdhci;

#[cfg(test)]
mod testing;

pub use clock::{sdhci_disable_card_clk, sdhci_enable_card_clk, sdhci_set_clock, CLOCK_STABLE_TIMEOUT_US};
pub use io::{MmioSdhci, SdhciIo};
pub use reset::{sdhci_reset, RESET_TIMEOUT_US};
pub use sdhci::{clock_ctrl, host_ctrl, host_ctrl2, int_bits, regs, reset as reset_mask};
