//! # mmc：MMC 主机侧接口
//!
//! 对应 Linux 内核 **MMC 子系统**（drivers/mmc/core、include/linux/mmc）中 host 驱动调谐时用到的部分，
//! 平台 host 驱动实现这些 trait，调谐逻辑只依赖接口，不依赖具体控制器。
//!
//! ## 模块与 Linux 对应
//!
//! | 模块   | Linux 位置                  | 说明 |
//! |--------|-----------------------------|------|
//! | types  | mmc/host.h                  | MmcIos、MmcBusWidth、MmcTiming |
//! | host   | mmc/host.h, core 占用        | MmcHost：claim_host、set_ios |
//! | tuning | core/mmc_ops.c              | MmcTuning：mmc_send_tuning；CMD19/CMD21 |
//! | delay  | linux/delay.h               | Delay：udelay / mdelay |

#![cfg_attr(not(test), no_std)]

pub mod delay;
pub mod host;
pub mod tuning;
pub mod types;

pub use delay::Delay;
pub use host::{with_host_claimed, MmcHost};
pub use tuning::{mmc_op_tuning, MmcTuning, MMC_SEND_TUNING_BLOCK, MMC_SEND_TUNING_BLOCK_HS200};
pub use types::{MmcBusWidth, MmcIos, MmcTiming};
