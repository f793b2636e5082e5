//! SDIO 主机时序调谐
//!
//! 整合 EIC7700 SDIO 控制器的 host 侧功能：
//! - mmc: host 占用、tuning 命令、延时接口
//! - sdhci: SDHCI 寄存器访问、卡时钟门控、软复位
//! - eic7700: PHY 配置、核心时钟、delay code / phase code 软件调谐
//!
//! `SdioTuningDriver` 用自旋锁包住平台 host，作为 `mmc::MmcHost` 交给 host 栈；
//! 调谐入口 `platform_execute_tuning` 在占用 host 期间完成整轮扫描。

#![cfg_attr(not(test), no_std)]

pub use eic7700;
pub use mmc;
pub use sdhci;

use axerrno::{AxError, AxResult};
use eic7700::{CoreClkReg, Eic7700SdioHost, SdioConfig};
use mmc::{with_host_claimed, Delay, MmcHost, MmcIos, MmcTuning};
use sdhci::SdhciIo;

/// host 栈返回的负 errno 转成 AxError
fn errno_to_ax(err: i32) -> AxError {
    match err {
        -110 => AxError::TimedOut,
        -22 => AxError::InvalidInput,
        _ => AxError::Io,
    }
}

/// 驱动上下文：加锁的平台 host
pub struct SdioTuningDriver<R, C, T, D> {
    host: spin::Mutex<Eic7700SdioHost<R, C, T, D>>,
}

impl<R: SdhciIo, C: CoreClkReg, T: MmcTuning, D: Delay> SdioTuningDriver<R, C, T, D> {
    pub fn new(io: R, core_clk: C, tuning: T, delay: D, config: SdioConfig) -> Self {
        Self {
            host: spin::Mutex::new(Eic7700SdioHost::new(io, core_clk, tuning, delay, config)),
        }
    }

    /// 解析板级配置、创建 host 并整体复位（含 PHY 配置）
    pub fn probe(io: R, core_clk: C, tuning: T, delay: D, file_data: &[u8]) -> AxResult<Self> {
        let config = eic7700::parse_configfile(file_data).map_err(|err| {
            log::error!(target: "sdio_tuning", "bad sdio config: {:?}", err);
            AxError::from(err)
        })?;
        let driver = Self::new(io, core_clk, tuning, delay, config);
        driver.host.lock().init().map_err(|err| {
            log::error!(target: "sdio_tuning", "host init failed: {}", err);
            errno_to_ax(err)
        })?;
        log::info!(target: "sdio_tuning", "sdio host ready");
        Ok(driver)
    }

    /// host 栈的 platform_execute_tuning 回调：成功 Ok，调谐失败 Err(-EIO)
    pub fn platform_execute_tuning(&self, opcode: u32) -> Result<(), i32> {
        with_host_claimed(self, |host| host.execute_tuning(opcode))
    }

    /// 只在当前时序需要时调谐
    pub fn retune_if_needed(&self, ios: &MmcIos, opcode: u32) -> AxResult {
        if !ios.timing.needs_tuning() {
            log::debug!(target: "sdio_tuning", "timing {:?} needs no tuning", ios.timing);
            return Ok(());
        }
        self.platform_execute_tuning(opcode).map_err(errno_to_ax)
    }
}

impl<R: SdhciIo, C: CoreClkReg, T: MmcTuning, D: Delay> MmcHost for SdioTuningDriver<R, C, T, D> {
    type Guard<'a>
        = spin::MutexGuard<'a, Eic7700SdioHost<R, C, T, D>>
    where
        Self: 'a;

    fn claim_host(&self) -> Self::Guard<'_> {
        self.host.lock()
    }

    fn set_ios(&self, ios: &MmcIos) -> Result<(), i32> {
        let mut host = self.claim_host();
        host.set_clock(ios.clock)?;
        host.set_bus_width(ios.bus_width);
        Ok(())
    }
}
