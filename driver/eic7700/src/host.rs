//! EIC7700 SDIO host：host 栈回调的平台实现
//!
//! 持有寄存器访问、tuning 通道与延时；所有操作取 `&mut self`，
//! 调谐期间时序寄存器只能经由本对象访问。

use mmc::{Delay, MmcBusWidth, MmcTuning};
use sdhci::host_ctrl::{
    SDHCI_CTRL_4BITBUS, SDHCI_CTRL_8BITBUS, SDHCI_CTRL_CDTEST_EN, SDHCI_CTRL_CDTEST_INS,
};
use sdhci::host_ctrl2::SDHCI_CTRL_TUNED_CLK;
use sdhci::regs::{SDHCI_HOST_CONTROL, SDHCI_HOST_CONTROL2, SDHCI_INT_ENABLE, SDHCI_SIGNAL_ENABLE};
use sdhci::reset_mask::{SDHCI_RESET_ALL, SDHCI_RESET_CMD, SDHCI_RESET_DATA};
use sdhci::{sdhci_disable_card_clk, sdhci_enable_card_clk, sdhci_reset, sdhci_set_clock, SdhciIo};

use crate::config::SdioConfig;
use crate::core_clk::{set_core_clock, CoreClkReg};
use crate::error::TuningError;
use crate::phy::{config_phy, config_phy_delay};
use crate::regs::vendor::{SW_TUNE_ENABLE, VENDOR_AT_CTRL_R, VENDOR_AT_SATA_R};
use crate::regs::{MAX_PHASE_CODE, PHY_DELAY_CODE_MAX};
use crate::tuning::{sweep_delay_code, sweep_phase_code, SweepReport, TuningTarget};

/// tuning 命令失败、复位 CMD/DATA 后的等待（us）
pub const TUNING_RESET_SETTLE_US: u32 = 200;
/// CLOCK_UNSTABLE quirk：set_clock 后额外等待（ms）
pub const CLOCK_UNSTABLE_SETTLE_MS: u32 = 20;

/// execute_tuning 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningOutcome {
    /// 未开软件调谐：只写了配置的静态相位（None 表示什么都没写）
    Static { phase_code: Option<u16> },
    /// 两轮扫描都成功
    Swept {
        delay: SweepReport,
        phase: SweepReport,
    },
}

pub struct Eic7700SdioHost<R, C, T, D> {
    io: R,
    core_clk: C,
    tuning: T,
    delay: D,
    config: SdioConfig,
    /// 复位前后恢复的中断使能（host->ier）
    ier: u32,
}

impl<R: SdhciIo, C: CoreClkReg, T: MmcTuning, D: Delay> Eic7700SdioHost<R, C, T, D> {
    pub fn new(io: R, core_clk: C, tuning: T, delay: D, config: SdioConfig) -> Self {
        let ier = io.readl(SDHCI_INT_ENABLE);
        Self {
            io,
            core_clk,
            tuning,
            delay,
            config,
            ier,
        }
    }

    pub fn config(&self) -> &SdioConfig {
        &self.config
    }

    pub fn io(&self) -> &R {
        &self.io
    }

    /// 整体复位并配置 PHY
    pub fn init(&mut self) -> Result<(), i32> {
        log::info!(
            target: "eic7700::host",
            "init: delay_code={:#x} sw_tuning={} phase_code={:?}",
            self.config.delay_code,
            self.config.enable_sw_tuning,
            self.config.phase_code
        );
        self.reset(SDHCI_RESET_ALL)
    }

    /// 更新中断使能并保存，复位后恢复
    pub fn set_ier(&mut self, ier: u32) {
        self.ier = ier;
        self.io.writel(SDHCI_INT_ENABLE, ier);
        self.io.writel(SDHCI_SIGNAL_ENABLE, ier);
    }

    /// 控制器软复位
    ///
    /// 复位期间屏蔽中断；`SDHCI_RESET_ALL` 会清掉 PHY 配置，随后重新配置 PHY。
    pub fn reset(&mut self, mask: u8) -> Result<(), i32> {
        self.io.writel(SDHCI_INT_ENABLE, 0);
        self.io.writel(SDHCI_SIGNAL_ENABLE, 0);
        let ret = sdhci_reset(&self.io, mask, &mut self.delay);
        self.io.writel(SDHCI_INT_ENABLE, self.ier);
        self.io.writel(SDHCI_SIGNAL_ENABLE, self.ier);

        if self.config.quirks.force_cdtest {
            let ctrl = self.io.readb(SDHCI_HOST_CONTROL);
            self.io.writeb(
                SDHCI_HOST_CONTROL,
                ctrl | SDHCI_CTRL_CDTEST_INS | SDHCI_CTRL_CDTEST_EN,
            );
        }
        if mask == SDHCI_RESET_ALL {
            self.config_phy()?;
        }
        ret
    }

    /// 核心时钟分频 + SDHCI 时钟
    pub fn set_clock(&mut self, clock: u32) -> Result<(), i32> {
        set_core_clock(&self.io, &self.core_clk, clock, &mut self.delay)?;
        sdhci_set_clock(&self.io, clock, &mut self.delay)?;
        if self.config.quirks.clock_unstable {
            self.delay.delay_ms(CLOCK_UNSTABLE_SETTLE_MS);
        }
        Ok(())
    }

    pub fn set_bus_width(&mut self, width: MmcBusWidth) {
        let mut ctrl = self.io.readb(SDHCI_HOST_CONTROL);
        ctrl &= !(SDHCI_CTRL_4BITBUS | SDHCI_CTRL_8BITBUS);
        match width {
            MmcBusWidth::OneBit => {}
            MmcBusWidth::FourBit => ctrl |= SDHCI_CTRL_4BITBUS,
            MmcBusWidth::EightBit => ctrl |= SDHCI_CTRL_8BITBUS,
        }
        self.io.writeb(SDHCI_HOST_CONTROL, ctrl);
    }

    pub fn config_phy(&mut self) -> Result<(), i32> {
        config_phy(&self.io, &self.config, &mut self.delay)
    }

    /// 关卡时钟写延时码再开
    pub fn apply_delay_code(&mut self, code: u8) -> Result<(), i32> {
        sdhci_disable_card_clk(&self.io);
        config_phy_delay(&self.io, code);
        sdhci_enable_card_clk(&self.io, &mut self.delay)
    }

    /// 关卡时钟写采样相位再开
    pub fn apply_phase_code(&mut self, code: u16) -> Result<(), i32> {
        sdhci_disable_card_clk(&self.io);
        self.io.writew(VENDOR_AT_SATA_R, code);
        sdhci_enable_card_clk(&self.io, &mut self.delay)
    }

    /// host 栈入口：成功返回 Ok，调谐失败返回 -EIO
    pub fn execute_tuning(&mut self, opcode: u32) -> Result<(), i32> {
        self.tune(opcode).map(|_| ()).map_err(|err| {
            log::error!(target: "eic7700::host", "tuning failed: {:?}", err);
            err.errno()
        })
    }

    /// 执行调谐并返回各轮扫描结果
    pub fn tune(&mut self, opcode: u32) -> Result<TuningOutcome, TuningError> {
        if !self.config.enable_sw_tuning {
            let phase_code = self.config.phase_code;
            if let Some(code) = phase_code {
                if let Err(err) = self.apply_phase_code(code) {
                    log::warn!(target: "eic7700::host", "static phase {:#x}: clock error {}", code, err);
                }
            }
            return Ok(TuningOutcome::Static { phase_code });
        }

        log::debug!(target: "eic7700::host", "software tuning, opcode {}", opcode);
        self.enter_sw_tuning();

        let fallback = u16::from(self.config.delay_code);
        let delay = sweep_delay_code(
            &mut SweepTarget::new(self, opcode, TimingParam::DelayCode),
            fallback,
            PHY_DELAY_CODE_MAX,
        )?;
        let phase = sweep_phase_code(
            &mut SweepTarget::new(self, opcode, TimingParam::PhaseCode),
            MAX_PHASE_CODE,
        )?;
        Ok(TuningOutcome::Swept { delay, phase })
    }

    /// 清 TUNED_CLK，切到软件写相位，相位归零
    fn enter_sw_tuning(&mut self) {
        sdhci_disable_card_clk(&self.io);

        let ctrl = self.io.readw(SDHCI_HOST_CONTROL2);
        self.io.writew(SDHCI_HOST_CONTROL2, ctrl & !SDHCI_CTRL_TUNED_CLK);

        let val = self.io.readl(VENDOR_AT_CTRL_R);
        self.io.writel(VENDOR_AT_CTRL_R, val | SW_TUNE_ENABLE);
        self.io.writew(VENDOR_AT_SATA_R, 0);

        if let Err(err) = sdhci_enable_card_clk(&self.io, &mut self.delay) {
            log::warn!(target: "eic7700::host", "card clock not stable before tuning: {}", err);
        }
    }

    fn recover_after_probe(&mut self) {
        if let Err(err) = self.reset(SDHCI_RESET_CMD | SDHCI_RESET_DATA) {
            log::warn!(target: "eic7700::host", "cmd/data reset failed: {}", err);
        }
        self.delay.delay_us(TUNING_RESET_SETTLE_US);
    }
}

#[derive(Debug, Clone, Copy)]
enum TimingParam {
    DelayCode,
    PhaseCode,
}

/// 把 host 适配成某一个时序参数的扫描对象
struct SweepTarget<'h, R, C, T, D> {
    host: &'h mut Eic7700SdioHost<R, C, T, D>,
    opcode: u32,
    param: TimingParam,
}

impl<'h, R, C, T, D> SweepTarget<'h, R, C, T, D> {
    fn new(host: &'h mut Eic7700SdioHost<R, C, T, D>, opcode: u32, param: TimingParam) -> Self {
        Self {
            host,
            opcode,
            param,
        }
    }
}

impl<R: SdhciIo, C: CoreClkReg, T: MmcTuning, D: Delay> TuningTarget
    for SweepTarget<'_, R, C, T, D>
{
    fn apply(&mut self, code: u16) {
        let ret = match self.param {
            TimingParam::DelayCode => self.host.apply_delay_code(code as u8),
            TimingParam::PhaseCode => self.host.apply_phase_code(code),
        };
        if let Err(err) = ret {
            log::warn!(target: "eic7700::host", "{:?} {:#x}: clock error {}", self.param, code, err);
        }
    }

    fn probe(&mut self) -> Result<(), i32> {
        self.host.tuning.send_tuning(self.opcode)
    }

    fn recover(&mut self) {
        self.host.recover_after_probe();
    }
}
