//! MSHC 核心时钟分频
//!
//! 核心时钟来自 200MHz 或 208MHz 两个源：请求频率能整除 208MHz 时选 208MHz，否则选 200MHz。
//! 分频值取满足 `src / div <= clock` 的最小 div 减一，再换算成寄存器的偶数分频。

use mmc::Delay;
use sdhci::{sdhci_disable_card_clk, sdhci_enable_card_clk, SdhciIo};

use crate::regs::core_clk::*;

pub const SDHCI_CLK_200M: u32 = 200_000_000;
pub const SDHCI_CLK_208M: u32 = 208_000_000;
pub const MAX_CORE_CLK_DIV: u32 = 0xFFF;

/// 关核心时钟后等其停稳（us）
const CORE_CLK_GATE_US: u32 = 100;
/// 改分频后到重新使能前的等待（us）
const CORE_CLK_PROGRAM_US: u32 = 100;
const CORE_CLK_ENABLE_SETTLE_MS: u32 = 1;
/// 核心时钟切换完成后到卡时钟可用的等待（ms）
const CORE_CLK_SWITCH_SETTLE_MS: u32 = 2;

/// 核心时钟寄存器访问（独立于 SDHCI 窗口的一个 32 位寄存器）
pub trait CoreClkReg {
    fn read(&self) -> u32;
    fn write(&self, val: u32);
}

impl<T: CoreClkReg + ?Sized> CoreClkReg for &T {
    fn read(&self) -> u32 {
        (**self).read()
    }
    fn write(&self, val: u32) {
        (**self).write(val)
    }
}

/// MMIO 核心时钟寄存器
#[derive(Debug)]
pub struct MmioCoreClk {
    vaddr: usize,
}

impl MmioCoreClk {
    /// # Safety
    ///
    /// `vaddr` 必须是已映射的核心时钟寄存器地址，且在本对象存活期间有效。
    pub const unsafe fn new(vaddr: usize) -> Self {
        Self { vaddr }
    }
}

impl CoreClkReg for MmioCoreClk {
    fn read(&self) -> u32 {
        unsafe { core::ptr::read_volatile(self.vaddr as *const u32) }
    }
    fn write(&self, val: u32) {
        unsafe { core::ptr::write_volatile(self.vaddr as *mut u32, val) }
    }
}

/// 一次核心时钟设置：寄存器分频值与时钟源选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreClockSetting {
    pub divisor: u32,
    /// true 选 208MHz 源
    pub sel_208m: bool,
}

/// 由目标频率计算核心时钟设置；`clock == 0` 返回 None（关核心时钟）
pub fn core_clock_divisor(clock: u32) -> Option<CoreClockSetting> {
    if clock == 0 {
        return None;
    }
    let (sel_208m, max_clk) = if SDHCI_CLK_208M % clock == 0 {
        (true, SDHCI_CLK_208M)
    } else {
        (false, SDHCI_CLK_200M)
    };

    let div = (1..=MAX_CORE_CLK_DIV)
        .find(|&div| max_clk / div <= clock)
        .unwrap_or(MAX_CORE_CLK_DIV + 1)
        - 1;

    let divisor = if div <= 1 { 2 } else { (div + 1) * 2 };
    Some(CoreClockSetting { divisor, sel_208m })
}

fn core_clk_disable<C: CoreClkReg + ?Sized>(reg: &C) {
    reg.write(reg.read() & !MSHC_CORE_CLK_ENABLE);
}

fn core_clk_program<C: CoreClkReg + ?Sized, D: Delay + ?Sized>(
    reg: &C,
    setting: CoreClockSetting,
    delay: &mut D,
) {
    let mut val = reg.read();
    val &= !MSHC_CORE_CLK_ENABLE;
    reg.write(val);
    delay.delay_us(CORE_CLK_GATE_US);

    val &= !(MSHC_CORE_CLK_FREQ_BIT_MASK << MSHC_CORE_CLK_FREQ_BIT_SHIFT);
    val |= (setting.divisor & MSHC_CORE_CLK_FREQ_BIT_MASK) << MSHC_CORE_CLK_FREQ_BIT_SHIFT;
    val &= !MSHC_CORE_CLK_SEL_BIT;
    if setting.sel_208m {
        val |= MSHC_CORE_CLK_SEL_BIT;
    }
    reg.write(val);
    delay.delay_us(CORE_CLK_PROGRAM_US);

    val |= MSHC_CORE_CLK_ENABLE;
    reg.write(val);
    delay.delay_ms(CORE_CLK_ENABLE_SETTLE_MS);
}

/// 设置核心时钟；期间关卡时钟
pub fn set_core_clock<R, C, D>(io: &R, reg: &C, clock: u32, delay: &mut D) -> Result<(), i32>
where
    R: SdhciIo + ?Sized,
    C: CoreClkReg + ?Sized,
    D: Delay + ?Sized,
{
    let Some(setting) = core_clock_divisor(clock) else {
        core_clk_disable(reg);
        return Ok(());
    };
    log::debug!(target: "eic7700::clk", "core clock {} Hz -> {:?}", clock, setting);

    sdhci_disable_card_clk(io);
    core_clk_program(reg, setting, delay);
    let ret = sdhci_enable_card_clk(io, delay);
    delay.delay_ms(CORE_CLK_SWITCH_SETTLE_MS);
    ret
}
