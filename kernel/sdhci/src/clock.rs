//! SD 卡时钟门控
//!
//! 改 PHY 延时线、采样相位等时序寄存器前必须先关 SDCLK，写完再开，否则卡侧可能看到毛刺。
//! 开时钟流程与 Linux sdhci_enable_clk 一致：INT_EN → 等 INT_STABLE（最多 150ms）→ CARD_EN。

use mmc::Delay;

use crate::io::SdhciIo;
use crate::sdhci::clock_ctrl::*;
use crate::sdhci::regs::SDHCI_CLOCK_CONTROL;

/// 等内部时钟稳定的上限（us）
pub const CLOCK_STABLE_TIMEOUT_US: u32 = 150_000;
const CLOCK_STABLE_POLL_US: u32 = 10;
/// CARD_EN 置位后等待卡侧时钟稳定（ms）
const CARD_CLOCK_SETTLE_MS: u32 = 1;

/// 关 SDCLK 输出（清 SDHCI_CLOCK_CARD_EN），内部时钟保持
pub fn sdhci_disable_card_clk<R: SdhciIo + ?Sized>(io: &R) {
    let clk = io.readw(SDHCI_CLOCK_CONTROL);
    io.writew(SDHCI_CLOCK_CONTROL, clk & !SDHCI_CLOCK_CARD_EN);
}

/// 开内部时钟并等待稳定，然后开 SDCLK 输出
///
/// 内部时钟 150ms 内未稳定返回 Err(-110)(ETIMEDOUT)，此时不置 CARD_EN。
pub fn sdhci_enable_card_clk<R: SdhciIo + ?Sized, D: Delay + ?Sized>(
    io: &R,
    delay: &mut D,
) -> Result<(), i32> {
    let mut clk = io.readw(SDHCI_CLOCK_CONTROL);
    clk |= SDHCI_CLOCK_INT_EN;
    io.writew(SDHCI_CLOCK_CONTROL, clk);

    let mut waited = 0u32;
    loop {
        clk = io.readw(SDHCI_CLOCK_CONTROL);
        if clk & SDHCI_CLOCK_INT_STABLE != 0 {
            break;
        }
        if waited >= CLOCK_STABLE_TIMEOUT_US {
            log::error!(target: "sdhci", "internal clock never stabilised (clk_ctrl={:#06x})", clk);
            return Err(-110);
        }
        delay.delay_us(CLOCK_STABLE_POLL_US);
        waited += CLOCK_STABLE_POLL_US;
    }

    clk |= SDHCI_CLOCK_CARD_EN;
    io.writew(SDHCI_CLOCK_CONTROL, clk);
    delay.delay_ms(CARD_CLOCK_SETTLE_MS);
    Ok(())
}

/// 设置 SDHCI 侧时钟（对应 sdhci_set_clock）
///
/// 频率由平台核心时钟分频决定，SDHCI 分频器固定为 0（直通）；`clock == 0` 时只关时钟。
pub fn sdhci_set_clock<R: SdhciIo + ?Sized, D: Delay + ?Sized>(
    io: &R,
    clock: u32,
    delay: &mut D,
) -> Result<(), i32> {
    io.writew(SDHCI_CLOCK_CONTROL, 0);
    if clock == 0 {
        return Ok(());
    }
    sdhci_enable_card_clk(io, delay)
}
