//! DWC MSHC PHY 配置
//!
//! - SDCLK 延时线：先写 PHY_UPDATE_DELAY_CODE 解锁，再写延时码，最后清 CNFG 锁存。
//! - pad 配置：复位 PHY（带驱动强度）→ CMD/DATA/CLK/RSTN pad → 释放复位 → 写延时码。
//!   SDHCI_RESET_ALL 会清掉 PHY 配置，复位后必须整体重配。

use mmc::Delay;
use sdhci::{sdhci_disable_card_clk, sdhci_enable_card_clk, SdhciIo};

use crate::config::SdioConfig;
use crate::regs::phy::*;

/// CLK pad 配置后到 RSTN pad 配置之间的等待（ms）
const PHY_PAD_SETTLE_MS: u32 = 2;

/// 写 SDCLK 延时码。调用方负责在前后关/开卡时钟。
pub fn config_phy_delay<R: SdhciIo + ?Sized>(io: &R, delay_code: u8) {
    let delay_code = delay_code & PHY_CLK_MAX_DELAY_MASK;
    io.writeb(PHY_SDCLKDL_CNFG_R, PHY_UPDATE_DELAY_CODE);
    io.writeb(PHY_SDCLKDL_DC_R, delay_code);
    io.writeb(PHY_SDCLKDL_CNFG_R, 0);
}

/// pad 寄存器值：slew 2，上拉位，RXSEL
fn pad_cnfg(pull: u16, rxsel: u16) -> u16 {
    (PHY_SLEW_2 << PHY_TX_SLEW_CTRL_P_BIT_SHIFT)
        | (PHY_SLEW_2 << PHY_TX_SLEW_CTRL_N_BIT_SHIFT)
        | (pull << PHY_PULL_BIT_SHIFT)
        | rxsel
}

/// 整体配置 PHY pad 与延时线
pub fn config_phy<R: SdhciIo + ?Sized, D: Delay + ?Sized>(
    io: &R,
    config: &SdioConfig,
    delay: &mut D,
) -> Result<(), i32> {
    let drv = config.drive_impedance.phy_bits() << PHY_PAD_SP_DRIVE_SHIFT;
    log::debug!(target: "eic7700::phy", "phy drv={:#x}", drv);

    sdhci_disable_card_clk(io);

    // 复位 PHY 并设驱动强度
    io.writel(PHY_CNFG_R, drv & !PHY_RSTN);

    let cmd = pad_cnfg(u16::from(config.enable_cmd_pullup), PHY_PAD_RXSEL_1);
    io.writew(PHY_CMDPAD_CNFG_R, cmd);
    let data = pad_cnfg(u16::from(config.enable_data_pullup), PHY_PAD_RXSEL_1);
    io.writew(PHY_DATAPAD_CNFG_R, data);
    let clk = pad_cnfg(0, PHY_PAD_RXSEL_0);
    io.writew(PHY_CLKPAD_CNFG_R, clk);
    log::debug!(target: "eic7700::phy", "phy cmd={:#x} data={:#x} clk={:#x}", cmd, data, clk);
    delay.delay_ms(PHY_PAD_SETTLE_MS);

    io.writew(PHY_RSTNPAD_CNFG_R, pad_cnfg(PHY_PULL_UP, PHY_PAD_RXSEL_1));

    io.writel(PHY_CNFG_R, drv | PHY_RSTN);

    config_phy_delay(io, config.delay_code);

    sdhci_enable_card_clk(io, delay)
}
