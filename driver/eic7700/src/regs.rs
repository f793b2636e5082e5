//! EIC7700 SDIO 控制器（DWC MSHC）厂商寄存器与 PHY 寄存器
//! 偏移相对 SDHCI 基址；PHY 窗口起于 0x300，厂商自动调谐窗口起于 0x540。

/// PHY 寄存器（DWC MSHC PHY，8/16/32 位混合）
pub mod phy {
    pub const DWC_MSHC_PTR_PHY_REGS: usize = 0x300;
    /// PHY 总配置（32 位）：bit0 PHY_RSTN，bit[23:16] pad 驱动强度
    pub const PHY_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS;
    pub const PHY_CMDPAD_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x04;
    pub const PHY_DATAPAD_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x06;
    pub const PHY_CLKPAD_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x08;
    pub const PHY_STBPAD_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x0A;
    pub const PHY_RSTNPAD_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x0C;
    /// SDCLK 延时线配置：写 PHY_UPDATE_DELAY_CODE 后才允许改 DC
    pub const PHY_SDCLKDL_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x1D;
    /// SDCLK 延时码（delay code）
    pub const PHY_SDCLKDL_DC_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x1E;
    pub const PHY_SMPLDL_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x20;
    pub const PHY_ATDL_CNFG_R: usize = DWC_MSHC_PTR_PHY_REGS + 0x21;

    pub const PHY_RSTN: u32 = 1 << 0;
    pub const PHY_PAD_SP_DRIVE_SHIFT: u32 = 16;

    pub const PHY_UPDATE_DELAY_CODE: u8 = 1 << 4;
    pub const PHY_CLK_MAX_DELAY_MASK: u8 = 0x7F;

    /// pad 配置字段
    pub const PHY_PAD_RXSEL_0: u16 = 0x0;
    pub const PHY_PAD_RXSEL_1: u16 = 0x1;
    pub const PHY_PULL_BIT_SHIFT: u16 = 3;
    pub const PHY_PULL_UP: u16 = 0x1;
    pub const PHY_TX_SLEW_CTRL_P_BIT_SHIFT: u16 = 5;
    pub const PHY_TX_SLEW_CTRL_N_BIT_SHIFT: u16 = 9;
    pub const PHY_SLEW_2: u16 = 0x2;

    /// pad 驱动强度编码（PHY_CNFG_R[23:16]）
    pub const PHYCTRL_DR_33OHM: u32 = 0xEE;
    pub const PHYCTRL_DR_40OHM: u32 = 0xCC;
    pub const PHYCTRL_DR_50OHM: u32 = 0x88;
    pub const PHYCTRL_DR_66OHM: u32 = 0x44;
    pub const PHYCTRL_DR_100OHM: u32 = 0x00;
}

/// 厂商自动调谐寄存器
pub mod vendor {
    /// 自动调谐控制（bit4 SW_TUNE_ENABLE：由软件直接写采样相位）
    pub const VENDOR_AT_CTRL_R: usize = 0x540;
    /// 采样相位码（phase code，16 位写）
    pub const VENDOR_AT_SATA_R: usize = 0x544;

    pub const SW_TUNE_ENABLE: u32 = 1 << 4;
}

/// 核心时钟寄存器（独立 MMIO，不在 SDHCI 窗口内）
pub mod core_clk {
    pub const MSHC_CORE_CLK_ENABLE: u32 = 1 << 16;
    pub const MSHC_CORE_CLK_FREQ_BIT_SHIFT: u32 = 4;
    pub const MSHC_CORE_CLK_FREQ_BIT_MASK: u32 = 0xFFF;
    /// 0 选 200MHz 源，1 选 208MHz 源
    pub const MSHC_CORE_CLK_SEL_BIT: u32 = 1 << 0;
}

/// 扫描域上界（含）
pub const PHY_DELAY_CODE_MAX: u16 = 0x7F;
pub const MAX_PHASE_CODE: u16 = 0xFF;
