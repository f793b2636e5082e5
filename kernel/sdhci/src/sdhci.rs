//! Linux drivers/mmc/host/sdhci.h：控制器寄存器与常量
//!
//! 只收录调谐、时钟门控与软复位用到的寄存器。偏移为标准 SDHCI 布局，DWC MSHC 与之兼容。

/// SDHCI 寄存器偏移（与 Linux sdhci.h 一致）
pub mod regs {
    /// DMA 地址
    pub const SDHCI_DMA_ADDRESS: usize = 0x00;
    /// 块大小（11:0）
    pub const SDHCI_BLOCK_SIZE: usize = 0x04;
    /// 块数（15:0）
    pub const SDHCI_BLOCK_COUNT: usize = 0x06;
    /// CMD 参数
    pub const SDHCI_ARGUMENT: usize = 0x08;
    /// 传输模式
    pub const SDHCI_TRANSFER_MODE: usize = 0x0C;
    /// 命令
    pub const SDHCI_COMMAND: usize = 0x0E;
    pub const SDHCI_RESPONSE: usize = 0x10;
    /// 数据端口（PIO 时读写）
    pub const SDHCI_BUFFER: usize = 0x20;
    /// 当前状态（CMD_INHIBIT 等）
    pub const SDHCI_PRESENT_STATE: usize = 0x24;
    /// 主机控制（DMA_SEL、CDTEST 等）
    pub const SDHCI_HOST_CONTROL: usize = 0x28;
    /// 时钟控制（16 位）
    pub const SDHCI_CLOCK_CONTROL: usize = 0x2C;
    pub const SDHCI_TIMEOUT_CONTROL: usize = 0x2E;
    /// 软复位（8 位）
    pub const SDHCI_SOFTWARE_RESET: usize = 0x2F;
    pub const SDHCI_INT_STATUS: usize = 0x30;
    pub const SDHCI_INT_ENABLE: usize = 0x34;
    pub const SDHCI_SIGNAL_ENABLE: usize = 0x38;
    /// 主机控制 2（UHS 模式、TUNED_CLK 等，16 位）
    pub const SDHCI_HOST_CONTROL2: usize = 0x3E;
}

/// SDHCI_CLOCK_CONTROL 位
pub mod clock_ctrl {
    pub const SDHCI_CLOCK_INT_EN: u16 = 0x0001;
    pub const SDHCI_CLOCK_INT_STABLE: u16 = 0x0002;
    /// SDCLK 输出到卡
    pub const SDHCI_CLOCK_CARD_EN: u16 = 0x0004;
    pub const SDHCI_CLOCK_PLL_EN: u16 = 0x0008;
    pub const SDHCI_DIVIDER_SHIFT: u16 = 8;
}

/// SDHCI_SOFTWARE_RESET 位（sdhci_reset 的 mask）
pub mod reset {
    pub const SDHCI_RESET_ALL: u8 = 0x01;
    pub const SDHCI_RESET_CMD: u8 = 0x02;
    pub const SDHCI_RESET_DATA: u8 = 0x04;
}

/// SDHCI_HOST_CONTROL 位
pub mod host_ctrl {
    pub const SDHCI_CTRL_LED: u8 = 0x01;
    pub const SDHCI_CTRL_4BITBUS: u8 = 0x02;
    pub const SDHCI_CTRL_HISPD: u8 = 0x04;
    pub const SDHCI_CTRL_8BITBUS: u8 = 0x20;
    /// 卡检测测试电平：强制“卡已插入”
    pub const SDHCI_CTRL_CDTEST_INS: u8 = 0x40;
    pub const SDHCI_CTRL_CDTEST_EN: u8 = 0x80;
}

/// SDHCI_HOST_CONTROL2 位
pub mod host_ctrl2 {
    pub const SDHCI_CTRL_UHS_MASK: u16 = 0x0007;
    pub const SDHCI_CTRL_VDD_180: u16 = 0x0008;
    pub const SDHCI_CTRL_EXEC_TUNING: u16 = 0x0040;
    /// 采样时钟已调谐；软件调谐前须清除
    pub const SDHCI_CTRL_TUNED_CLK: u16 = 0x0080;
    pub const SDHCI_CTRL_PRESET_VAL_ENABLE: u16 = 0x8000;
}

/// 中断状态位（SDHCI_INT_STATUS）
pub mod int_bits {
    pub const SDHCI_INT_RESPONSE: u32 = 0x0000_0001;
    pub const SDHCI_INT_DATA_END: u32 = 0x0000_0002;
    pub const SDHCI_INT_DMA_END: u32 = 0x0000_0008;
    pub const SDHCI_INT_DATA_AVAIL: u32 = 0x0000_0020;
    pub const SDHCI_INT_TIMEOUT: u32 = 0x0001_0000;
    pub const SDHCI_INT_CRC: u32 = 0x0002_0000;
    pub const SDHCI_INT_DATA_TIMEOUT: u32 = 0x0010_0000;
    pub const SDHCI_INT_DATA_CRC: u32 = 0x0020_0000;
    pub const SDHCI_INT_DATA_END_BIT: u32 = 0x0040_0000;
}
