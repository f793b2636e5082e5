//! MMC 主机通用类型
//!
//! 对应 Linux：include/linux/mmc/host.h（mmc_ios、MMC_TIMING_*、MMC_BUS_WIDTH_*）

/// 总线宽度（对应 MMC_BUS_WIDTH_*）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum MmcBusWidth {
    #[default]
    OneBit = 0,
    FourBit = 2,
    EightBit = 3,
}

/// 总线时序模式（对应 MMC_TIMING_*）
///
/// 只有 SDR50/SDR104/HS200 需要 tuning；其余模式 host 栈不会调 execute_tuning。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum MmcTiming {
    #[default]
    Legacy = 0,
    MmcHs = 1,
    SdHs = 2,
    UhsSdr12 = 3,
    UhsSdr25 = 4,
    UhsSdr50 = 5,
    UhsSdr104 = 6,
    UhsDdr50 = 7,
    MmcDdr52 = 8,
    MmcHs200 = 9,
    MmcHs400 = 10,
}

impl MmcTiming {
    /// 该模式是否要求 host 执行采样点调谐
    pub const fn needs_tuning(self) -> bool {
        matches!(self, Self::UhsSdr50 | Self::UhsSdr104 | Self::MmcHs200)
    }
}

/// Host 接口配置（对应 struct mmc_ios）
#[derive(Debug, Clone, Copy, Default)]
pub struct MmcIos {
    /// 时钟频率 Hz
    pub clock: u32,
    /// 总线宽度
    pub bus_width: MmcBusWidth,
    /// 时序模式
    pub timing: MmcTiming,
}

impl MmcIos {
    pub const fn default_legacy() -> Self {
        Self {
            clock: 400_000,
            bus_width: MmcBusWidth::OneBit,
            timing: MmcTiming::Legacy,
        }
    }
}
