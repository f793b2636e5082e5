//! Tuning 命令往返
//!
//! 对应 Linux drivers/mmc/core/mmc_ops.c 的 mmc_send_tuning：发一次 CMD19/CMD21，
//! 读回 tuning block 并与标准 pattern 比较。具体传输由 host 栈实现，本 crate 只定义接口。

/// SD 卡 SDR50/SDR104 tuning（CMD19）
pub const MMC_SEND_TUNING_BLOCK: u32 = 19;
/// eMMC HS200 tuning（CMD21）
pub const MMC_SEND_TUNING_BLOCK_HS200: u32 = 21;

/// 是否为 tuning 命令（对应 mmc_op_tuning）
#[inline]
pub const fn mmc_op_tuning(opcode: u32) -> bool {
    opcode == MMC_SEND_TUNING_BLOCK || opcode == MMC_SEND_TUNING_BLOCK_HS200
}

/// 下发一次 tuning 命令并返回是否通过
///
/// 失败时返回负 errno（如 -EILSEQ 表示 pattern 不符、-ETIMEDOUT 表示无响应）。
/// 实现方负责等待命令/数据完成中断；调用方只关心 pass/fail。
pub trait MmcTuning {
    fn send_tuning(&mut self, opcode: u32) -> Result<(), i32>;
}

impl<T: MmcTuning + ?Sized> MmcTuning for &mut T {
    fn send_tuning(&mut self, opcode: u32) -> Result<(), i32> {
        (**self).send_tuning(opcode)
    }
}
