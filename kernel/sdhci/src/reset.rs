//! SDHCI 软复位（对应 Linux sdhci_reset）
//!
//! 写 SDHCI_SOFTWARE_RESET 后硬件完成复位会自动清位；100ms 内未清位视为超时。
//! 调谐中每次 tuning 命令失败后需 RESET_CMD | RESET_DATA 清掉 CMD/DAT 状态机。

use mmc::Delay;

use crate::io::SdhciIo;
use crate::sdhci::regs::SDHCI_SOFTWARE_RESET;

pub const RESET_TIMEOUT_US: u32 = 100_000;
const RESET_POLL_US: u32 = 10;

pub fn sdhci_reset<R: SdhciIo + ?Sized, D: Delay + ?Sized>(
    io: &R,
    mask: u8,
    delay: &mut D,
) -> Result<(), i32> {
    io.writeb(SDHCI_SOFTWARE_RESET, mask);

    let mut waited = 0u32;
    while io.readb(SDHCI_SOFTWARE_RESET) & mask != 0 {
        if waited >= RESET_TIMEOUT_US {
            log::error!(target: "sdhci", "reset {:#04x} never completed", mask);
            return Err(-110); // ETIMEDOUT
        }
        delay.delay_us(RESET_POLL_US);
        waited += RESET_POLL_US;
    }
    Ok(())
}
