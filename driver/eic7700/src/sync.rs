//! 忙等延时（无平台定时器时的 udelay / mdelay 近似）

use mmc::Delay;

/// 未标定时的每毫秒循环数；实际时长随 CPU 频率变化
pub const DEFAULT_LOOPS_PER_MS: u32 = 1000;

/// 基于 `spin_loop` 的 [`Delay`]，每次至少空转一轮
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay {
    loops_per_ms: u32,
}

impl SpinDelay {
    pub const fn new() -> Self {
        Self::with_loops_per_ms(DEFAULT_LOOPS_PER_MS)
    }

    /// 按平台标定的循环数构造
    pub const fn with_loops_per_ms(loops_per_ms: u32) -> Self {
        Self { loops_per_ms }
    }

    fn loops_for_us(&self, us: u32) -> u64 {
        (u64::from(us) * u64::from(self.loops_per_ms) / 1000).max(1)
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for SpinDelay {
    fn delay_us(&mut self, us: u32) {
        for _ in 0..self.loops_for_us(us) {
            core::hint::spin_loop();
        }
    }
}
