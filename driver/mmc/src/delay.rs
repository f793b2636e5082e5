//! 延时回调（no_std 下由调用方提供，如 eic7700 的 SpinDelay）
//!
//! 对应 Linux udelay / mdelay / msleep。调谐流程里的等待都是经验值，不需要精确计时。

pub trait Delay {
    /// 忙等约 us 微秒（udelay）
    fn delay_us(&mut self, us: u32);

    /// 约 ms 毫秒（mdelay / msleep）
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
