//! SDHCI 寄存器访问
//!
//! 对应 Linux sdhci_readl/readw/readb、sdhci_writel/writew/writeb。
//! 部分 SoC（如 SG2002）把 8/16 位寄存器合并进 32 位字，只允许 32 位访问；
//! 因此 trait 只要求 readl/writel，窄访问默认按 32 位读-改-写实现，MMIO 实现可覆盖为原生宽度。

/// SDHCI 寄存器访问接口，`reg` 为相对控制器基址的字节偏移
pub trait SdhciIo {
    fn readl(&self, reg: usize) -> u32;

    fn writel(&self, reg: usize, val: u32);

    fn readw(&self, reg: usize) -> u16 {
        let shift = (reg & 0x2) * 8;
        (self.readl(reg & !0x3) >> shift) as u16
    }

    fn writew(&self, reg: usize, val: u16) {
        let base = reg & !0x3;
        let shift = (reg & 0x2) * 8;
        let mask = 0xFFFFu32 << shift;
        let old = self.readl(base);
        self.writel(base, (old & !mask) | (u32::from(val) << shift));
    }

    fn readb(&self, reg: usize) -> u8 {
        let shift = (reg & 0x3) * 8;
        (self.readl(reg & !0x3) >> shift) as u8
    }

    fn writeb(&self, reg: usize, val: u8) {
        let base = reg & !0x3;
        let shift = (reg & 0x3) * 8;
        let mask = 0xFFu32 << shift;
        let old = self.readl(base);
        self.writel(base, (old & !mask) | (u32::from(val) << shift));
    }
}

impl<T: SdhciIo + ?Sized> SdhciIo for &T {
    fn readl(&self, reg: usize) -> u32 {
        (**self).readl(reg)
    }
    fn writel(&self, reg: usize, val: u32) {
        (**self).writel(reg, val)
    }
    fn readw(&self, reg: usize) -> u16 {
        (**self).readw(reg)
    }
    fn writew(&self, reg: usize, val: u16) {
        (**self).writew(reg, val)
    }
    fn readb(&self, reg: usize) -> u8 {
        (**self).readb(reg)
    }
    fn writeb(&self, reg: usize, val: u8) {
        (**self).writeb(reg, val)
    }
}

/// 基于 MMIO 的 SDHCI 访问（恒等映射或已映射的虚拟地址）
#[derive(Debug)]
pub struct MmioSdhci {
    base_vaddr: usize,
}

impl MmioSdhci {
    /// # Safety
    ///
    /// `base_vaddr` 必须是已映射的 SDHCI 寄存器窗口起始地址，且在本对象存活期间保持有效；
    /// 同一窗口不得再被其他对象并发访问。
    pub const unsafe fn new(base_vaddr: usize) -> Self {
        Self { base_vaddr }
    }

    pub fn base(&self) -> usize {
        self.base_vaddr
    }
}

impl SdhciIo for MmioSdhci {
    fn readl(&self, reg: usize) -> u32 {
        unsafe { core::ptr::read_volatile((self.base_vaddr + reg) as *const u32) }
    }

    fn writel(&self, reg: usize, val: u32) {
        unsafe { core::ptr::write_volatile((self.base_vaddr + reg) as *mut u32, val) }
    }

    fn readw(&self, reg: usize) -> u16 {
        unsafe { core::ptr::read_volatile((self.base_vaddr + reg) as *const u16) }
    }

    fn writew(&self, reg: usize, val: u16) {
        unsafe { core::ptr::write_volatile((self.base_vaddr + reg) as *mut u16, val) }
    }

    fn readb(&self, reg: usize) -> u8 {
        unsafe { core::ptr::read_volatile((self.base_vaddr + reg) as *const u8) }
    }

    fn writeb(&self, reg: usize, val: u8) {
        unsafe { core::ptr::write_volatile((self.base_vaddr + reg) as *mut u8, val) }
    }
}
