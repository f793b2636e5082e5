//! 单元测试用的假控制器：字节寻址寄存器文件 + 时钟稳定/软复位自清的最小行为

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use mmc::Delay;

use crate::io::SdhciIo;
use crate::sdhci::clock_ctrl::{SDHCI_CLOCK_INT_EN, SDHCI_CLOCK_INT_STABLE};
use crate::sdhci::regs::{SDHCI_CLOCK_CONTROL, SDHCI_SOFTWARE_RESET};

#[derive(Default)]
pub struct FakeSdhci {
    mem: RefCell<BTreeMap<usize, u8>>,
    pub stuck_clock: Cell<bool>,
    pub stuck_reset: Cell<bool>,
    pub resets: RefCell<Vec<u8>>,
}

impl FakeSdhci {
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&self, reg: usize, width: usize) -> u32 {
        let mem = self.mem.borrow();
        (0..width).fold(0u32, |acc, i| {
            acc | (u32::from(*mem.get(&(reg + i)).unwrap_or(&0)) << (8 * i))
        })
    }

    fn store(&self, reg: usize, width: usize, val: u32) {
        {
            let mut mem = self.mem.borrow_mut();
            for i in 0..width {
                mem.insert(reg + i, (val >> (8 * i)) as u8);
            }
        }
        let end = reg + width;
        if reg <= SDHCI_CLOCK_CONTROL && SDHCI_CLOCK_CONTROL < end {
            let clk = self.load(SDHCI_CLOCK_CONTROL, 2) as u16;
            let clk = if clk & SDHCI_CLOCK_INT_EN != 0 && !self.stuck_clock.get() {
                clk | SDHCI_CLOCK_INT_STABLE
            } else {
                clk & !SDHCI_CLOCK_INT_STABLE
            };
            self.mem.borrow_mut().insert(SDHCI_CLOCK_CONTROL, clk as u8);
        }
        if reg <= SDHCI_SOFTWARE_RESET && SDHCI_SOFTWARE_RESET < end {
            let mask = self.load(SDHCI_SOFTWARE_RESET, 1) as u8;
            if mask != 0 {
                self.resets.borrow_mut().push(mask);
                if !self.stuck_reset.get() {
                    self.mem.borrow_mut().insert(SDHCI_SOFTWARE_RESET, 0);
                }
            }
        }
    }
}

impl SdhciIo for FakeSdhci {
    fn readl(&self, reg: usize) -> u32 {
        self.load(reg, 4)
    }
    fn writel(&self, reg: usize, val: u32) {
        self.store(reg, 4, val)
    }
    fn readw(&self, reg: usize) -> u16 {
        self.load(reg, 2) as u16
    }
    fn writew(&self, reg: usize, val: u16) {
        self.store(reg, 2, u32::from(val))
    }
    fn readb(&self, reg: usize) -> u8 {
        self.load(reg, 1) as u8
    }
    fn writeb(&self, reg: usize, val: u8) {
        self.store(reg, 1, u32::from(val))
    }
}

/// 只累计时长、不真正等待
#[derive(Default)]
pub struct NoDelay {
    pub total_us: u64,
}

impl Delay for NoDelay {
    fn delay_us(&mut self, us: u32) {
        self.total_us += u64::from(us);
    }
}
