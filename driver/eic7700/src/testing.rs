//! 单元测试用假硬件：字节寻址寄存器文件、核心时钟寄存器、按当前时序决定成败的 tuning 通道

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use mmc::{Delay, MmcTuning};
use sdhci::clock_ctrl::{SDHCI_CLOCK_CARD_EN, SDHCI_CLOCK_INT_EN, SDHCI_CLOCK_INT_STABLE};
use sdhci::regs::{SDHCI_CLOCK_CONTROL, SDHCI_SOFTWARE_RESET};
use sdhci::SdhciIo;

use crate::core_clk::CoreClkReg;
use crate::regs::phy::PHY_SDCLKDL_DC_R;
use crate::regs::vendor::VENDOR_AT_SATA_R;

/// SDHCI + PHY + 厂商寄存器窗口
#[derive(Default)]
pub struct FakeHw {
    mem: RefCell<BTreeMap<usize, u8>>,
    /// (偏移, 宽度字节数, 值)
    writes: RefCell<Vec<(usize, usize, u32)>>,
    pub resets: RefCell<Vec<u8>>,
    pub stuck_clock: Cell<bool>,
}

impl FakeHw {
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
        self.writes.borrow_mut().push((reg, width, val));
        {
            let mut mem = self.mem.borrow_mut();
            for i in 0..width {
                mem.insert(reg + i, (val >> (8 * i)) as u8);
            }
        }
        let end = reg + width;
        if reg <= SDHCI_CLOCK_CONTROL && SDHCI_CLOCK_CONTROL < end {
            let clk = self.load(SDHCI_CLOCK_CONTROL, 1) as u16;
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
                self.mem.borrow_mut().insert(SDHCI_SOFTWARE_RESET, 0);
            }
        }
    }

    /// 对 `reg` 的全部 8 位写入，按时间顺序
    pub fn byte_writes_to(&self, reg: usize) -> Vec<u8> {
        self.writes
            .borrow()
            .iter()
            .filter(|&&(r, w, _)| r == reg && w == 1)
            .map(|&(_, _, v)| v as u8)
            .collect()
    }

    /// 对 `reg` 的全部写入（任意宽度）
    pub fn writes_to(&self, reg: usize) -> Vec<u32> {
        self.writes
            .borrow()
            .iter()
            .filter(|&&(r, _, _)| r == reg)
            .map(|&(_, _, v)| v)
            .collect()
    }

    pub fn delay_code(&self) -> u8 {
        self.load(PHY_SDCLKDL_DC_R, 1) as u8
    }

    pub fn phase_code(&self) -> u16 {
        self.load(VENDOR_AT_SATA_R, 2) as u16
    }

    pub fn card_clock_on(&self) -> bool {
        self.load(SDHCI_CLOCK_CONTROL, 2) as u16 & SDHCI_CLOCK_CARD_EN != 0
    }
}

impl SdhciIo for FakeHw {
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

#[derive(Default)]
pub struct FakeCoreClk(Cell<u32>);

impl CoreClkReg for FakeCoreClk {
    fn read(&self) -> u32 {
        self.0.get()
    }
    fn write(&self, val: u32) {
        self.0.set(val)
    }
}

/// 只累计时长
#[derive(Default)]
pub struct NoDelay {
    pub total_us: u64,
}

impl Delay for NoDelay {
    fn delay_us(&mut self, us: u32) {
        self.total_us += u64::from(us);
    }
}

/// tuning 通道：按发命令时硬件上的 (delay code, phase code) 决定成败。
/// 卡时钟关闭时一律超时失败。
pub struct ScriptedTuning<'a> {
    hw: &'a FakeHw,
    pass: Box<dyn FnMut(u8, u16) -> bool + 'a>,
    pub opcodes: Vec<u32>,
    /// 每次命令时的 (delay code, phase code)
    pub probes: Vec<(u8, u16)>,
}

impl<'a> ScriptedTuning<'a> {
    pub fn new(hw: &'a FakeHw, pass: impl FnMut(u8, u16) -> bool + 'a) -> Self {
        Self {
            hw,
            pass: Box::new(pass),
            opcodes: Vec::new(),
            probes: Vec::new(),
        }
    }
}

impl MmcTuning for ScriptedTuning<'_> {
    fn send_tuning(&mut self, opcode: u32) -> Result<(), i32> {
        self.opcodes.push(opcode);
        if !self.hw.card_clock_on() {
            return Err(-110);
        }
        let (delay, phase) = (self.hw.delay_code(), self.hw.phase_code());
        self.probes.push((delay, phase));
        if (self.pass)(delay, phase) {
            Ok(())
        } else {
            Err(-84) // EILSEQ
        }
    }
}
