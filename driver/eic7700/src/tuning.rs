//! 软件调谐扫描
//!
//! 两轮扫描都是“逐个候选值写硬件 → 发一次 tuning 命令 → 记录通过窗口 → 取窗口中点”：
//!
//! - **delay code**：扫 PHY SDCLK 延时线 `0..=PHY_DELAY_CODE_MAX`，保留最宽的通过窗口；
//!   窗口宽度超过 `DELAY_RANGE_THRESHOLD` 即提前结束。
//! - **phase code**：扫采样相位 `0..=MAX_PHASE_CODE`，取第一个完整通过窗口（后面紧跟一次失败）即停。
//!
//! 下界在第一次通过时定下，之后任何一次通过都推进上界，中间的失败不清下界：
//! 单点通过会成为后面窗口的下界。只有完整窗口（上下界都有）在失败处结算后才清空。
//! 扫到域末尾时仍未结算的完整窗口同样参与比较。
//!
//! 扫描只依赖 [`TuningTarget`]，硬件写入、命令往返与失败恢复都由调用方注入。

use crate::error::TuningError;

/// delay code 窗口宽度超过该值即认为余量足够，停止扫描
pub const DELAY_RANGE_THRESHOLD: u16 = 20;

/// 扫描对象：把候选值写进硬件、执行一次 tuning 往返、失败后恢复
pub trait TuningTarget {
    /// 把候选值写进硬件（调用方负责写入前后的时钟门控）
    fn apply(&mut self, code: u16);

    /// 在当前候选值下执行一次 tuning 命令；失败返回负 errno
    fn probe(&mut self) -> Result<(), i32>;

    /// 一次失败后清 CMD/DATA 状态机并等待稳定
    fn recover(&mut self);
}

impl<T: TuningTarget + ?Sized> TuningTarget for &mut T {
    fn apply(&mut self, code: u16) {
        (**self).apply(code)
    }
    fn probe(&mut self) -> Result<(), i32> {
        (**self).probe()
    }
    fn recover(&mut self) {
        (**self).recover()
    }
}

/// 闭区间 `[low, high]` 的通过窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub low: u16,
    pub high: u16,
}

impl Window {
    pub const fn single(code: u16) -> Self {
        Self { low: code, high: code }
    }

    pub const fn width(&self) -> u16 {
        self.high - self.low
    }

    /// 中点，向下取整
    pub const fn midpoint(&self) -> u16 {
        ((self.low as u32 + self.high as u32) / 2) as u16
    }
}

/// 扫描中正在累积的窗口；上下界都可能尚未出现
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassWindow {
    low: Option<u16>,
    high: Option<u16>,
}

impl PassWindow {
    pub const fn new() -> Self {
        Self { low: None, high: None }
    }

    /// 第一次通过定下界，之后每次通过推进上界
    pub fn record_pass(&mut self, code: u16) {
        if self.low.is_none() {
            self.low = Some(code);
        } else {
            self.high = Some(code);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn low(&self) -> Option<u16> {
        self.low
    }

    pub fn high(&self) -> Option<u16> {
        self.high
    }

    /// 上下界都已出现时返回完整窗口
    pub fn complete(&self) -> Option<Window> {
        Some(Window {
            low: self.low?,
            high: self.high?,
        })
    }
}

/// 一轮扫描的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// 最终写入硬件的值
    pub selected: u16,
    /// 选中的窗口
    pub window: Window,
    /// 实际发出的 tuning 命令数
    pub probes: u32,
}

/// 比 best 严格更宽才替换；返回是否替换
fn credit(best: &mut Option<Window>, window: Window) -> bool {
    match best {
        Some(b) if window.width() <= b.width() => false,
        _ => {
            *best = Some(window);
            true
        }
    }
}

/// delay code 扫描
///
/// 全域没有任何完整窗口时写回 `fallback` 并返回 `DelayCodeExhausted`。
pub fn sweep_delay_code<T: TuningTarget + ?Sized>(
    target: &mut T,
    fallback: u16,
    domain_max: u16,
) -> Result<SweepReport, TuningError> {
    let mut current = PassWindow::new();
    let mut best: Option<Window> = None;
    let mut probes = 0u32;
    let mut stopped_early = false;

    for code in 0..=domain_max {
        target.apply(code);
        probes += 1;
        match target.probe() {
            Ok(()) => current.record_pass(code),
            Err(err) => {
                log::trace!(target: "eic7700::tuning", "delay code {:#x} failed: {}", code, err);
                target.recover();
                if let Some(window) = current.complete() {
                    if credit(&mut best, window) && window.width() > DELAY_RANGE_THRESHOLD {
                        stopped_early = true;
                        break;
                    }
                    current.clear();
                }
            }
        }
    }

    if !stopped_early {
        if let Some(window) = current.complete() {
            credit(&mut best, window);
        }
    }

    let Some(window) = best else {
        log::error!(target: "eic7700::tuning", "delay code tuning failed! restore {:#x}", fallback);
        target.apply(fallback);
        return Err(TuningError::DelayCodeExhausted { fallback });
    };

    let selected = window.midpoint();
    log::info!(
        target: "eic7700::tuning",
        "set delay:{:#x} (window {:#x}..={:#x}, {} probes)",
        selected,
        window.low,
        window.high,
        probes
    );
    target.apply(selected);
    Ok(SweepReport {
        selected,
        window,
        probes,
    })
}

/// phase code 扫描
///
/// 窗口完整后的第一次失败即停止；失败不清窗口。只通过过一次时取该相位；
/// 一次都没通过则把相位写回 0 并返回 `PhaseCodeExhausted`。
pub fn sweep_phase_code<T: TuningTarget + ?Sized>(
    target: &mut T,
    domain_max: u16,
) -> Result<SweepReport, TuningError> {
    let mut current = PassWindow::new();
    let mut probes = 0u32;

    for code in 0..=domain_max {
        target.apply(code);
        probes += 1;
        match target.probe() {
            Ok(()) => current.record_pass(code),
            Err(err) => {
                log::trace!(target: "eic7700::tuning", "phase code {:#x} failed: {}", code, err);
                target.recover();
                if current.complete().is_some() {
                    break;
                }
            }
        }
    }

    let Some(window) = current.complete().or(current.low().map(Window::single)) else {
        log::error!(target: "eic7700::tuning", "phase code tuning failed!");
        target.apply(0);
        return Err(TuningError::PhaseCodeExhausted);
    };

    let selected = window.midpoint();
    log::info!(target: "eic7700::tuning", "set phase_code:{:#x}", selected);
    target.apply(selected);
    Ok(SweepReport {
        selected,
        window,
        probes,
    })
}
