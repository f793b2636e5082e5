//! MMC 主机抽象
//!
//! 对应 Linux：include/linux/mmc/host.h、drivers/mmc/core 中的 host 占用与 set_ios。
//! tuning 期间 host 必须被独占：采样点相关寄存器在整个扫描过程中只能由调谐方访问。

/// MMC 主机控制器抽象
///
/// 对应 Linux mmc_host：提供 host 占用（串行化）与可选的总线配置。
/// `claim_host` 返回的 Guard 应在使用后 drop，以释放占用；调用方应使用 `with_host_claimed` 避免忘记释放。
pub trait MmcHost {
    /// 占用期间持有的 guard，实现方应在 drop 时释放锁（与 mmc_release_host 语义一致）
    type Guard<'a>
    where
        Self: 'a;

    /// 占用 host（在下发 tuning 命令、改时序寄存器前调用，与 mmc_claim_host 语义一致）
    fn claim_host(&self) -> Self::Guard<'_>;

    /// 配置接口时钟与总线宽度（对应 host->ops->set_ios(host, &host->ios)）
    /// 默认实现不做任何事；平台可实现核心时钟、HOST_CONTROL 等。
    fn set_ios(&self, _ios: &crate::types::MmcIos) -> Result<(), i32> {
        Ok(())
    }
}

/// 在持 host 时执行闭包（Guard 在闭包返回后 drop，避免忘记 release）
pub fn with_host_claimed<'h, H: MmcHost, R, F>(host: &'h H, f: F) -> R
where
    F: FnOnce(&mut H::Guard<'h>) -> R,
{
    let mut guard = host.claim_host();
    f(&mut guard)
}
