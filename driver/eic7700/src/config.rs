//! SDIO 控制器板级配置解析
//!
//! 板级配置以 `KEY=value` 文本给出（每行一项），如：
//!
//! ```text
//! DELAY_CODE=0x3c
//! DRIVE_IMPEDANCE_OHM=50
//! ENABLE_DATA_PULLUP=1
//! ENABLE_SW_TUNING=1
//! PHASE_CODE=0x20
//! ```
//!
//! 未出现的 key 保持默认值；出现但无法解析的值返回 `ConfigError::InvalidValue`。

use crate::error::ConfigError;
use crate::regs::phy::*;

/// pad 驱动阻抗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveImpedance {
    Ohm33,
    Ohm40,
    #[default]
    Ohm50,
    Ohm66,
    Ohm100,
}

impl DriveImpedance {
    /// 由欧姆数得到档位；不支持的阻值告警并回退到 50 欧
    pub fn from_ohm(ohm: u32) -> Self {
        match ohm {
            100 => Self::Ohm100,
            66 => Self::Ohm66,
            50 => Self::Ohm50,
            40 => Self::Ohm40,
            33 => Self::Ohm33,
            _ => {
                log::warn!(target: "eic7700::config", "invalid drive impedance {} ohm, using 50", ohm);
                Self::Ohm50
            }
        }
    }

    /// PHY_CNFG_R[23:16] 编码
    pub const fn phy_bits(self) -> u32 {
        match self {
            Self::Ohm33 => PHYCTRL_DR_33OHM,
            Self::Ohm40 => PHYCTRL_DR_40OHM,
            Self::Ohm50 => PHYCTRL_DR_50OHM,
            Self::Ohm66 => PHYCTRL_DR_66OHM,
            Self::Ohm100 => PHYCTRL_DR_100OHM,
        }
    }
}

/// 控制器 quirk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SdioQuirks {
    /// 开时钟后 INT_STABLE 立即置位但时钟实际未稳，set_clock 后需额外等待
    pub clock_unstable: bool,
    /// 无卡检测脚，复位后强制 CDTEST “卡已插入”
    pub force_cdtest: bool,
}

/// PHY 与调谐相关配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SdioConfig {
    /// PHY 配置时写入的 SDCLK 延时码；delay code 扫描失败时也恢复为该值
    pub delay_code: u8,
    pub drive_impedance: DriveImpedance,
    pub enable_cmd_pullup: bool,
    pub enable_data_pullup: bool,
    /// 是否执行软件扫描；关闭时只写静态 phase_code
    pub enable_sw_tuning: bool,
    /// 静态采样相位
    pub phase_code: Option<u16>,
    pub quirks: SdioQuirks,
}

/// 在 file_data 中查找 tag_name 开头的行，返回其后的值（不含换行、首尾空白）
fn find_tag<'a>(file_data: &'a [u8], tag_name: &str) -> Option<&'a [u8]> {
    let tag = tag_name.as_bytes();
    file_data
        .split(|&b| b == b'\n')
        .map(|line| line.trim_ascii())
        .find(|line| line.starts_with(tag))
        .map(|line| line[tag.len()..].trim_ascii())
}

/// 十进制或 0x 十六进制
fn parse_u32(s: &[u8]) -> Option<u32> {
    let s = core::str::from_utf8(s).ok()?;
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn parse_bool(s: &[u8]) -> Option<bool> {
    match s {
        b"1" | b"y" | b"Y" | b"true" => Some(true),
        b"0" | b"n" | b"N" | b"false" => Some(false),
        _ => None,
    }
}

fn tag_u32(file_data: &[u8], key: &'static str) -> Result<Option<u32>, ConfigError> {
    find_tag(file_data, key)
        .map(|v| parse_u32(v).ok_or(ConfigError::InvalidValue { key }))
        .transpose()
}

fn tag_bool(file_data: &[u8], key: &'static str) -> Result<Option<bool>, ConfigError> {
    find_tag(file_data, key)
        .map(|v| parse_bool(v).ok_or(ConfigError::InvalidValue { key }))
        .transpose()
}

/// 解析板级配置
pub fn parse_configfile(file_data: &[u8]) -> Result<SdioConfig, ConfigError> {
    let mut config = SdioConfig::default();

    if let Some(v) = tag_u32(file_data, "DELAY_CODE=")? {
        config.delay_code = (v as u8) & PHY_CLK_MAX_DELAY_MASK;
    }
    if let Some(v) = tag_u32(file_data, "DRIVE_IMPEDANCE_OHM=")? {
        config.drive_impedance = DriveImpedance::from_ohm(v);
    }
    if let Some(v) = tag_bool(file_data, "ENABLE_CMD_PULLUP=")? {
        config.enable_cmd_pullup = v;
    }
    if let Some(v) = tag_bool(file_data, "ENABLE_DATA_PULLUP=")? {
        config.enable_data_pullup = v;
    }
    if let Some(v) = tag_bool(file_data, "ENABLE_SW_TUNING=")? {
        config.enable_sw_tuning = v;
    }
    if let Some(v) = tag_u32(file_data, "PHASE_CODE=")? {
        let code = u16::try_from(v).map_err(|_| ConfigError::InvalidValue { key: "PHASE_CODE=" })?;
        config.phase_code = Some(code);
    }
    if let Some(v) = tag_bool(file_data, "QUIRK_CLOCK_UNSTABLE=")? {
        config.quirks.clock_unstable = v;
    }
    if let Some(v) = tag_bool(file_data, "QUIRK_FORCE_CDTEST=")? {
        config.quirks.force_cdtest = v;
    }

    log::debug!(target: "eic7700::config", "parsed config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let cfg = parse_configfile(b"").unwrap();
        assert_eq!(cfg, SdioConfig::default());
        assert!(!cfg.enable_sw_tuning);
        assert_eq!(cfg.phase_code, None);
    }

    #[test]
    fn parse_full_config() {
        let text = b"# board sdio1\n\
            DELAY_CODE=0x3c\n\
            DRIVE_IMPEDANCE_OHM=40\n\
            ENABLE_CMD_PULLUP=n\n\
            ENABLE_DATA_PULLUP=1\n\
            ENABLE_SW_TUNING=true\n\
            PHASE_CODE=32\n\
            QUIRK_CLOCK_UNSTABLE=y\n";
        let cfg = parse_configfile(text).unwrap();
        assert_eq!(cfg.delay_code, 0x3C);
        assert_eq!(cfg.drive_impedance, DriveImpedance::Ohm40);
        assert!(!cfg.enable_cmd_pullup);
        assert!(cfg.enable_data_pullup);
        assert!(cfg.enable_sw_tuning);
        assert_eq!(cfg.phase_code, Some(32));
        assert!(cfg.quirks.clock_unstable);
        assert!(!cfg.quirks.force_cdtest);
    }

    #[test]
    fn delay_code_is_masked() {
        let cfg = parse_configfile(b"DELAY_CODE=0xff\n").unwrap();
        assert_eq!(cfg.delay_code, 0x7F);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            parse_configfile(b"PHASE_CODE=abc\n"),
            Err(ConfigError::InvalidValue { key: "PHASE_CODE=" })
        );
        assert_eq!(
            parse_configfile(b"ENABLE_SW_TUNING=maybe\n"),
            Err(ConfigError::InvalidValue { key: "ENABLE_SW_TUNING=" })
        );
        assert_eq!(
            parse_configfile(b"PHASE_CODE=0x10000\n"),
            Err(ConfigError::InvalidValue { key: "PHASE_CODE=" })
        );
    }

    #[test]
    fn unknown_impedance_falls_back_to_50() {
        let cfg = parse_configfile(b"DRIVE_IMPEDANCE_OHM=75\r\n").unwrap();
        assert_eq!(cfg.drive_impedance, DriveImpedance::Ohm50);
        assert_eq!(cfg.drive_impedance.phy_bits(), PHYCTRL_DR_50OHM);
    }
}
