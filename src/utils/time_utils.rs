//! 时间工具模块

use chrono::Utc;

/// 获取当前时间戳（毫秒）
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// 生成报文参考号，形如 `GX-1718000000000`
pub fn reference_id(prefix: &str) -> String {
    format!("{}-{}", prefix, current_timestamp_ms())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_id_format() {
        let id = reference_id("GX");
        let (prefix, millis) = id.split_once('-').unwrap();
        assert_eq!(prefix, "GX");
        assert!(millis.parse::<i64>().unwrap() > 1_600_000_000_000);
    }
}
