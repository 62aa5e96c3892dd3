//! 链标识符标准化模块
//!
//! 表单中的链选择仅作信息用途，这里统一成小写规范名称

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// 链标识符配置
#[derive(Debug, Clone)]
pub struct ChainIdentifier {
    /// 规范名称（小写，用于内部处理）
    pub canonical_name: &'static str,
    /// 别名列表
    pub aliases: &'static [&'static str],
}

static CHAINS: &[ChainIdentifier] = &[
    ChainIdentifier {
        canonical_name: "kadena",
        aliases: &["kda", "chainweb", "mainnet01"],
    },
    ChainIdentifier {
        canonical_name: "xrpl",
        aliases: &["xrp", "ripple", "xrp-ledger"],
    },
];

/// 链标识符注册表（键均为小写）
static CHAIN_REGISTRY: Lazy<HashMap<&'static str, &'static ChainIdentifier>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    for chain in CHAINS {
        registry.insert(chain.canonical_name, chain);
        for alias in chain.aliases {
            registry.insert(*alias, chain);
        }
    }
    registry
});

/// 标准化链标识符
///
/// 已知链返回规范名称；未知标识符原样小写透传，空输入返回 `None`。
///
/// ```rust
/// # use guardianx::utils::chain_normalizer::normalize_chain;
/// assert_eq!(normalize_chain(" KDA ").as_deref(), Some("kadena"));
/// assert_eq!(normalize_chain("Solana").as_deref(), Some("solana"));
/// assert_eq!(normalize_chain("   "), None);
/// ```
pub fn normalize_chain(input: &str) -> Option<String> {
    let lowered = input.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    Some(
        CHAIN_REGISTRY
            .get(lowered.as_str())
            .map(|chain| chain.canonical_name.to_string())
            .unwrap_or(lowered),
    )
}
