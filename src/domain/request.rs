//! 表单提交与校验请求

use serde::{Deserialize, Serialize};

use crate::{
    error::{GuardianError, Result},
    utils::chain_normalizer::normalize_chain,
};

/// 一次表单提交的原始输入（未经清理）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub chain: String,
    pub address: String,
    pub check_rwa: bool,
}

impl FormSubmission {
    pub fn new(chain: impl Into<String>, address: impl Into<String>, check_rwa: bool) -> Self {
        Self {
            chain: chain.into(),
            address: address.into(),
            check_rwa,
        }
    }
}

/// 每次提交新建的校验请求，也是 POST 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub chain: String,
    pub address: String,
    pub check_rwa: bool,
}

impl ValidationRequest {
    /// 从表单构建请求：地址去除首尾空白后不能为空
    pub fn from_form(form: &FormSubmission) -> Result<Self> {
        let address = form.address.trim();
        if address.is_empty() {
            return Err(GuardianError::EmptyAddress);
        }
        Ok(Self {
            chain: normalize_chain(&form.chain).unwrap_or_default(),
            address: address.to_string(),
            check_rwa: form.check_rwa,
        })
    }
}
