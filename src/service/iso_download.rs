//! ISO 20022 pacs.008 下载链接
//!
//! 链接式：拼出 `GET /iso/pacs008.xml?address&reference_id&amount&ccy`；
//! 内嵌式：把响应中的 XML 编码成 `data:application/xml;base64,...`。

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Url;
use serde::Serialize;

use crate::{
    config::IsoConfig,
    error::{GuardianError, Result},
    infrastructure::{join_segments, ApiClient},
    utils::reference_id,
};

const DATA_URI_PREFIX: &str = "data:application/xml;base64,";

/// 可下载的报文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub href: String,
    pub reference_id: String,
    pub filename: String,
}

impl DownloadLink {
    fn new(href: String, reference_id: String) -> Self {
        let filename = format!("pacs008_{}.xml", reference_id);
        Self {
            href,
            reference_id,
            filename,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.href.starts_with(DATA_URI_PREFIX)
    }

    /// 内嵌链接解码出 XML 字节；非内嵌链接或内容损坏返回 `None`
    pub fn inline_payload(&self) -> Option<Vec<u8>> {
        self.href
            .strip_prefix(DATA_URI_PREFIX)
            .and_then(|encoded| STANDARD.decode(encoded).ok())
    }
}

/// 链接构造器，初始化时绑定服务地址与报文参数
#[derive(Debug, Clone)]
pub struct IsoLinkBuilder {
    base: Url,
    iso: IsoConfig,
}

impl IsoLinkBuilder {
    pub fn new(base: Url, iso: IsoConfig) -> Self {
        Self { base, iso }
    }

    /// 由地址构造下载链接，每次生成新的参考号
    pub fn for_address(&self, address: &str) -> DownloadLink {
        let reference = reference_id(&self.iso.reference_prefix);
        let mut url = join_segments(&self.base, &["iso", "pacs008.xml"]);
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("reference_id", &reference)
            .append_pair("amount", &self.iso.amount)
            .append_pair("ccy", &self.iso.currency);
        DownloadLink::new(url.to_string(), reference)
    }

    /// 由响应内嵌的 XML 构造 data URI
    pub fn for_inline_xml(&self, xml: &str) -> DownloadLink {
        let reference = reference_id(&self.iso.reference_prefix);
        let href = format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(xml.as_bytes()));
        DownloadLink::new(href, reference)
    }
}

/// 把报文保存到目录下，返回写入的文件路径
pub async fn save_download(client: &ApiClient, link: &DownloadLink, dir: &Path) -> Result<PathBuf> {
    let bytes = if link.is_inline() {
        link.inline_payload().ok_or_else(|| GuardianError::Decode {
            url: "data:application/xml".to_string(),
            message: "invalid base64 payload".to_string(),
        })?
    } else {
        let url = Url::parse(&link.href).map_err(|e| GuardianError::Decode {
            url: link.href.clone(),
            message: e.to_string(),
        })?;
        client.get_bytes(url, "iso_pacs008").await?
    };

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&link.filename);
    tokio::fs::write(&path, &bytes).await?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "saved ISO 20022 artifact");
    Ok(path)
}
